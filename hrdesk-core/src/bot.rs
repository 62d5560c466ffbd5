/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! HR bot core.

mod dispatcher;
mod handlers;
mod menu_registry;
mod recent_update_cache;
mod single_flight;
mod update_gate;

use self::dispatcher::Dispatcher;
use self::menu_registry::MenuRegistry;
use self::single_flight::SingleFlight;
use self::update_gate::GateDecision;
use self::update_gate::UpdateGate;
use crate::conf::AppConfig;
use hrdesk_client::BotApiClient;
use hrdesk_client::tg::update::Update;
use hrdesk_client::time;
pub use hrdesk_dbp::bot::BotError;
pub use hrdesk_dbp::bot::BotErrorKind;
use hrdesk_dbp::dbp::StoreProvider;
use hrdesk_dbp::dbp::facades::StoreProviderFacades;
use hrdesk_dbp_mem::InMemoryStoreProvider;
use hrdesk_dbp_sheets::SheetNames;
use hrdesk_dbp_sheets::SheetsProvider;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/** HR bot service.

Owns the full path from an acknowledged webhook body to a handled update:

1. Parse the body. Malformed payloads are dropped.
2. Take the process-local single-flight guard. Overlapping invocations are
   dropped.
3. Claim the update identifier in the [UpdateGate]. Duplicates and
   store-failures are dropped.
4. Route the update to its feature handler via the [Dispatcher].

The marker is written before dispatch, so a crash mid-dispatch loses the
update rather than risking it being handled twice.
*/
pub struct BotService {
    /// Thread safe boolean used to indicate application readyness.
    health_ready: AtomicBool,
    /// The store provider.
    dbp: Arc<StoreProvider>,
    /// Duplicate detection gate.
    update_gate: Arc<UpdateGate>,
    /// Guard against overlapping processing within this process.
    single_flight: Arc<SingleFlight>,
    /// Routing of deduplicated updates to feature handlers.
    dispatcher: Arc<Dispatcher>,
}

impl BotService {
    /// Return a new instance.
    pub async fn new(app_config: &Arc<AppConfig>) -> Arc<Self> {
        // Setup persistence from config.
        let dbp = match app_config.backend.implementation() {
            "sheets" => {
                let sheets_provider = SheetsProvider::new(
                    app_config.backend.api_base_url(),
                    app_config.backend.spreadsheet_id(),
                    app_config.backend.credential(),
                    SheetNames::new(
                        app_config.backend.directory_sheet(),
                        app_config.backend.request_sheet(),
                        app_config.backend.processed_sheet(),
                        app_config.backend.error_sheet(),
                    ),
                    app_config.dedup.marker_retention(),
                )
                .await;
                Arc::new(sheets_provider.as_store_provider())
            }
            "mem" => {
                let inmem_provider =
                    InMemoryStoreProvider::new(app_config.dedup.marker_retention()).await;
                Arc::new(inmem_provider.as_store_provider())
            }
            unknown_provider => panic!("Unknown store provider type '{unknown_provider}'."),
        };
        let bot_api_client = Arc::new(BotApiClient::new(
            app_config.telegram.api_base_url(),
            app_config.telegram.token(),
            app_config.app_name_lowercase(),
            app_config.app_version(),
        ));
        let menu_registry = MenuRegistry::from_path(app_config.content.menu_path())
            .unwrap_or_else(|e| panic!("Unable to load presentation content: {e}"));
        log::info!("HR bot dependencies have been created.");
        Self::assemble(
            &dbp,
            &bot_api_client,
            &menu_registry,
            app_config.telegram.hr_chat_id(),
            app_config.dedup.recent_window(),
            app_config.dedup.marker_ttl_micros(),
        )
        .init(app_config)
    }

    /// Wire the service from already constructed parts.
    fn assemble(
        dbp: &Arc<StoreProvider>,
        bot_api_client: &Arc<BotApiClient>,
        menu_registry: &Arc<MenuRegistry>,
        hr_chat_id: Option<i64>,
        recent_window: u64,
        marker_ttl_micros: u64,
    ) -> Arc<Self> {
        Arc::new(Self {
            health_ready: AtomicBool::new(false),
            dbp: Arc::clone(dbp),
            update_gate: UpdateGate::new(dbp, recent_window, marker_ttl_micros),
            single_flight: SingleFlight::new(),
            dispatcher: Dispatcher::new(dbp, bot_api_client, menu_registry, hr_chat_id),
        })
    }

    /// Initialize
    fn init(self: Arc<Self>, app_config: &Arc<AppConfig>) -> Arc<Self> {
        let self_clone = Arc::clone(&self);
        let app_config = Arc::clone(app_config);
        tokio::spawn(async move { self_clone.post_init(&app_config).await });
        self
    }

    /// Async tasks to perform after this [BotService] has been started.
    async fn post_init(&self, app_config: &AppConfig) {
        let ready_ts_micros = time::get_timestamp_micros();
        self.health_ready.store(true, Ordering::Relaxed);
        log::info!(
            "HR bot is ready after {} micros.",
            ready_ts_micros - app_config.startup_ts_micros()
        );
    }

    /// Return `true` if the app has started.
    pub fn is_health_started(&self) -> bool {
        self.health_ready.load(Ordering::Relaxed)
    }

    /// Return `true` if the app is ready to recieve requests.
    pub fn is_health_ready(&self) -> bool {
        self.health_ready.load(Ordering::Relaxed) && self.is_health_live()
    }

    /// Return `true` if the app is functioning as expected and `false` if it
    /// needs to be restarted.
    pub fn is_health_live(&self) -> bool {
        true
    }

    /// Handle a raw webhook body after it has been acknowledged.
    ///
    /// Never fails: every reason not to process the update ends in a logged
    /// drop.
    pub async fn handle_webhook_body(&self, body: &str) {
        match Update::from_json(body) {
            Ok(update) => self.handle_update(&update).await,
            Err(e) => {
                log::debug!("Dropping malformed update payload: {e}");
            }
        }
    }

    /// Run a parsed update through the single-flight guard and the duplicate
    /// gate, then dispatch it.
    pub async fn handle_update(&self, update: &Update) {
        let _lsd = crate::util::LogScopeDuration::new(
            log::Level::Debug,
            module_path!(),
            "handle_update",
            0,
        );
        let update_id = update.update_id;
        let Some(_permit) = self.single_flight.acquire() else {
            log::debug!("Dropping update {update_id}: another update is being processed.");
            return;
        };
        if GateDecision::Duplicate == self.update_gate.check_and_mark(update_id).await {
            log::debug!("Dropping update {update_id}: already seen.");
            return;
        }
        if let Err(e) = self.dispatcher.dispatch(update).await {
            log::warn!("Handling of update {update_id} failed: {e}");
            self.dbp
                .error_log_facade()
                .error_insert(
                    time::get_timestamp_micros(),
                    "dispatch",
                    &format!("update {update_id}: {e}"),
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_dbp::bot::EmployeeGist;

    async fn service_fixture() -> (Arc<InMemoryStoreProvider>, Arc<BotService>) {
        let inmem = InMemoryStoreProvider::new(1000).await;
        inmem.employee_upsert(EmployeeGist::new(2002, "Anna Ardor", "Engineering"));
        let dbp = Arc::new(inmem.as_store_provider());
        let bot_api_client = Arc::new(BotApiClient::new("http://127.0.0.1:9", "", "hrdesk", "0"));
        let menu_registry = MenuRegistry::from_json("{}").unwrap();
        let bot = BotService::assemble(&dbp, &bot_api_client, &menu_registry, None, 50, 86_400_000_000);
        (inmem, bot)
    }

    fn vacation_body(update_id: i64) -> String {
        format!(
            r#"{{
                "update_id": {update_id},
                "message": {{
                    "message_id": 1,
                    "date": 1735000000,
                    "chat": {{"id": 1001, "type": "private"}},
                    "from": {{"id": 2002, "first_name": "Anna"}},
                    "text": "/vacation 2026-09-01 to 2026-09-05"
                }}
            }}"#
        )
    }

    #[tokio::test]
    async fn redelivered_update_files_exactly_one_request() {
        let (inmem, bot) = service_fixture().await;
        let body = vacation_body(42);
        bot.handle_webhook_body(&body).await;
        bot.handle_webhook_body(&body).await;
        assert_eq!(inmem.request_count(), 1);
        assert_eq!(inmem.marker_count(), 1);
    }

    #[tokio::test]
    async fn distinct_updates_are_both_processed() {
        let (inmem, bot) = service_fixture().await;
        bot.handle_webhook_body(&vacation_body(1)).await;
        bot.handle_webhook_body(&vacation_body(2)).await;
        assert_eq!(inmem.request_count(), 2);
    }

    #[tokio::test]
    async fn malformed_body_marks_nothing() {
        let (inmem, bot) = service_fixture().await;
        bot.handle_webhook_body("not json").await;
        assert_eq!(inmem.marker_count(), 0);
    }
}

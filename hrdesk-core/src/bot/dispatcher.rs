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

//! Routing of deduplicated updates to feature handlers.

use super::handlers::AbsenceHandler;
use super::handlers::FaqHandler;
use super::handlers::MenuHandler;
use super::handlers::OnboardingHandler;
use super::menu_registry::MenuRegistry;
use hrdesk_client::BotApiClient;
use hrdesk_client::tg::outgoing::AnswerCallbackQuery;
use hrdesk_client::tg::update::CallbackQuery;
use hrdesk_client::tg::update::Message;
use hrdesk_client::tg::update::Update;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::HrRequestKind;
use hrdesk_dbp::dbp::StoreProvider;
use std::sync::Arc;

/** Routes a deduplicated update to the right feature handler.

Messages route on the leading `/command` token. Inline keyboard presses route
on the `section:argument` callback payload. Anything unrecognized falls back
to the main menu, so the bot never goes silent on input it does not
understand.
*/
pub struct Dispatcher {
    bot_api_client: Arc<BotApiClient>,
    absence_handler: Arc<AbsenceHandler>,
    faq_handler: Arc<FaqHandler>,
    menu_handler: Arc<MenuHandler>,
    onboarding_handler: Arc<OnboardingHandler>,
}

impl Dispatcher {
    /// Return a new instance.
    pub fn new(
        store_provider: &Arc<StoreProvider>,
        bot_api_client: &Arc<BotApiClient>,
        menu_registry: &Arc<MenuRegistry>,
        hr_chat_id: Option<i64>,
    ) -> Arc<Self> {
        Arc::new(Self {
            bot_api_client: Arc::clone(bot_api_client),
            absence_handler: AbsenceHandler::new(
                store_provider,
                bot_api_client,
                menu_registry,
                hr_chat_id,
            ),
            faq_handler: FaqHandler::new(bot_api_client, menu_registry),
            menu_handler: MenuHandler::new(bot_api_client, menu_registry),
            onboarding_handler: OnboardingHandler::new(bot_api_client, menu_registry),
        })
    }

    /// Route `update` to its feature handler.
    pub async fn dispatch(&self, update: &Update) -> Result<(), BotError> {
        if let Some(callback_query) = &update.callback_query {
            return self.dispatch_callback(callback_query).await;
        }
        if let Some(message) = &update.message {
            return self.dispatch_message(message).await;
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Update {} carries neither message nor callback. Ignoring.",
                update.update_id
            );
        }
        Ok(())
    }

    async fn dispatch_message(&self, message: &Message) -> Result<(), BotError> {
        let chat_id = message.chat.id;
        let Some(user) = &message.from else {
            // Channel post or similar without a sender.
            log::debug!("Message {} has no sender. Ignoring.", message.message_id);
            return Ok(());
        };
        match message.command().as_deref() {
            Some("start") => {
                self.onboarding_handler
                    .handle_start(chat_id, &user.first_name)
                    .await;
                self.menu_handler.send_menu(chat_id).await;
                Ok(())
            }
            Some("faq") => {
                self.faq_handler.send_index(chat_id).await;
                Ok(())
            }
            Some(command) => {
                if let Some(kind) = HrRequestKind::from_command(command) {
                    self.absence_handler
                        .handle_command(kind, user.id, chat_id, message.command_args())
                        .await
                } else {
                    // Covers /help, /menu and any unknown command.
                    self.menu_handler.send_menu(chat_id).await;
                    Ok(())
                }
            }
            None => {
                self.menu_handler.send_menu(chat_id).await;
                Ok(())
            }
        }
    }

    async fn dispatch_callback(&self, callback_query: &CallbackQuery) -> Result<(), BotError> {
        // Release the client-side spinner before doing anything else.
        self.bot_api_client
            .answer_callback_query(&AnswerCallbackQuery::new(&callback_query.id))
            .await;
        let chat_id = callback_query
            .message
            .as_ref()
            .map(|message| message.chat.id)
            .unwrap_or(callback_query.from.id);
        let data = callback_query.data.as_deref().unwrap_or_default();
        let (section, argument) = data.split_once(':').unwrap_or((data, ""));
        match section {
            "menu" => {
                if let Some(kind) = HrRequestKind::from_command(argument) {
                    self.absence_handler.prompt_for_detail(kind, chat_id).await;
                } else {
                    self.menu_handler.send_menu(chat_id).await;
                }
                Ok(())
            }
            "faq" => {
                if argument.is_empty() {
                    self.faq_handler.send_index(chat_id).await;
                } else {
                    self.faq_handler.send_answer(chat_id, argument).await;
                }
                Ok(())
            }
            other => {
                log::debug!("Unknown callback section '{other}'. Falling back to menu.");
                self.menu_handler.send_menu(chat_id).await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_dbp::bot::EmployeeGist;
    use hrdesk_dbp_mem::InMemoryStoreProvider;

    /// Fixture with the Bot API pointed at an unroutable address, so outbound
    /// calls fail fast and are swallowed by the client.
    async fn fixture() -> (Arc<InMemoryStoreProvider>, Arc<Dispatcher>) {
        let inmem = InMemoryStoreProvider::new(1000).await;
        inmem.employee_upsert(EmployeeGist::new(2002, "Anna Ardor", "Engineering"));
        let store_provider = Arc::new(inmem.as_store_provider());
        let bot_api_client = Arc::new(BotApiClient::new("http://127.0.0.1:9", "", "hrdesk", "0"));
        let menu_registry = MenuRegistry::from_json("{}").unwrap();
        let dispatcher = Dispatcher::new(&store_provider, &bot_api_client, &menu_registry, None);
        (inmem, dispatcher)
    }

    fn message_update(update_id: i64, user_id: i64, text: &str) -> Update {
        Update::from_json(&format!(
            r#"{{
                "update_id": {update_id},
                "message": {{
                    "message_id": 1,
                    "date": 1735000000,
                    "chat": {{"id": 1001, "type": "private"}},
                    "from": {{"id": {user_id}, "first_name": "Anna"}},
                    "text": "{text}"
                }}
            }}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn absence_command_with_detail_files_a_request() {
        let (inmem, dispatcher) = fixture().await;
        let update = message_update(1, 2002, "/vacation 2026-09-01 to 2026-09-05");
        dispatcher.dispatch(&update).await.unwrap();
        assert_eq!(inmem.request_count(), 1);
    }

    #[tokio::test]
    async fn absence_command_without_detail_only_prompts() {
        let (inmem, dispatcher) = fixture().await;
        dispatcher
            .dispatch(&message_update(2, 2002, "/sick"))
            .await
            .unwrap();
        assert_eq!(inmem.request_count(), 0);
    }

    #[tokio::test]
    async fn unregistered_user_files_nothing() {
        let (inmem, dispatcher) = fixture().await;
        dispatcher
            .dispatch(&message_update(3, 9999, "/vacation next week"))
            .await
            .unwrap();
        assert_eq!(inmem.request_count(), 0);
    }

    #[tokio::test]
    async fn menu_callback_never_files_a_request() {
        let (inmem, dispatcher) = fixture().await;
        let update = Update::from_json(
            r#"{
                "update_id": 4,
                "callback_query": {
                    "id": "cbq1",
                    "from": {"id": 2002, "first_name": "Anna"},
                    "data": "menu:vacation"
                }
            }"#,
        )
        .unwrap();
        dispatcher.dispatch(&update).await.unwrap();
        assert_eq!(inmem.request_count(), 0);
    }

    #[tokio::test]
    async fn update_without_payload_is_ignored() {
        let (_inmem, dispatcher) = fixture().await;
        let update = Update::from_json(r#"{"update_id": 5}"#).unwrap();
        assert!(dispatcher.dispatch(&update).await.is_ok());
    }
}

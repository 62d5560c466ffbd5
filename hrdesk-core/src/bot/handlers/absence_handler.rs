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

//! Absence requests: vacation, remote work, running late and sick leave.

use super::super::menu_registry::MenuRegistry;
use hrdesk_client::BotApiClient;
use hrdesk_client::tg::outgoing::SendMessage;
use hrdesk_client::time;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::HrRequest;
use hrdesk_dbp::bot::HrRequestKind;
use hrdesk_dbp::dbp::StoreProvider;
use hrdesk_dbp::dbp::facades::StoreProviderFacades;
use std::sync::Arc;

/** Files absence requests in the request log.

The requester must exist in the employee directory. A request without detail
text gets a prompt instead of a log row, so a bare `/vacation` never files an
empty request.

Successful requests are acknowledged to the requester and, when an HR chat is
configured, announced there as well. Store failures propagate to the caller;
messaging failures are swallowed by the client.
*/
pub struct AbsenceHandler {
    store_provider: Arc<StoreProvider>,
    bot_api_client: Arc<BotApiClient>,
    menu_registry: Arc<MenuRegistry>,
    hr_chat_id: Option<i64>,
}

impl AbsenceHandler {
    /// Return a new instance.
    pub fn new(
        store_provider: &Arc<StoreProvider>,
        bot_api_client: &Arc<BotApiClient>,
        menu_registry: &Arc<MenuRegistry>,
        hr_chat_id: Option<i64>,
    ) -> Arc<Self> {
        Arc::new(Self {
            store_provider: Arc::clone(store_provider),
            bot_api_client: Arc::clone(bot_api_client),
            menu_registry: Arc::clone(menu_registry),
            hr_chat_id,
        })
    }

    /// Handle an absence command like `/vacation 2026-09-01 to 2026-09-05`.
    pub async fn handle_command(
        &self,
        kind: HrRequestKind,
        user_id: i64,
        chat_id: i64,
        detail: &str,
    ) -> Result<(), BotError> {
        let Some(employee) = self
            .store_provider
            .employee_facade()
            .employee_by_user_id(user_id)
            .await?
        else {
            log::debug!("User {user_id} is not in the employee directory.");
            self.bot_api_client
                .send_message(&SendMessage::text(
                    chat_id,
                    self.menu_registry.reply("not_registered"),
                ))
                .await;
            return Ok(());
        };
        if detail.is_empty() {
            self.prompt_for_detail(kind, chat_id).await;
            return Ok(());
        }
        let hr_request = HrRequest::new(
            kind,
            user_id,
            chat_id,
            employee.get_display_name(),
            detail,
            time::get_timestamp_micros(),
        );
        self.store_provider
            .request_log_facade()
            .request_insert(&hr_request)
            .await?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Logged {kind} request for '{}'.",
                employee.get_display_name()
            );
        }
        let placeholders = [
            ("name", employee.get_display_name()),
            ("kind", kind.as_str()),
            ("detail", detail),
        ];
        self.bot_api_client
            .send_message(&SendMessage::text(
                chat_id,
                &self.menu_registry.reply_with("request_ack", &placeholders),
            ))
            .await;
        if let Some(hr_chat_id) = self.hr_chat_id {
            self.bot_api_client
                .send_message(&SendMessage::text(
                    hr_chat_id,
                    &self
                        .menu_registry
                        .reply_with("hr_notification", &placeholders),
                ))
                .await;
        }
        Ok(())
    }

    /// Ask the user to resend the command with detail text. Also used when an
    /// absence feature is picked from the menu keyboard.
    pub async fn prompt_for_detail(&self, kind: HrRequestKind, chat_id: i64) {
        let text = self.menu_registry.reply_with(
            "request_prompt",
            &[("kind", kind.as_str()), ("command", kind.as_str())],
        );
        self.bot_api_client
            .send_message(&SendMessage::text(chat_id, &text))
            .await;
    }
}

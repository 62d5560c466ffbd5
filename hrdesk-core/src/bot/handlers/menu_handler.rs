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

//! Main menu presentation.

use super::super::menu_registry::MenuRegistry;
use hrdesk_client::BotApiClient;
use hrdesk_client::tg::outgoing::SendMessage;
use std::sync::Arc;

/// Sends the main menu with one inline keyboard button per feature.
///
/// This is also the fallback for anything the bot does not recognize.
pub struct MenuHandler {
    bot_api_client: Arc<BotApiClient>,
    menu_registry: Arc<MenuRegistry>,
}

impl MenuHandler {
    /// Return a new instance.
    pub fn new(bot_api_client: &Arc<BotApiClient>, menu_registry: &Arc<MenuRegistry>) -> Arc<Self> {
        Arc::new(Self {
            bot_api_client: Arc::clone(bot_api_client),
            menu_registry: Arc::clone(menu_registry),
        })
    }

    /// Send the main menu to `chat_id`.
    pub async fn send_menu(&self, chat_id: i64) {
        self.bot_api_client
            .send_message(&SendMessage::with_keyboard(
                chat_id,
                self.menu_registry.reply("menu_title"),
                self.menu_registry.menu_keyboard(),
            ))
            .await;
    }
}

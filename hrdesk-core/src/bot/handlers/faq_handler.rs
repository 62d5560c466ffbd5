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

//! Frequently asked questions.

use super::super::menu_registry::MenuRegistry;
use hrdesk_client::BotApiClient;
use hrdesk_client::tg::outgoing::InlineKeyboardButton;
use hrdesk_client::tg::outgoing::InlineKeyboardMarkup;
use hrdesk_client::tg::outgoing::SendMessage;
use std::sync::Arc;

/// Sends the FAQ index as an inline keyboard and answers picked questions.
///
/// Each question button carries a `faq:<index>` callback payload, where the
/// index points into the current FAQ entry list.
pub struct FaqHandler {
    bot_api_client: Arc<BotApiClient>,
    menu_registry: Arc<MenuRegistry>,
}

impl FaqHandler {
    /// Return a new instance.
    pub fn new(bot_api_client: &Arc<BotApiClient>, menu_registry: &Arc<MenuRegistry>) -> Arc<Self> {
        Arc::new(Self {
            bot_api_client: Arc::clone(bot_api_client),
            menu_registry: Arc::clone(menu_registry),
        })
    }

    /// Send the question list to `chat_id`.
    pub async fn send_index(&self, chat_id: i64) {
        let inline_keyboard = self
            .menu_registry
            .faq_entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                vec![InlineKeyboardButton::new(
                    &entry.question,
                    &format!("faq:{index}"),
                )]
            })
            .collect();
        self.bot_api_client
            .send_message(&SendMessage::with_keyboard(
                chat_id,
                self.menu_registry.reply("faq_title"),
                InlineKeyboardMarkup { inline_keyboard },
            ))
            .await;
    }

    /// Send the answer for the question picked via a `faq:<index>` callback.
    ///
    /// A stale or unparsable index (the content file may have changed since
    /// the keyboard was sent) gets a polite miss instead of an error.
    pub async fn send_answer(&self, chat_id: i64, index_argument: &str) {
        let answer = index_argument
            .parse::<usize>()
            .ok()
            .and_then(|index| self.menu_registry.faq_entries().get(index))
            .map(|entry| entry.answer.as_str())
            .unwrap_or_else(|| self.menu_registry.reply("faq_missing"));
        self.bot_api_client
            .send_message(&SendMessage::text(chat_id, answer))
            .await;
    }
}

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

//! Outbound Telegram Bot API payloads.

use serde::Serialize;

/// Body for the `sendMessage` method.
#[derive(Debug, Serialize)]
pub struct SendMessage {
    /// Target chat identifier.
    pub chat_id: i64,
    /// Message text.
    pub text: String,
    /// Optional inline keyboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    /// Plain text message.
    pub fn text(chat_id: i64, text: &str) -> Self {
        Self {
            chat_id,
            text: text.to_owned(),
            reply_markup: None,
        }
    }

    /// Text message with an inline keyboard attached.
    pub fn with_keyboard(chat_id: i64, text: &str, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            chat_id,
            text: text.to_owned(),
            reply_markup: Some(keyboard),
        }
    }
}

/// Inline keyboard attached to a message.
#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline keyboard button.
#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    /// Button label.
    pub text: String,
    /// Opaque payload delivered back in the callback query.
    pub callback_data: String,
}

impl InlineKeyboardButton {
    /// Return a new instance.
    pub fn new(text: &str, callback_data: &str) -> Self {
        Self {
            text: text.to_owned(),
            callback_data: callback_data.to_owned(),
        }
    }
}

/// Body for the `answerCallbackQuery` method.
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery {
    /// Identifier of the query being acknowledged.
    pub callback_query_id: String,
    /// Optional toast text shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl AnswerCallbackQuery {
    /// Silent acknowledgement.
    pub fn new(callback_query_id: &str) -> Self {
        Self {
            callback_query_id: callback_query_id.to_owned(),
            text: None,
        }
    }
}

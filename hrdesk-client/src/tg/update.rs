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

//! Inbound Telegram update objects.
//!
//! Only the fields the bot acts on are modelled. Unknown fields in the
//! webhook payload are ignored during deserialization.

use serde::Deserialize;

/// One inbound event from the Telegram Bot API.
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Strictly increasing update identifier assigned by Telegram.
    pub update_id: i64,
    /// Present for plain chat messages.
    pub message: Option<Message>,
    /// Present for inline keyboard button presses.
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Parse an update from a raw webhook body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// A chat message.
#[derive(Debug, Deserialize)]
pub struct Message {
    /// Message identifier within the chat.
    pub message_id: i64,
    /// Chat the message was posted in.
    pub chat: Chat,
    /// Sender. Absent for channel posts.
    pub from: Option<User>,
    /// Message text. Absent for media-only messages.
    pub text: Option<String>,
    /// Time the message was sent in epoch seconds.
    pub date: i64,
}

impl Message {
    /// Return the leading `/command` token in lower case, without the slash
    /// and without any `@botname` suffix.
    pub fn command(&self) -> Option<String> {
        self.text
            .as_deref()
            .and_then(|text| text.split_whitespace().next())
            .filter(|token| token.starts_with('/'))
            .map(|token| {
                token[1..]
                    .split('@')
                    .next()
                    .unwrap_or_default()
                    .to_lowercase()
            })
    }

    /// Return everything after the leading command token, trimmed.
    pub fn command_args(&self) -> &str {
        self.text
            .as_deref()
            .and_then(|text| {
                text.split_once(char::is_whitespace)
                    .map(|(_command, args)| args.trim())
            })
            .unwrap_or_default()
    }
}

/// An inline keyboard button press.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Unique query identifier, used to acknowledge the press.
    pub id: String,
    /// User that pressed the button.
    pub from: User,
    /// Message the button was attached to.
    pub message: Option<Message>,
    /// Opaque payload attached to the pressed button.
    pub data: Option<String>,
}

/// A Telegram chat.
#[derive(Debug, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: i64,
    /// `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type")]
    pub chat_type: String,
}

/// A Telegram user.
#[derive(Debug, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// First name as set in the user's profile.
    pub first_name: String,
    /// Optional last name.
    pub last_name: Option<String>,
    /// Optional public username.
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_update() {
        let body = r#"{
            "update_id": 42,
            "message": {
                "message_id": 7,
                "date": 1735000000,
                "chat": {"id": 1001, "type": "private"},
                "from": {"id": 2002, "first_name": "Anna"},
                "text": "/vacation@hrdesk_bot 2026-09-01 2026-09-05"
            }
        }"#;
        let update = Update::from_json(body).unwrap();
        assert_eq!(update.update_id, 42);
        let message = update.message.unwrap();
        assert_eq!(message.command().as_deref(), Some("vacation"));
        assert_eq!(message.command_args(), "2026-09-01 2026-09-05");
    }

    #[test]
    fn parse_callback_update() {
        let body = r#"{
            "update_id": 43,
            "callback_query": {
                "id": "cbq1",
                "from": {"id": 2002, "first_name": "Anna"},
                "data": "menu:vacation"
            }
        }"#;
        let update = Update::from_json(body).unwrap();
        assert_eq!(
            update.callback_query.unwrap().data.as_deref(),
            Some("menu:vacation")
        );
    }

    #[test]
    fn malformed_update_is_an_error() {
        assert!(Update::from_json("not json").is_err());
        assert!(Update::from_json(r#"{"no_update_id": true}"#).is_err());
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let body = r#"{
            "update_id": 44,
            "message": {
                "message_id": 8,
                "date": 1735000000,
                "chat": {"id": 1001, "type": "private"},
                "text": "when is payday?"
            }
        }"#;
        let update = Update::from_json(body).unwrap();
        assert!(update.message.unwrap().command().is_none());
    }
}

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

//! Menu layout and message copy.

use hrdesk_client::tg::outgoing::InlineKeyboardButton;
use hrdesk_client::tg::outgoing::InlineKeyboardMarkup;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::BotErrorKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One button in the main menu.
#[derive(Debug, Deserialize)]
pub struct MenuButton {
    /// Button label shown to the user.
    pub label: String,
    /// Callback payload, e.g. `menu:vacation` or `faq`.
    pub action: String,
}

/// One frequently asked question with its answer.
#[derive(Debug, Deserialize)]
pub struct FaqEntry {
    /// The question, used as button label.
    pub question: String,
    /// The answer sent when the question is picked.
    pub answer: String,
}

/// Customizable parts of the content file. Absent parts fall back to the
/// built-in copy.
#[derive(Debug, Default, Deserialize)]
struct MenuContent {
    #[serde(default)]
    replies: HashMap<String, String>,
    #[serde(default)]
    menu: Vec<Vec<MenuButton>>,
    #[serde(default)]
    faq: Vec<FaqEntry>,
    #[serde(default)]
    onboarding: Vec<String>,
}

/** Menu layout and message copy.

Copy is loaded from a JSON file at startup so HR can adjust wording without a
redeploy. Every part of the file is optional and falls back to built-in
English copy. Templates use `{placeholder}` markers that are filled in at
render time.
*/
pub struct MenuRegistry {
    content: MenuContent,
    builtin_replies: HashMap<String, String>,
    builtin_menu: Vec<Vec<MenuButton>>,
    builtin_faq: Vec<FaqEntry>,
    builtin_onboarding: Vec<String>,
}

impl MenuRegistry {
    /// Load content from `path`, falling back to built-in copy when the file
    /// does not exist.
    ///
    /// A file that exists but fails to parse is an error: silently shipping
    /// fallback copy over a broken customization would hide the breakage.
    pub fn from_path(path: &str) -> Result<Arc<Self>, BotError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No content file at '{path}'. Using built-in copy.");
                Ok(Self::with_content(MenuContent::default()))
            }
            Err(e) => Err(BotErrorKind::ContentError
                .error_with_msg(format!("failed to read content file '{path}': {e}"))),
        }
    }

    /// Parse content from a JSON document.
    pub fn from_json(raw: &str) -> Result<Arc<Self>, BotError> {
        let content = serde_json::from_str::<MenuContent>(raw).map_err(|e| {
            BotErrorKind::ContentError.error_with_msg(format!("malformed content file: {e}"))
        })?;
        Ok(Self::with_content(content))
    }

    fn with_content(content: MenuContent) -> Arc<Self> {
        Arc::new(Self {
            content,
            builtin_replies: Self::builtin_replies(),
            builtin_menu: Self::builtin_menu(),
            builtin_faq: Self::builtin_faq(),
            builtin_onboarding: Self::builtin_onboarding(),
        })
    }

    fn builtin_replies() -> HashMap<String, String> {
        [
            ("menu_title", "What can I help you with?"),
            (
                "not_registered",
                "I could not find you in the employee directory. Please contact HR to get set up.",
            ),
            (
                "request_prompt",
                "Please add a short detail to your {kind} request, e.g. `/{command} 2026-09-01 to 2026-09-05`.",
            ),
            (
                "request_ack",
                "Got it, {name}! Your {kind} request has been logged: {detail}",
            ),
            ("hr_notification", "{name} filed a {kind} request: {detail}"),
            ("faq_title", "Frequently asked questions. Pick one:"),
            ("faq_missing", "That question is no longer available."),
        ]
        .into_iter()
        .map(|(key, reply)| (key.to_owned(), reply.to_owned()))
        .collect()
    }

    fn builtin_menu() -> Vec<Vec<MenuButton>> {
        let button = |label: &str, action: &str| MenuButton {
            label: label.to_owned(),
            action: action.to_owned(),
        };
        vec![
            vec![
                button("\u{1F334} Vacation", "menu:vacation"),
                button("\u{1F3E0} Remote day", "menu:remote"),
            ],
            vec![
                button("\u{23F0} Running late", "menu:late"),
                button("\u{1F912} Sick leave", "menu:sick"),
            ],
            vec![button("\u{2753} FAQ", "faq")],
        ]
    }

    fn builtin_faq() -> Vec<FaqEntry> {
        let entry = |question: &str, answer: &str| FaqEntry {
            question: question.to_owned(),
            answer: answer.to_owned(),
        };
        vec![
            entry(
                "How many vacation days do I have?",
                "Your remaining vacation days are listed in the HR portal under Absence.",
            ),
            entry(
                "How do I report sick leave?",
                "Send /sick with a short note. HR is notified automatically.",
            ),
            entry(
                "Who do I ask about payroll?",
                "Payroll questions go to the HR team channel or hr@example.com.",
            ),
        ]
    }

    fn builtin_onboarding() -> Vec<String> {
        [
            "Welcome aboard, {name}! I am the HR desk bot.",
            "Use /vacation, /remote, /late or /sick to file a request with a short note.",
            "Use /faq for common questions, or /menu to see everything I can do.",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect()
    }

    /// Return the reply template for `key`. Falls back to built-in copy and,
    /// as a last resort, to the key itself.
    pub fn reply<'a>(&'a self, key: &'a str) -> &'a str {
        self.content
            .replies
            .get(key)
            .or_else(|| self.builtin_replies.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Return the reply template for `key` with `{placeholder}` markers
    /// filled in.
    pub fn reply_with(&self, key: &str, placeholders: &[(&str, &str)]) -> String {
        let mut rendered = self.reply(key).to_owned();
        for (placeholder, value) in placeholders {
            rendered = rendered.replace(&format!("{{{placeholder}}}"), value);
        }
        rendered
    }

    /// Return the main menu as an inline keyboard.
    pub fn menu_keyboard(&self) -> InlineKeyboardMarkup {
        let rows = if self.content.menu.is_empty() {
            &self.builtin_menu
        } else {
            &self.content.menu
        };
        InlineKeyboardMarkup {
            inline_keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton::new(&button.label, &button.action))
                        .collect()
                })
                .collect(),
        }
    }

    /// Return the FAQ entries.
    pub fn faq_entries(&self) -> &[FaqEntry] {
        if self.content.faq.is_empty() {
            &self.builtin_faq
        } else {
            &self.content.faq
        }
    }

    /// Return the onboarding message sequence.
    pub fn onboarding_steps(&self) -> &[String] {
        if self.content.onboarding.is_empty() {
            &self.builtin_onboarding
        } else {
            &self.content.onboarding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_copy_is_used_when_file_is_absent() {
        let registry = MenuRegistry::from_path("/does/not/exist.json").unwrap();
        assert_eq!(registry.reply("menu_title"), "What can I help you with?");
        assert_eq!(registry.faq_entries().len(), 3);
        assert_eq!(registry.onboarding_steps().len(), 3);
        assert!(!registry.menu_keyboard().inline_keyboard.is_empty());
    }

    #[test]
    fn file_copy_overrides_builtin_per_key() {
        let registry = MenuRegistry::from_json(
            r#"{
                "replies": { "menu_title": "Vad kan jag hjälpa till med?" },
                "onboarding": ["Välkommen, {name}!"]
            }"#,
        )
        .unwrap();
        assert_eq!(registry.reply("menu_title"), "Vad kan jag hjälpa till med?");
        // Keys absent from the file still resolve to built-in copy.
        assert_eq!(registry.faq_entries().len(), 3);
        assert_eq!(
            registry.reply_with("hr_notification", &[
                ("name", "Alice"),
                ("kind", "vacation"),
                ("detail", "next week"),
            ]),
            "Alice filed a vacation request: next week"
        );
        assert_eq!(registry.onboarding_steps(), ["Välkommen, {name}!"]);
    }

    #[test]
    fn malformed_content_file_is_an_error() {
        assert!(MenuRegistry::from_json("not json").is_err());
    }

    #[test]
    fn unknown_reply_key_falls_back_to_the_key() {
        let registry = MenuRegistry::from_json("{}").unwrap();
        assert_eq!(registry.reply("no_such_key"), "no_such_key");
    }
}

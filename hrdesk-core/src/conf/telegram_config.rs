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

//! Parsing of configuration for the Telegram Bot API.

use config::ConfigBuilder;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Configuration for the Telegram Bot API.
#[derive(Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot credential issued by BotFather.
    token: String,
    /// Bot API base URL.
    apibase: String,
    /// Chat that receives HR notifications.
    hrchatid: String,
    /// Shared secret expected in the webhook secret-token header.
    webhooksecret: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"*redacted*")
            .field("apibase", &self.apibase)
            .field("hrchatid", &self.hrchatid)
            .field("webhooksecret", &"*redacted*")
            .finish()
    }
}

impl AppConfigDefaults for TelegramConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> ConfigBuilder<T> {
        config_builder
            .set_default(prefix.to_string() + "." + "token", "")
            .unwrap()
            .set_default(
                prefix.to_string() + "." + "apibase",
                "https://api.telegram.org",
            )
            .unwrap()
            .set_default(prefix.to_string() + "." + "hrchatid", "")
            .unwrap()
            .set_default(prefix.to_string() + "." + "webhooksecret", "")
            .unwrap()
    }
}

impl TelegramConfig {
    /// Bot credential issued by BotFather.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Bot API base URL. Defaults to `https://api.telegram.org`.
    pub fn api_base_url(&self) -> &str {
        &self.apibase
    }

    /// Chat that receives HR notifications, or `None` when notifications are
    /// disabled.
    pub fn hr_chat_id(&self) -> Option<i64> {
        self.hrchatid.parse::<i64>().ok()
    }

    /// Shared secret expected in the `X-Telegram-Bot-Api-Secret-Token`
    /// header, or `None` when the check is disabled.
    pub fn webhook_secret(&self) -> Option<&str> {
        if self.webhooksecret.is_empty() {
            None
        } else {
            Some(&self.webhooksecret)
        }
    }
}

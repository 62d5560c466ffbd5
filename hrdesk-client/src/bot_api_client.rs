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

//! Interactions with the Telegram Bot API.

use crate::tg::outgoing::AnswerCallbackQuery;
use crate::tg::outgoing::SendMessage;
use reqwest::Client;
use reqwest::ClientBuilder;
use reqwest::Error;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Serialize;

/** Client for the outbound Telegram Bot API calls the bot makes.

All calls are fire and forget: failures are logged and never propagated, so a
messaging outage can never block or retry update handling.
*/
pub struct BotApiClient {
    method_base_url: String,
    // Client uses an Arc internally, so it doesn't need Arc<> wrapping here
    client: Client,
}

impl BotApiClient {
    /// Return a new instance.
    ///
    /// `api_base_url` is normally `https://api.telegram.org` and only
    /// overridden in tests.
    pub fn new(
        api_base_url: &str,
        bot_token: &str,
        app_name_lowercase: &str,
        app_version: &str,
    ) -> Self {
        let user_agent = format!("{app_name_lowercase}/{app_version}");
        log::debug!("user_agent: {user_agent}");
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .referer(false)
            .brotli(true)
            .timeout(core::time::Duration::from_secs(10))
            .build()
            .unwrap();
        Self {
            method_base_url: format!("{api_base_url}/bot{bot_token}"),
            client,
        }
    }

    /// Send a text message, optionally with an inline keyboard.
    pub async fn send_message(&self, send_message: &SendMessage) {
        self.invoke_method("sendMessage", send_message).await;
    }

    /// Acknowledge an inline keyboard button press.
    ///
    /// Without this the pressed button keeps a spinner in the client UI.
    pub async fn answer_callback_query(&self, answer: &AnswerCallbackQuery) {
        self.invoke_method("answerCallbackQuery", answer).await;
    }

    /// POST a Bot API method. Logs and swallows every failure.
    async fn invoke_method<B: Serialize>(&self, method: &str, body: &B) {
        let url = format!("{}/{method}", self.method_base_url);
        let result = self.client.clone().post(&url).json(body).send().await;
        if let Some(response) = Self::handle_response_err(result, method) {
            let status_code = response.status();
            if status_code != StatusCode::OK {
                log::info!("Failed Bot API call '{method}': status_code {status_code}.");
            }
        }
    }

    /// Log any error and return the response if present.
    ///
    /// The bot token is part of the request URL, so errors are logged without
    /// it.
    fn handle_response_err(result: Result<Response, Error>, method: &str) -> Option<Response> {
        result
            .map_err(|e| {
                log::info!("Failed Bot API call '{method}': {:?}", e.without_url());
            })
            .ok()
    }
}

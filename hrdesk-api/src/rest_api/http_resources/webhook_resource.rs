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

//! API resource receiving Telegram webhook deliveries.

use crate::rest_api::AppState;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use actix_web::post;
use actix_web::web;
use actix_web::web::Data;
use actix_web::web::Payload;
use futures::StreamExt;
use std::sync::Arc;

/// Telegram updates are small. Anything larger than this is not a Telegram
/// update.
const MAX_UPDATE_SIZE: usize = 64 * 1024;

/// Header carrying the shared webhook secret, when one is configured.
const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Receive one Telegram update.
///
/// The update is acknowledged immediately and processed after the response
/// has been sent. Telegram redelivers an update until it gets a 2xx, so every
/// body, including unparsable ones, is acknowledged: duplicate suppression
/// and error handling happen during processing, never by failing the
/// acknowledgement.
#[utoipa::path(
    tag = "http",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Telegram `Update` object.",
    ),
    responses(
        (
            status = 200,
            description = "Ok. The update has been accepted for processing.",
            content_type = "application/json",
        ),
        (
            status = 403,
            description = "Forbidden. The configured webhook secret token was missing or wrong.",
        ),
    ),
)]
#[post("/webhook")]
pub async fn receive_update(
    request: HttpRequest,
    mut body: Payload,
    app_state: Data<AppState>,
) -> HttpResponse {
    if let Some(expected) = app_state.webhook_secret.as_deref() {
        let provided = request
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected) {
            log::info!("Rejecting webhook call with missing or wrong secret token.");
            return HttpResponse::Forbidden().finish();
        }
    }
    let mut buffer = web::BytesMut::new();
    while let Some(chunk) = body.next().await {
        let Ok(chunk) = chunk else {
            log::debug!("Failed to read webhook body. Acknowledging anyway.");
            return ack();
        };
        if buffer.len() + chunk.len() > MAX_UPDATE_SIZE {
            log::info!("Dropping oversized webhook body. Acknowledging anyway.");
            return ack();
        }
        buffer.extend_from_slice(&chunk);
    }
    match String::from_utf8(buffer.to_vec()) {
        Ok(raw_update) => {
            let bot = Arc::clone(&app_state.bot);
            // Process after the acknowledgement has been sent.
            tokio::spawn(async move { bot.handle_webhook_body(&raw_update).await });
        }
        Err(e) => {
            log::debug!("Webhook body was not UTF-8: {e}. Acknowledging anyway.");
        }
    }
    ack()
}

/// The fixed acknowledgement body.
fn ack() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(r#"{"ok":true}"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::test;
    use hrdesk_core::BotService;
    use hrdesk_core::conf::AppConfig;

    async fn app_state_with_secret(webhook_secret: Option<&str>) -> Data<AppState> {
        let app_config = Arc::new(AppConfig::default());
        let bot = BotService::new(&app_config).await;
        Data::new(AppState {
            bot,
            webhook_secret: webhook_secret.map(str::to_owned),
        })
    }

    #[actix_web::test]
    async fn any_body_is_acknowledged_with_200() {
        let app = test::init_service(
            App::new()
                .app_data(app_state_with_secret(None).await)
                .service(receive_update),
        )
        .await;
        for body in ["not json", "{}", r#"{"update_id": 1}"#, ""] {
            let request = test::TestRequest::post()
                .uri("/webhook")
                .set_payload(body)
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), actix_web::http::StatusCode::OK);
            let response_body = test::read_body(response).await;
            assert_eq!(response_body, r#"{"ok":true}"#.as_bytes());
        }
    }

    #[actix_web::test]
    async fn wrong_secret_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(app_state_with_secret(Some("topsecret")).await)
                .service(receive_update),
        )
        .await;
        let request = test::TestRequest::post()
            .uri("/webhook")
            .set_payload(r#"{"update_id": 1}"#)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::FORBIDDEN
        );
        let request = test::TestRequest::post()
            .uri("/webhook")
            .insert_header((SECRET_TOKEN_HEADER, "topsecret"))
            .set_payload(r#"{"update_id": 1}"#)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }
}

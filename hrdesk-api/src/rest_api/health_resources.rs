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

//! Kubernetes style health check resources.

use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::get;
use actix_web::http::header::ContentType;
use actix_web::web::Data;
use std::sync::Arc;

/// Health of the application behind the probes.
pub trait AppHealth: Send + Sync {
    /// Return `true` if the app has started.
    fn is_health_started(&self) -> bool;

    /// Return `true` if the app is ready to receive requests.
    fn is_health_ready(&self) -> bool;

    /// Return `true` if the app is functioning as expected and `false` if it
    /// needs to be restarted.
    fn is_health_live(&self) -> bool;
}

/// Render the probe outcome as a health check response.
fn health_response(up: bool) -> HttpResponse {
    let (mut response, status) = if up {
        (HttpResponse::Ok(), "UP")
    } else {
        (HttpResponse::ServiceUnavailable(), "DOWN")
    };
    response
        .content_type(ContentType::json())
        .body(format!("{{\"status\":\"{status}\"}}"))
}

/// Combined health check.
#[utoipa::path(
    tag = "health",
    responses(
        (status = 200, description = "Ok. The application is healthy."),
        (status = 503, description = "Service unavailable. The application is unhealthy."),
    ),
)]
#[get("/health")]
pub async fn health(app_health: Data<Arc<dyn AppHealth>>) -> impl Responder {
    health_response(
        app_health.is_health_started()
            && app_health.is_health_ready()
            && app_health.is_health_live(),
    )
}

/// Liveness health check.
#[utoipa::path(
    tag = "health",
    responses(
        (status = 200, description = "Ok. The application is functional."),
        (status = 503, description = "Service unavailable. The application needs a restart."),
    ),
)]
#[get("/health/live")]
pub async fn health_live(app_health: Data<Arc<dyn AppHealth>>) -> impl Responder {
    health_response(app_health.is_health_live())
}

/// Readiness health check.
#[utoipa::path(
    tag = "health",
    responses(
        (status = 200, description = "Ok. The application accepts requests."),
        (status = 503, description = "Service unavailable. The application is not ready."),
    ),
)]
#[get("/health/ready")]
pub async fn health_ready(app_health: Data<Arc<dyn AppHealth>>) -> impl Responder {
    health_response(app_health.is_health_ready())
}

/// Startup health check.
#[utoipa::path(
    tag = "health",
    responses(
        (status = 200, description = "Ok. The application has started."),
        (status = 503, description = "Service unavailable. The application is still starting."),
    ),
)]
#[get("/health/started")]
pub async fn health_started(app_health: Data<Arc<dyn AppHealth>>) -> impl Responder {
    health_response(app_health.is_health_started())
}

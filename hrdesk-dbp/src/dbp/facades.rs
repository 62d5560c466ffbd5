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

//! Store facades.

mod employee_facade;
mod error_log_facade;
mod idempotency_facade;
mod request_log_facade;

pub use self::employee_facade::*;
pub use self::error_log_facade::*;
pub use self::idempotency_facade::*;
pub use self::request_log_facade::*;

/// Provide access to store facades.
pub trait StoreProviderFacades: Send + Sync {
    /// See [IdempotencyFacade].
    fn idempotency_facade(&self) -> &dyn IdempotencyFacade;

    /// See [EmployeeFacade].
    fn employee_facade(&self) -> &dyn EmployeeFacade;

    /// See [RequestLogFacade].
    fn request_log_facade(&self) -> &dyn RequestLogFacade;

    /// See [ErrorLogFacade].
    fn error_log_facade(&self) -> &dyn ErrorLogFacade;
}

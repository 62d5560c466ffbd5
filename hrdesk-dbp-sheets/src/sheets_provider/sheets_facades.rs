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

//! Google Sheets specific store code.

mod sheets_employee_facade;
mod sheets_error_log_facade;
mod sheets_idempotency_facade;
mod sheets_request_log_facade;

pub use self::sheets_employee_facade::*;
pub use self::sheets_error_log_facade::*;
pub use self::sheets_idempotency_facade::*;
pub use self::sheets_request_log_facade::*;
use super::SheetsProvider;
use hrdesk_dbp::dbp::facades::*;
use std::sync::Arc;

/// Google Sheets specific store code.
pub struct SheetsProviderFacades {
    idempotency_facade: SheetsIdempotencyFacade,
    employee_facade: SheetsEmployeeFacade,
    request_log_facade: SheetsRequestLogFacade,
    error_log_facade: SheetsErrorLogFacade,
}

impl SheetsProviderFacades {
    /// Return a new instance.
    pub fn new(sheets_provider: &Arc<SheetsProvider>) -> Self {
        Self {
            idempotency_facade: SheetsIdempotencyFacade::new(sheets_provider),
            employee_facade: SheetsEmployeeFacade::new(sheets_provider),
            request_log_facade: SheetsRequestLogFacade::new(sheets_provider),
            error_log_facade: SheetsErrorLogFacade::new(sheets_provider),
        }
    }
}

impl StoreProviderFacades for SheetsProviderFacades {
    fn idempotency_facade(&self) -> &dyn IdempotencyFacade {
        &self.idempotency_facade
    }

    fn employee_facade(&self) -> &dyn EmployeeFacade {
        &self.employee_facade
    }

    fn request_log_facade(&self) -> &dyn RequestLogFacade {
        &self.request_log_facade
    }

    fn error_log_facade(&self) -> &dyn ErrorLogFacade {
        &self.error_log_facade
    }
}

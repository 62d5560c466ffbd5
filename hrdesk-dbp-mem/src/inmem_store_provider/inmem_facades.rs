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

//! Ephemeral in-memory specific store code.

mod inmem_employee_facade;
mod inmem_error_log_facade;
mod inmem_idempotency_facade;
mod inmem_request_log_facade;

pub use self::inmem_employee_facade::*;
pub use self::inmem_error_log_facade::*;
pub use self::inmem_idempotency_facade::*;
pub use self::inmem_request_log_facade::*;
use super::InMemoryStoreProvider;
use hrdesk_dbp::dbp::facades::*;
use std::sync::Arc;

/// Ephemeral in-memory specific store code.
pub struct InMemProviderFacades {
    idempotency_facade: InMemIdempotencyFacade,
    employee_facade: InMemEmployeeFacade,
    request_log_facade: InMemRequestLogFacade,
    error_log_facade: InMemErrorLogFacade,
}

impl InMemProviderFacades {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryStoreProvider>) -> Self {
        Self {
            idempotency_facade: InMemIdempotencyFacade::new(inmem_provider),
            employee_facade: InMemEmployeeFacade::new(inmem_provider),
            request_log_facade: InMemRequestLogFacade::new(inmem_provider),
            error_log_facade: InMemErrorLogFacade::new(inmem_provider),
        }
    }
}

impl StoreProviderFacades for InMemProviderFacades {
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

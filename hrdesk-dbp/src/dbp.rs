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

//! Store Provider abstraction

pub mod facades;

use self::facades::*;
use std::sync::Arc;

/// The Store Provider.
///
/// Implementation logic is abstracted by [StoreProviderFacades] for related
/// operations.
pub struct StoreProvider {
    facades: Box<Arc<dyn StoreProviderFacades>>,
}

impl StoreProvider {
    /// Return a new instance.
    pub fn new(store_provider_facades: Arc<dyn StoreProviderFacades>) -> Self {
        Self {
            facades: Box::new(store_provider_facades),
        }
    }
}

impl StoreProviderFacades for StoreProvider {
    fn idempotency_facade(&self) -> &dyn IdempotencyFacade {
        self.facades.idempotency_facade()
    }

    fn employee_facade(&self) -> &dyn EmployeeFacade {
        self.facades.employee_facade()
    }

    fn request_log_facade(&self) -> &dyn RequestLogFacade {
        self.facades.request_log_facade()
    }

    fn error_log_facade(&self) -> &dyn ErrorLogFacade {
        self.facades.error_log_facade()
    }
}

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

//! Ephemeral in-memory implementation of [EmployeeFacade].

use super::InMemoryStoreProvider;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::EmployeeGist;
use hrdesk_dbp::dbp::facades::EmployeeFacade;
use std::sync::Arc;

/// Ephemeral in-memory implementation of [EmployeeFacade].
pub struct InMemEmployeeFacade {
    inmem_provider: Arc<InMemoryStoreProvider>,
}

impl InMemEmployeeFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryStoreProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }
}

#[async_trait::async_trait]
impl EmployeeFacade for InMemEmployeeFacade {
    async fn employee_by_user_id(&self, user_id: i64) -> Result<Option<EmployeeGist>, BotError> {
        Ok(self
            .inmem_provider
            .employees
            .get(&user_id)
            .map(|entry| entry.value().clone()))
    }
}

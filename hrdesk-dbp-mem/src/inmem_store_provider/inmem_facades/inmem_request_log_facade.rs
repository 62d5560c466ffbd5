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

//! Ephemeral in-memory implementation of [RequestLogFacade].

use super::InMemoryStoreProvider;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::HrRequest;
use hrdesk_dbp::dbp::facades::RequestLogFacade;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Ephemeral in-memory implementation of [RequestLogFacade].
pub struct InMemRequestLogFacade {
    inmem_provider: Arc<InMemoryStoreProvider>,
}

impl InMemRequestLogFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryStoreProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }
}

#[async_trait::async_trait]
impl RequestLogFacade for InMemRequestLogFacade {
    async fn request_insert(&self, request: &HrRequest) -> Result<(), BotError> {
        let seq = self
            .inmem_provider
            .insert_seq
            .fetch_add(1, Ordering::Relaxed);
        self.inmem_provider.requests.insert(seq, request.clone());
        Ok(())
    }
}

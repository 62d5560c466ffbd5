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

//! Google Sheets implementation of [ErrorLogFacade].

use super::SheetsProvider;
use hrdesk_dbp::dbp::facades::ErrorLogFacade;
use std::sync::Arc;

/// Google Sheets implementation of [ErrorLogFacade].
///
/// Rows are appended best effort. The error log must never be able to fail
/// an operation that is merely reporting a failure.
pub struct SheetsErrorLogFacade {
    sheets_provider: Arc<SheetsProvider>,
}

impl SheetsErrorLogFacade {
    /// Return a new instance.
    pub fn new(sheets_provider: &Arc<SheetsProvider>) -> Self {
        Self {
            sheets_provider: Arc::clone(sheets_provider),
        }
    }
}

#[async_trait::async_trait]
impl ErrorLogFacade for SheetsErrorLogFacade {
    async fn error_insert(&self, ts_micros: u64, scope: &str, message: &str) {
        let provider = &self.sheets_provider;
        let row = [
            ts_micros.to_string(),
            scope.to_owned(),
            message.to_owned(),
        ];
        if let Err(e) = provider
            .session
            .values_append(&provider.sheet_names.error, &row)
            .await
        {
            log::warn!("Failed to append error log row: {e}");
        }
    }
}

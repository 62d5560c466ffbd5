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

//! Google Sheets implementation of [RequestLogFacade].

use super::SheetsProvider;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::HrRequest;
use hrdesk_dbp::dbp::facades::RequestLogFacade;
use std::sync::Arc;

/// Google Sheets implementation of [RequestLogFacade].
///
/// Each filed request becomes one appended row:
/// `request_ts_micros, kind, user_id, employee_name, detail, chat_id`.
pub struct SheetsRequestLogFacade {
    sheets_provider: Arc<SheetsProvider>,
}

impl SheetsRequestLogFacade {
    /// Return a new instance.
    pub fn new(sheets_provider: &Arc<SheetsProvider>) -> Self {
        Self {
            sheets_provider: Arc::clone(sheets_provider),
        }
    }
}

#[async_trait::async_trait]
impl RequestLogFacade for SheetsRequestLogFacade {
    async fn request_insert(&self, hr_request: &HrRequest) -> Result<(), BotError> {
        let provider = &self.sheets_provider;
        let row = [
            hr_request.get_request_ts_micros().to_string(),
            hr_request.get_kind().as_str().to_owned(),
            hr_request.get_user_id().to_string(),
            hr_request.get_employee_name().to_owned(),
            hr_request.get_detail().to_owned(),
            hr_request.get_chat_id().to_string(),
        ];
        provider
            .session
            .values_append(&provider.sheet_names.request, &row)
            .await
    }
}

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

//! Store facade for the employee directory.

use crate::bot::BotError;
use crate::bot::EmployeeGist;

/// Store facade for the employee directory sheet.
#[async_trait::async_trait]
pub trait EmployeeFacade: Send + Sync {
    /// Look up an employee by Telegram user identifier.
    async fn employee_by_user_id(&self, user_id: i64) -> Result<Option<EmployeeGist>, BotError>;
}

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

//! Store facade for the error log.

/** Store facade for the error log sheet.

Appends are best effort: a failing error-log write is logged locally and never
propagated, so error reporting can never take down update handling.
*/
#[async_trait::async_trait]
pub trait ErrorLogFacade: Send + Sync {
    /// Append an error row.
    async fn error_insert(&self, ts_micros: u64, scope: &str, message: &str);
}

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

//! Parsing of configuration for the spreadsheet backend.

use config::ConfigBuilder;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Configuration for persistence backend.
#[derive(Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend implementation
    implementation: String,
    /// Google Sheets API base URL.
    apibase: String,
    /// Spreadsheet identifier.
    spreadsheetid: String,
    /// Bearer credential for the Sheets API.
    credential: String,
    /// Employee directory sheet name.
    directorysheet: String,
    /// HR request log sheet name.
    requestsheet: String,
    /// Processed-update log sheet name.
    processedsheet: String,
    /// Error log sheet name.
    errorsheet: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("implementation", &self.implementation)
            .field("apibase", &self.apibase)
            .field("spreadsheetid", &self.spreadsheetid)
            .field("credential", &"*redacted*")
            .field("directorysheet", &self.directorysheet)
            .field("requestsheet", &self.requestsheet)
            .field("processedsheet", &self.processedsheet)
            .field("errorsheet", &self.errorsheet)
            .finish()
    }
}

impl AppConfigDefaults for BackendConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> ConfigBuilder<T> {
        config_builder
            .set_default(prefix.to_string() + "." + "implementation", "mem")
            .unwrap()
            .set_default(
                prefix.to_string() + "." + "apibase",
                "https://sheets.googleapis.com",
            )
            .unwrap()
            .set_default(prefix.to_string() + "." + "spreadsheetid", "")
            .unwrap()
            .set_default(prefix.to_string() + "." + "credential", "")
            .unwrap()
            .set_default(prefix.to_string() + "." + "directorysheet", "Employees")
            .unwrap()
            .set_default(prefix.to_string() + "." + "requestsheet", "Requests")
            .unwrap()
            .set_default(prefix.to_string() + "." + "processedsheet", "Processed")
            .unwrap()
            .set_default(prefix.to_string() + "." + "errorsheet", "Errors")
            .unwrap()
    }
}

impl BackendConfig {
    /// Backend implementation variant. `mem` or `sheets`.
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    /// Google Sheets API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.apibase
    }

    /// Spreadsheet identifier.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheetid
    }

    /// Bearer credential for the Sheets API.
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Employee directory sheet name.
    pub fn directory_sheet(&self) -> &str {
        &self.directorysheet
    }

    /// HR request log sheet name.
    pub fn request_sheet(&self) -> &str {
        &self.requestsheet
    }

    /// Processed-update log sheet name.
    pub fn processed_sheet(&self) -> &str {
        &self.processedsheet
    }

    /// Error log sheet name.
    pub fn error_sheet(&self) -> &str {
        &self.errorsheet
    }
}

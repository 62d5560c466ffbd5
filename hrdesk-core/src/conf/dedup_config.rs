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

//! Parsing of configuration for duplicate update detection.

use config::ConfigBuilder;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Configuration for duplicate update detection.
#[derive(Debug, Deserialize, Serialize)]
pub struct DedupConfig {
    /// See [Self::marker_ttl_micros()].
    ttlseconds: u64,
    /// See [Self::marker_retention()].
    retention: usize,
    /// See [Self::recent_window()].
    recentwindow: u64,
}

impl AppConfigDefaults for DedupConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> ConfigBuilder<T> {
        config_builder
            .set_default(prefix.to_string() + "." + "ttlseconds", "86400")
            .unwrap()
            .set_default(prefix.to_string() + "." + "retention", "1000")
            .unwrap()
            .set_default(prefix.to_string() + "." + "recentwindow", "50")
            .unwrap()
    }
}

impl DedupConfig {
    /// Time a processed-update marker counts as "seen", in epoch micros.
    /// Defaults to 24 hours.
    pub fn marker_ttl_micros(&self) -> u64 {
        self.ttlseconds.saturating_mul(1_000_000)
    }

    /// Maximum number of markers the authoritative store retains. Oldest
    /// markers are trimmed first. Defaults to 1000.
    pub fn marker_retention(&self) -> usize {
        self.retention
    }

    /// Target size of the process-local recent-window cache in front of the
    /// authoritative store. Defaults to 50.
    pub fn recent_window(&self) -> u64 {
        self.recentwindow
    }
}

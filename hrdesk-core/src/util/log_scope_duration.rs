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

//! RAII timing of a scope.

use hrdesk_client::time;

/// Logs the elapsed time of the surrounding scope when dropped.
///
/// Construction returns `None` when the target level is filtered out, so a
/// disabled timer never reads the clock.
pub struct LogScopeDuration<'a> {
    module_path: &'a str,
    scope_name: &'a str,
    level: log::Level,
    min_micros_to_log: u64,
    start_ts_micros: u64,
}

impl<'a> LogScopeDuration<'a> {
    /// Start a timer for the calling scope.
    ///
    /// Pass `module_path!()` as `module_path` so the log row is attributed to
    /// the caller. Durations below `min_micros_to_log` are not logged.
    pub fn new(
        level: log::Level,
        module_path: &'a str,
        scope_name: &'a str,
        min_micros_to_log: u64,
    ) -> Option<Self> {
        if !log::log_enabled!(target: module_path, level) {
            return None;
        }
        Some(Self {
            module_path,
            scope_name,
            level,
            min_micros_to_log,
            start_ts_micros: time::get_timestamp_micros(),
        })
    }
}

impl Drop for LogScopeDuration<'_> {
    fn drop(&mut self) {
        let duration_micros = time::get_timestamp_micros() - self.start_ts_micros;
        if duration_micros >= self.min_micros_to_log {
            log::log!(
                target: self.module_path,
                self.level,
                "'{}' took {duration_micros} µs.",
                self.scope_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Initialize logging.
    pub fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    #[test]
    fn timer_logs_at_enabled_level() {
        init_logger();
        let timer =
            LogScopeDuration::new(log::Level::Debug, module_path!(), "enabled_level", 0);
        assert!(timer.is_some());
    }

    #[test]
    fn filtered_level_yields_no_timer() {
        init_logger();
        let timer =
            LogScopeDuration::new(log::Level::Trace, module_path!(), "filtered_level", 0);
        assert!(timer.is_none());
    }
}

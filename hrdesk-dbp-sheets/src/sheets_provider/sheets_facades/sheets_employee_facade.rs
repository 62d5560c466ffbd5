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

//! Google Sheets implementation of [EmployeeFacade].

use super::SheetsProvider;
use hrdesk_client::time;
use hrdesk_dbp::bot::BotError;
use hrdesk_dbp::bot::EmployeeGist;
use hrdesk_dbp::dbp::facades::EmployeeFacade;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Interval between directory sheet reloads.
const DIRECTORY_REFRESH_INTERVAL_MICROS: u64 = 300_000_000;

/** Google Sheets implementation of [EmployeeFacade].

The directory sheet holds one row per employee: Telegram user identifier,
display name and department. Rows are cached in memory and reloaded at most
every five minutes, so directory edits show up without a restart while lookups
stay cheap.
*/
pub struct SheetsEmployeeFacade {
    sheets_provider: Arc<SheetsProvider>,
}

impl SheetsEmployeeFacade {
    /// Return a new instance.
    pub fn new(sheets_provider: &Arc<SheetsProvider>) -> Self {
        Self {
            sheets_provider: Arc::clone(sheets_provider),
        }
    }

    /// Reload the directory cache when it has never been loaded or has gone
    /// stale.
    async fn refresh_if_stale(&self) -> Result<(), BotError> {
        let provider = &self.sheets_provider;
        let now_micros = time::get_timestamp_micros();
        let refreshed = provider.employees_refreshed_ts_micros.load(Ordering::Relaxed);
        if refreshed != 0 && now_micros.saturating_sub(refreshed) < DIRECTORY_REFRESH_INTERVAL_MICROS
        {
            return Ok(());
        }
        let range = format!("{}!A2:C", provider.sheet_names.directory);
        let rows = provider.session.values_get(&range).await?;
        let mut loaded_user_ids = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(employee) = Self::employee_from_row(row) else {
                log::warn!("Skipping unparsable employee directory row: {row:?}");
                continue;
            };
            loaded_user_ids.push(employee.get_user_id());
            provider.employees.insert(employee.get_user_id(), employee);
        }
        // Drop employees that were removed from the sheet.
        for entry in provider.employees.iter() {
            if !loaded_user_ids.contains(entry.key()) {
                entry.remove();
            }
        }
        provider
            .employees_refreshed_ts_micros
            .store(now_micros, Ordering::Relaxed);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Reloaded {} employee directory rows.", rows.len());
        }
        Ok(())
    }

    /// Parse a `user_id, display_name, department` row.
    fn employee_from_row(row: &[String]) -> Option<EmployeeGist> {
        let user_id = row.first()?.parse::<i64>().ok()?;
        let display_name = row.get(1)?;
        let department = row.get(2).map(String::as_str).unwrap_or_default();
        Some(EmployeeGist::new(user_id, display_name, department))
    }
}

#[async_trait::async_trait]
impl EmployeeFacade for SheetsEmployeeFacade {
    async fn employee_by_user_id(&self, user_id: i64) -> Result<Option<EmployeeGist>, BotError> {
        self.refresh_if_stale().await?;
        Ok(self
            .sheets_provider
            .employees
            .get(&user_id)
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directory_row() {
        let row = [
            "2002".to_owned(),
            "Anna Ardor".to_owned(),
            "Engineering".to_owned(),
        ];
        let employee = SheetsEmployeeFacade::employee_from_row(&row).unwrap();
        assert_eq!(employee.get_user_id(), 2002);
        assert_eq!(employee.get_display_name(), "Anna Ardor");
        assert_eq!(employee.get_department(), "Engineering");
    }

    #[test]
    fn directory_row_without_department_is_accepted() {
        let row = ["2002".to_owned(), "Anna Ardor".to_owned()];
        assert!(SheetsEmployeeFacade::employee_from_row(&row).is_some());
    }

    #[test]
    fn unparsable_directory_row_is_rejected() {
        let row = ["not a number".to_owned(), "Anna Ardor".to_owned()];
        assert!(SheetsEmployeeFacade::employee_from_row(&row).is_none());
    }
}

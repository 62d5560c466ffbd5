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

//! Employee directory entries.

/// The parts of an employee directory row the bot core needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeGist {
    user_id: i64,
    display_name: String,
    department: String,
}

impl EmployeeGist {
    /// Return a new instance.
    pub fn new(user_id: i64, display_name: &str, department: &str) -> Self {
        Self {
            user_id,
            display_name: display_name.to_owned(),
            department: department.to_owned(),
        }
    }

    /// Telegram user identifier.
    pub fn get_user_id(&self) -> i64 {
        self.user_id
    }

    /// Display name as entered in the directory sheet.
    pub fn get_display_name(&self) -> &str {
        &self.display_name
    }

    /// Department name as entered in the directory sheet.
    pub fn get_department(&self) -> &str {
        &self.department
    }
}

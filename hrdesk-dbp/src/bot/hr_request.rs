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

//! HR request log entries.

/// Type of HR request an employee can file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HrRequestKind {
    /// Vacation / paid leave.
    Vacation,
    /// Working remotely.
    Remote,
    /// Arriving late.
    Late,
    /// Sick leave.
    Sick,
}

impl HrRequestKind {
    /// Parse a `/command` token (without the leading slash).
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "vacation" => Some(Self::Vacation),
            "remote" => Some(Self::Remote),
            "late" => Some(Self::Late),
            "sick" => Some(Self::Sick),
            _ => None,
        }
    }

    /// Stable identifier used in log rows and callback payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Remote => "remote",
            Self::Late => "late",
            Self::Sick => "sick",
        }
    }
}

impl std::fmt::Display for HrRequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/** One row in the HR request log.

The row layout (column order) is owned by the store providers. This type only
carries the values.
*/
#[derive(Clone, Debug)]
pub struct HrRequest {
    kind: HrRequestKind,
    user_id: i64,
    chat_id: i64,
    employee_name: String,
    detail: String,
    request_ts_micros: u64,
}

impl HrRequest {
    /// Return a new instance.
    pub fn new(
        kind: HrRequestKind,
        user_id: i64,
        chat_id: i64,
        employee_name: &str,
        detail: &str,
        request_ts_micros: u64,
    ) -> Self {
        Self {
            kind,
            user_id,
            chat_id,
            employee_name: employee_name.to_owned(),
            detail: detail.to_owned(),
            request_ts_micros,
        }
    }

    /// Type of request.
    pub fn get_kind(&self) -> HrRequestKind {
        self.kind
    }

    /// Telegram user identifier of the requester.
    pub fn get_user_id(&self) -> i64 {
        self.user_id
    }

    /// Chat the request arrived from.
    pub fn get_chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Display name from the employee directory.
    pub fn get_employee_name(&self) -> &str {
        &self.employee_name
    }

    /// Free-text detail (dates, reason) as typed by the employee.
    pub fn get_detail(&self) -> &str {
        &self.detail
    }

    /// Time the request was filed in epoch micros.
    pub fn get_request_ts_micros(&self) -> u64 {
        self.request_ts_micros
    }
}

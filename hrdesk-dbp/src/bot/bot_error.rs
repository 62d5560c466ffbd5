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

//! HR bot errors.

use std::error::Error;
use std::fmt;

/// Cause of error.
#[derive(Debug)]
pub enum BotErrorKind {
    /// General failure. See message for details.
    Unspecified,
    /// Inbound update payload could not be parsed.
    MalformedUpdate,
    /// A backing store could not be read or written.
    StoreUnavailable,
    /// Outbound messaging API call failed.
    MessagingFailure,
    /// Presentation content (menu/copy file) could not be loaded.
    ContentError,
}

impl BotErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> BotError {
        BotError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
        }
    }

    /// Create a new instance without an error message.
    pub fn error(self) -> BotError {
        BotError {
            kind: self,
            msg: None,
        }
    }
}

impl fmt::Display for BotErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** HR bot error.

Create a new instance via [BotErrorKind].
*/
#[derive(Debug)]
pub struct BotError {
    kind: BotErrorKind,
    msg: Option<String>,
}

impl BotError {
    /// Return the type of error.
    pub fn kind(&self) -> &BotErrorKind {
        &self.kind
    }
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<BotError> for BotError {
    fn as_ref(&self) -> &BotError {
        self
    }
}

impl Error for BotError {}

// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Resource identifier '{id}' is not a valid integer: {source}")]
    InvalidId { id: String, source: ParseIntError },

    #[error("Required attribute '{0}' is not set")]
    MissingAttribute(String),

    #[error("Attribute '{name}' has unexpected type, expected {expected}")]
    AttributeType { name: String, expected: String },

    #[error("Attribute '{name}' is not valid: {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error("{kind} '{id}' does not exist")]
    NotFound { kind: EntityKind, id: String },

    #[error("Looker API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    DeserializationError(#[from] DeserializationError),

    #[error("Unknown resource type '{0}'")]
    UnknownResourceType(String),

    #[error("Invalid provider configuration: {0}")]
    ConfigurationError(String),
}

impl Error {
    /// Whether the remote entity backing a resource no longer exists.
    ///
    /// The orchestrator can use this to plan a recreation instead of
    /// reporting a hard failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn invalid_id(id: &str, source: ParseIntError) -> Self {
        Error::InvalidId {
            id: id.to_string(),
            source,
        }
    }
}

/// The kind of remote entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    PermissionSet,
    Theme,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::PermissionSet => "Permission set",
            Self::Theme => "Theme",
        };
        write!(f, "{label}")
    }
}

/// An error that can be returned when deserializing data.
#[derive(Debug, Error)]
#[error("Cannot deserialize string '{string}': {source}")]
pub struct DeserializationError {
    pub string: String,
    pub source: DeserializationErrorKind,
}

/// Additional information for [`DeserializationError`] error
#[derive(Debug, Error)]
pub enum DeserializationErrorKind {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = Error::NotFound {
            kind: EntityKind::Theme,
            id: "7".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Theme '7' does not exist");

        let err = Error::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_id_message() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = Error::invalid_id("abc", source);
        assert!(err
            .to_string()
            .starts_with("Resource identifier 'abc' is not a valid integer"));
    }
}

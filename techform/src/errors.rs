//! Error types for techform.
//!
//! Two families live here. [`FieldError`] is validation data: it is attached
//! to a field path and shown next to an input, and never travels as the `Err`
//! side of a library call. [`FormError`] covers infrastructure failures such
//! as unreadable configuration or serialization problems.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// The main error type for techform operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// The configuration is unusable.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised when a schema configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The knowledge bounds are inverted.
    #[error("knowledge_min ({min}) must not exceed knowledge_max ({max})")]
    InvertedBounds {
        /// Configured lower bound.
        min: i64,
        /// Configured upper bound.
        max: i64,
    },

    /// The accepted email domain is empty or malformed.
    #[error("email domain '{0}' is not usable")]
    InvalidEmailDomain(String),

    /// The logging level directive could not be parsed.
    #[error("invalid log directive '{0}'")]
    InvalidLogLevel(String),
}

/// The kind of check a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required value is blank.
    EmptyField,
    /// The value is not syntactically valid (e.g. malformed email).
    InvalidFormat,
    /// The email address is outside the accepted domain.
    DomainNotAllowed,
    /// The value has fewer characters than required.
    TooShort,
    /// A list that must hold at least one row is empty.
    EmptyList,
    /// A number is below the lower bound.
    BelowMinimum,
    /// A number is above the upper bound.
    AboveMaximum,
    /// The text does not coerce to a finite number.
    NotANumber,
    /// The number has a fractional part.
    NotAnInteger,
}

impl FieldErrorKind {
    /// Returns the stable machine code for this kind.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyField => codes::EMPTY_FIELD,
            Self::InvalidFormat => codes::INVALID_FORMAT,
            Self::DomainNotAllowed => codes::DOMAIN_NOT_ALLOWED,
            Self::TooShort => codes::TOO_SHORT,
            Self::EmptyList => codes::EMPTY_LIST,
            Self::BelowMinimum => codes::BELOW_MINIMUM,
            Self::AboveMaximum => codes::ABOVE_MAXIMUM,
            Self::NotANumber => codes::NOT_A_NUMBER,
            Self::NotAnInteger => codes::NOT_AN_INTEGER,
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField => write!(f, "empty_field"),
            Self::InvalidFormat => write!(f, "invalid_format"),
            Self::DomainNotAllowed => write!(f, "domain_not_allowed"),
            Self::TooShort => write!(f, "too_short"),
            Self::EmptyList => write!(f, "empty_list"),
            Self::BelowMinimum => write!(f, "below_minimum"),
            Self::AboveMaximum => write!(f, "above_maximum"),
            Self::NotANumber => write!(f, "not_a_number"),
            Self::NotAnInteger => write!(f, "not_an_integer"),
        }
    }
}

/// A single field-level validation failure with its user-facing message.
///
/// Serializes as `{"code", "kind", "message"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// What went wrong.
    pub kind: FieldErrorKind,
    /// The text displayed next to the input.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the stable machine code of the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Serialize the error for logging or API responses.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "kind": self.kind,
            "message": self.message,
        })
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Stable field error codes.
pub mod codes {
    /// Blank required value.
    pub const EMPTY_FIELD: &str = "FORM-001-EMPTY";
    /// Malformed value.
    pub const INVALID_FORMAT: &str = "FORM-002-FORMAT";
    /// Email domain refused.
    pub const DOMAIN_NOT_ALLOWED: &str = "FORM-003-DOMAIN";
    /// Too few characters.
    pub const TOO_SHORT: &str = "FORM-004-LENGTH";
    /// Empty row list.
    pub const EMPTY_LIST: &str = "FORM-005-EMPTY_LIST";
    /// Number under the lower bound.
    pub const BELOW_MINIMUM: &str = "FORM-006-MIN";
    /// Number over the upper bound.
    pub const ABOVE_MAXIMUM: &str = "FORM-006-MAX";
    /// Text that is not a number.
    pub const NOT_A_NUMBER: &str = "FORM-007-NAN";
    /// Number with a fractional part.
    pub const NOT_AN_INTEGER: &str = "FORM-007-INTEGER";
}

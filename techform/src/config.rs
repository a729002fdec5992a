//! Configuration types for the form schema and logging.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ConfigError, FormError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Validation rules and messages.
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FormConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON document. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks the values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schema.validate()?;
        self.logging.validate()
    }
}

/// Rules applied by the user schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// The only accepted email domain, without the `@`.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    /// Minimum password length in characters.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Lowest accepted knowledge level.
    #[serde(default = "default_knowledge_min")]
    pub knowledge_min: i64,
    /// Highest accepted knowledge level.
    #[serde(default = "default_knowledge_max")]
    pub knowledge_max: i64,
    /// User-facing messages.
    #[serde(default)]
    pub messages: Messages,
}

fn default_email_domain() -> String {
    "gmail.com".to_string()
}

fn default_min_password_len() -> usize {
    6
}

fn default_knowledge_min() -> i64 {
    1
}

fn default_knowledge_max() -> i64 {
    10
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            min_password_len: default_min_password_len(),
            knowledge_min: default_knowledge_min(),
            knowledge_max: default_knowledge_max(),
            messages: Messages::default(),
        }
    }
}

impl SchemaConfig {
    /// Creates a schema configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted email domain.
    #[must_use]
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    /// Sets the minimum password length.
    #[must_use]
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Sets the knowledge bounds.
    #[must_use]
    pub fn with_knowledge_range(mut self, min: i64, max: i64) -> Self {
        self.knowledge_min = min;
        self.knowledge_max = max;
        self
    }

    /// Replaces the messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Returns the suffix an accepted address must end with.
    #[must_use]
    pub fn email_suffix(&self) -> String {
        format!("@{}", self.email_domain)
    }

    /// Rejects inverted bounds and unusable domains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knowledge_min > self.knowledge_max {
            return Err(ConfigError::InvertedBounds {
                min: self.knowledge_min,
                max: self.knowledge_max,
            });
        }
        let domain = &self.email_domain;
        if domain.is_empty() || domain.contains('@') || domain.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidEmailDomain(domain.clone()));
        }
        Ok(())
    }
}

/// Messages shown next to invalid inputs.
///
/// `{min}` and `{max}` placeholders are replaced with the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Blank required field.
    pub required: String,
    /// Malformed email address.
    pub invalid_email: String,
    /// Email outside the accepted domain.
    pub domain_not_allowed: String,
    /// Password too short.
    pub too_short: String,
    /// No technology rows.
    pub empty_list: String,
    /// Knowledge below the lower bound.
    pub below_minimum: String,
    /// Knowledge above the upper bound.
    pub above_maximum: String,
    /// Knowledge that is not a number.
    pub not_a_number: String,
    /// Knowledge with a fractional part.
    pub not_an_integer: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "Campo obrigatório".to_string(),
            invalid_email: "Formato inválido".to_string(),
            domain_not_allowed: "Informe um e-mail da Google".to_string(),
            too_short: "No mínimo {min} caractéres".to_string(),
            empty_list: "Deve existir uma tecnologia".to_string(),
            below_minimum: "Mínimo {min}".to_string(),
            above_maximum: "Máximo {max}".to_string(),
            not_a_number: "Informe um número".to_string(),
            not_an_integer: "Informe um número inteiro".to_string(),
        }
    }
}

impl Messages {
    /// Substitutes `{min}` and `{max}` in a template.
    #[must_use]
    pub fn render(template: &str, min: impl ToString, max: impl ToString) -> String {
        template
            .replace("{min}", &min.to_string())
            .replace("{max}", &max.to_string())
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Sets the filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Switches JSON output on or off.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Checks that the level parses as a filter directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| ConfigError::InvalidLogLevel(self.level.clone()))
    }
}

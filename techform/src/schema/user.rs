//! The "create user" schema: raw input, normalized output, validation.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::path::FieldPath;
use super::report::ValidationErrors;
use super::rules::{self, FieldPipeline};
use crate::config::{Messages, SchemaConfig};
use crate::errors::{ConfigError, FieldError, FieldErrorKind};
use crate::observability::SpanTimer;

/// Field names used in error paths.
pub mod fields {
    /// The user's full name.
    pub const NAME: &str = "name";
    /// The user's email address.
    pub const EMAIL: &str = "email";
    /// The user's password.
    pub const PASSWORD: &str = "password";
    /// The technology rows.
    pub const TECHS: &str = "techs";
    /// A technology's title.
    pub const TITLE: &str = "title";
    /// A technology's knowledge level.
    pub const KNOWLEDGE: &str = "knowledge";
}

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFormInput {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Technology rows in display order.
    pub techs: Vec<TechEntryInput>,
}

/// One raw technology row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechEntryInput {
    /// Technology name.
    pub title: String,
    /// Proficiency as typed; a JSON number is accepted too.
    #[serde(deserialize_with = "deserialize_textual")]
    pub knowledge: String,
}

impl TechEntryInput {
    /// Creates a row from a title and anything printable as the knowledge.
    #[must_use]
    pub fn new(title: impl Into<String>, knowledge: impl fmt::Display) -> Self {
        Self {
            title: title.into(),
            knowledge: knowledge.to_string(),
        }
    }
}

fn deserialize_textual<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a number or a string, got {other}"
        ))),
    }
}

/// A validated and normalized user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUser {
    /// Trimmed name with every word capitalized.
    pub name: String,
    /// Email address, unchanged.
    pub email: String,
    /// Password, unchanged.
    pub password: String,
    /// Technologies in input order.
    pub techs: Vec<Tech>,
}

/// A validated technology row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tech {
    /// Technology name.
    pub title: String,
    /// Proficiency within the configured bounds.
    pub knowledge: i64,
}

/// Outcome of validating a [`UserFormInput`].
pub type ValidationResult = Result<NormalizedUser, ValidationErrors>;

static DEFAULT_SCHEMA: LazyLock<UserSchema> = LazyLock::new(UserSchema::default);

/// Validates with the default rules.
pub fn validate(input: &UserFormInput) -> ValidationResult {
    DEFAULT_SCHEMA.validate(input)
}

/// Compiled validation rules for the user form.
#[derive(Debug)]
pub struct UserSchema {
    config: SchemaConfig,
    name: FieldPipeline<String>,
    email: FieldPipeline<String>,
    password: FieldPipeline<String>,
    title: FieldPipeline<String>,
    knowledge: FieldPipeline<f64>,
}

impl Default for UserSchema {
    fn default() -> Self {
        Self::build(SchemaConfig::default())
    }
}

impl UserSchema {
    /// Compiles a schema after checking the configuration.
    pub fn from_config(config: SchemaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SchemaConfig) -> Self {
        let messages = &config.messages;
        let required = FieldError::new(FieldErrorKind::EmptyField, &messages.required);

        let name = FieldPipeline::new()
            .check(|v: &String| !rules::is_blank(v), required.clone())
            .transform(|v| rules::capitalize_words(&v));

        let suffix = config.email_suffix();
        let email = FieldPipeline::new()
            .check(|v: &String| !rules::is_blank(v), required.clone())
            .check(
                |v: &String| rules::is_email(v),
                FieldError::new(FieldErrorKind::InvalidFormat, &messages.invalid_email),
            )
            .check(
                move |v: &String| v.ends_with(&suffix),
                FieldError::new(FieldErrorKind::DomainNotAllowed, &messages.domain_not_allowed),
            );

        let min_len = config.min_password_len;
        let password = FieldPipeline::new().check(
            move |v: &String| rules::char_len(v) >= min_len,
            FieldError::new(
                FieldErrorKind::TooShort,
                Messages::render(&messages.too_short, min_len, min_len),
            ),
        );

        let title = FieldPipeline::new().check(|v: &String| !rules::is_blank(v), required);

        let (min, max) = (config.knowledge_min, config.knowledge_max);
        let not_an_integer = messages.not_an_integer.clone();
        #[allow(clippy::cast_precision_loss)]
        let knowledge = FieldPipeline::new()
            .check(
                move |v: &f64| *v >= min as f64,
                FieldError::new(
                    FieldErrorKind::BelowMinimum,
                    Messages::render(&messages.below_minimum, min, max),
                ),
            )
            .check(
                move |v: &f64| *v <= max as f64,
                FieldError::new(
                    FieldErrorKind::AboveMaximum,
                    Messages::render(&messages.above_maximum, min, max),
                ),
            )
            .refine(move |v| rules::whole_number(v, &not_an_integer));

        Self {
            config,
            name,
            email,
            password,
            title,
            knowledge,
        }
    }

    /// Returns the configuration the schema was compiled from.
    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validates every field and returns either the normalized user or all
    /// field errors together.
    pub fn validate(&self, input: &UserFormInput) -> ValidationResult {
        let timer = SpanTimer::start("validate");
        let mut errors = ValidationErrors::new();

        let name = errors.record(FieldPath::root(fields::NAME), self.name.run(input.name.clone()));
        let email = errors.record(
            FieldPath::root(fields::EMAIL),
            self.email.run(input.email.clone()),
        );
        let password = errors.record(
            FieldPath::root(fields::PASSWORD),
            self.password.run(input.password.clone()),
        );
        let techs = self.validate_techs(&input.techs, &mut errors);

        let duration_ms = timer.finish();
        match (name, email, password, techs) {
            (Some(name), Some(email), Some(password), Some(techs)) if errors.is_empty() => {
                tracing::debug!(duration_ms, tech_count = techs.len(), "User form input is valid");
                Ok(NormalizedUser {
                    name,
                    email,
                    password,
                    techs,
                })
            }
            _ => {
                tracing::debug!(
                    duration_ms,
                    error_count = errors.len(),
                    errors = %errors,
                    "User form input rejected"
                );
                Err(errors)
            }
        }
    }

    /// Validates one technology row at position `index`.
    pub fn validate_tech(
        &self,
        index: usize,
        entry: &TechEntryInput,
        errors: &mut ValidationErrors,
    ) -> Option<Tech> {
        let row = FieldPath::root(fields::TECHS).index(index);
        let title = errors.record(row.clone().key(fields::TITLE), self.title.run(entry.title.clone()));
        let knowledge = errors.record(
            row.key(fields::KNOWLEDGE),
            self.coerce_knowledge(&entry.knowledge),
        );
        Some(Tech {
            title: title?,
            knowledge: knowledge?,
        })
    }

    fn validate_techs(
        &self,
        entries: &[TechEntryInput],
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Tech>> {
        if entries.is_empty() {
            errors.insert(
                FieldPath::root(fields::TECHS),
                FieldError::new(FieldErrorKind::EmptyList, &self.config.messages.empty_list),
            );
            return None;
        }

        // Every row is checked even after a failure so all rows report.
        let techs: Vec<Option<Tech>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.validate_tech(index, entry, errors))
            .collect();
        techs.into_iter().collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn coerce_knowledge(&self, raw: &str) -> Result<i64, FieldError> {
        let number = rules::coerce_number(raw).ok_or_else(|| {
            FieldError::new(FieldErrorKind::NotANumber, &self.config.messages.not_a_number)
        })?;
        // Whole and within i64-representable bounds once the pipeline passes.
        self.knowledge.run(number).map(|n| n as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn john() -> UserFormInput {
        UserFormInput {
            name: "john".to_string(),
            email: "john@gmail.com".to_string(),
            password: "123456".to_string(),
            techs: vec![TechEntryInput::new("Go", 5)],
        }
    }

    #[test]
    fn test_valid_input_normalizes() {
        let user = validate(&john()).unwrap();
        assert_eq!(
            user,
            NormalizedUser {
                name: "John".to_string(),
                email: "john@gmail.com".to_string(),
                password: "123456".to_string(),
                techs: vec![Tech {
                    title: "Go".to_string(),
                    knowledge: 5
                }],
            }
        );
    }

    #[test]
    fn test_name_is_trimmed_and_capitalized() {
        let input = UserFormInput {
            name: "  ana maria ".to_string(),
            ..john()
        };
        assert_eq!(validate(&input).unwrap().name, "Ana Maria");
    }

    #[test]
    fn test_blank_name_is_required() {
        for name in ["", "   "] {
            let input = UserFormInput {
                name: name.to_string(),
                ..john()
            };
            let errors = validate(&input).unwrap_err();
            assert_eq!(errors.kind("name"), Some(FieldErrorKind::EmptyField));
            assert_eq!(errors.message("name"), Some("Campo obrigatório"));
        }
    }

    #[test]
    fn test_email_checks_in_order() {
        let cases = [
            ("", FieldErrorKind::EmptyField, "Campo obrigatório"),
            ("john", FieldErrorKind::InvalidFormat, "Formato inválido"),
            ("john@yahoo.com", FieldErrorKind::DomainNotAllowed, "Informe um e-mail da Google"),
            ("john@GMAIL.com", FieldErrorKind::DomainNotAllowed, "Informe um e-mail da Google"),
            ("john@mygmail.com", FieldErrorKind::DomainNotAllowed, "Informe um e-mail da Google"),
        ];
        for (email, kind, message) in cases {
            let input = UserFormInput {
                email: email.to_string(),
                ..john()
            };
            let errors = validate(&input).unwrap_err();
            assert_eq!(errors.kind("email"), Some(kind), "email {email:?}");
            assert_eq!(errors.message("email"), Some(message));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_password_length_counts_characters() {
        let short = UserFormInput {
            password: "12345".to_string(),
            ..john()
        };
        let errors = validate(&short).unwrap_err();
        assert_eq!(errors.kind("password"), Some(FieldErrorKind::TooShort));
        assert_eq!(errors.message("password"), Some("No mínimo 6 caractéres"));

        let accented = UserFormInput {
            password: "sençã".to_string(),
            ..john()
        };
        assert!(validate(&accented).is_err());

        let exact = UserFormInput {
            password: "açãooo".to_string(),
            ..john()
        };
        assert!(validate(&exact).is_ok());
    }

    #[test]
    fn test_empty_techs_is_list_error() {
        let input = UserFormInput {
            techs: Vec::new(),
            ..john()
        };
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.kind("techs"), Some(FieldErrorKind::EmptyList));
        assert_eq!(errors.message("techs"), Some("Deve existir uma tecnologia"));
    }

    #[test]
    fn test_knowledge_bounds() {
        let cases = [
            ("0", Some(FieldErrorKind::BelowMinimum)),
            ("", Some(FieldErrorKind::BelowMinimum)),
            ("1", None),
            ("10", None),
            ("11", Some(FieldErrorKind::AboveMaximum)),
            ("abc", Some(FieldErrorKind::NotANumber)),
            ("2.5", Some(FieldErrorKind::NotAnInteger)),
            (" 7 ", None),
            ("0x8", None),
            ("0x10", Some(FieldErrorKind::AboveMaximum)),
            ("Infinity", Some(FieldErrorKind::AboveMaximum)),
            ("-Infinity", Some(FieldErrorKind::BelowMinimum)),
            ("NaN", Some(FieldErrorKind::NotANumber)),
        ];
        for (raw, expected) in cases {
            let input = UserFormInput {
                techs: vec![TechEntryInput::new("Go", raw)],
                ..john()
            };
            let kind = validate(&input).err().and_then(|e| e.kind("techs.0.knowledge"));
            assert_eq!(kind, expected, "knowledge {raw:?}");
        }
    }

    #[test]
    fn test_above_maximum_message() {
        let input = UserFormInput {
            techs: vec![TechEntryInput::new("Go", 11)],
            ..john()
        };
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.message("techs.0.knowledge"), Some("Máximo 10"));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let input = UserFormInput {
            name: String::new(),
            email: "john@yahoo.com".to_string(),
            password: "1".to_string(),
            techs: vec![
                TechEntryInput::new("Go", 5),
                TechEntryInput::new("", 0),
                TechEntryInput::new("Rust", 11),
            ],
        };
        let errors = validate(&input).unwrap_err();
        let paths: Vec<String> = errors.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "email",
                "password",
                "techs.1.title",
                "techs.1.knowledge",
                "techs.2.knowledge",
            ]
        );
    }

    #[test]
    fn test_blank_email_is_required() {
        for email in ["", "   "] {
            let input = UserFormInput {
                email: email.to_string(),
                ..john()
            };
            let errors = validate(&input).unwrap_err();
            assert_eq!(errors.kind("email"), Some(FieldErrorKind::EmptyField), "email {email:?}");
        }
    }

    #[test]
    fn test_blank_title_is_required() {
        let input = UserFormInput {
            techs: vec![TechEntryInput::new(" ", 3)],
            ..john()
        };
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.kind("techs.0.title"), Some(FieldErrorKind::EmptyField));
    }

    #[test]
    fn test_custom_config() {
        let config = SchemaConfig::new()
            .with_email_domain("example.com")
            .with_min_password_len(2)
            .with_knowledge_range(0, 3);
        let schema = UserSchema::from_config(config).unwrap();

        let input = UserFormInput {
            email: "john@example.com".to_string(),
            password: "ab".to_string(),
            techs: vec![TechEntryInput::new("Go", 0)],
            ..john()
        };
        assert!(schema.validate(&input).is_ok());

        let too_high = UserFormInput {
            techs: vec![TechEntryInput::new("Go", 4)],
            ..input
        };
        let errors = schema.validate(&too_high).unwrap_err();
        assert_eq!(errors.message("techs.0.knowledge"), Some("Máximo 3"));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = SchemaConfig::new().with_knowledge_range(5, 1);
        assert!(matches!(
            UserSchema::from_config(config),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_input_deserializes_numbers_and_strings() {
        let input: UserFormInput = serde_json::from_str(
            r#"{"name":"john","techs":[{"title":"Go","knowledge":5},{"title":"Rust","knowledge":"7"}]}"#,
        )
        .unwrap();
        assert_eq!(input.techs[0].knowledge, "5");
        assert_eq!(input.techs[1].knowledge, "7");
        assert_eq!(input.email, "");

        let bad = serde_json::from_str::<UserFormInput>(r#"{"techs":[{"knowledge":true}]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_normalized_user_field_order() {
        let json = serde_json::to_string(&validate(&john()).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"John","email":"john@gmail.com","password":"123456","techs":[{"title":"Go","knowledge":5}]}"#
        );
    }
}

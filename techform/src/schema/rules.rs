//! Composable per-field check pipelines.
//!
//! A [`FieldPipeline`] is an ordered list of stages. Each stage either passes
//! the (possibly transformed) value on or fails with a [`FieldError`]; the
//! first failure ends the pipeline. Pipelines for different fields are run
//! independently, so every field reports its own error.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::{FieldError, FieldErrorKind};

type Stage<T> = Box<dyn Fn(T) -> Result<T, FieldError> + Send + Sync>;

/// Ordered checks and transforms applied to a single field value.
pub struct FieldPipeline<T> {
    stages: Vec<Stage<T>>,
}

impl<T: 'static> FieldPipeline<T> {
    /// Creates an empty pipeline that accepts every value.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Adds a predicate; values for which it returns false fail with `error`.
    #[must_use]
    pub fn check<F>(mut self, predicate: F, error: FieldError) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.stages.push(Box::new(move |value| {
            if predicate(&value) {
                Ok(value)
            } else {
                Err(error.clone())
            }
        }));
        self
    }

    /// Adds an infallible transform.
    #[must_use]
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.stages.push(Box::new(move |value| Ok(f(value))));
        self
    }

    /// Adds a stage that may both transform and fail.
    #[must_use]
    pub fn refine<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> Result<T, FieldError> + Send + Sync + 'static,
    {
        self.stages.push(Box::new(f));
        self
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs the stages in order and stops at the first failure.
    pub fn run(&self, value: T) -> Result<T, FieldError> {
        self.stages.iter().try_fold(value, |value, stage| stage(value))
    }
}

impl<T: 'static> Default for FieldPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern is a valid literal")
});

/// Returns true if the value is empty or whitespace only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Syntactic email check.
///
/// Rejects a leading dot and consecutive dots, which the pattern itself
/// cannot express without look-around.
#[must_use]
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

/// Returns the number of characters (not bytes) in the value.
#[must_use]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Trims the value and upper-cases the first character of every
/// space-separated word, keeping the rest of each word verbatim.
///
/// Splits on single spaces only, so runs of spaces survive as empty words.
#[must_use]
pub fn capitalize_words(value: &str) -> String {
    value
        .trim()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Coerces the textual form of a number.
///
/// Surrounding whitespace is ignored and empty text is zero. Besides decimal
/// and exponent forms, unsigned `0x`, `0o` and `0b` literals and a signed
/// `Infinity` are accepted. Returns `None` for anything else, including
/// `NaN` and the lowercase `inf` spellings.
#[must_use]
pub fn coerce_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    if let Some(radix) = radix_of(text) {
        return radix_literal(&text[2..], radix);
    }

    text.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn radix_of(text: &str) -> Option<u32> {
    let prefix = text.get(..2)?;
    match prefix.to_ascii_lowercase().as_str() {
        "0x" => Some(16),
        "0o" => Some(8),
        "0b" => Some(2),
        _ => None,
    }
}

fn radix_literal(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
}

/// Fails unless the value is a whole number.
pub fn whole_number(value: f64, message: &str) -> Result<f64, FieldError> {
    if value.fract() == 0.0 {
        Ok(value)
    } else {
        Err(FieldError::new(FieldErrorKind::NotAnInteger, message))
    }
}

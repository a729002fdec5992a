//! Test assertions for validation results.

use crate::errors::FieldErrorKind;
use crate::schema::{FieldPath, NormalizedUser, ValidationResult};

/// Asserts that validation passed and returns the normalized user.
pub fn assert_valid(result: &ValidationResult) -> &NormalizedUser {
    match result {
        Ok(user) => user,
        Err(errors) => panic!("Expected valid input, got errors: {errors}"),
    }
}

/// Asserts that validation failed with `kind` at `path`.
pub fn assert_has_error(result: &ValidationResult, path: &str, kind: FieldErrorKind) {
    let Err(errors) = result else {
        panic!("Expected errors at '{path}', but validation passed");
    };
    assert_eq!(
        errors.kind(FieldPath::from(path)),
        Some(kind),
        "Expected {kind} at '{path}', got: {errors}"
    );
}

/// Asserts that validation failed on exactly the given paths, in order.
pub fn assert_error_paths(result: &ValidationResult, expected: &[&str]) {
    let Err(errors) = result else {
        panic!("Expected errors at {expected:?}, but validation passed");
    };
    let actual: Vec<String> = errors.iter().map(|(path, _)| path.to_string()).collect();
    assert_eq!(actual, expected, "Unexpected failing paths");
}

//! Testing utilities for techform.
//!
//! This module provides:
//! - Input builders that start from a valid record
//! - Assertions over validation results

mod assertions;
mod fixtures;

pub use assertions::{assert_error_paths, assert_has_error, assert_valid};
pub use fixtures::{valid_input, InputBuilder};

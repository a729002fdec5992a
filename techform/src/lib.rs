//! # Techform
//!
//! Validation and row editing for a "create user" form that collects a
//! name, an email, a password and a list of technologies with a
//! proficiency level.
//!
//! Techform provides:
//!
//! - **Schema validation**: a pure function from raw input to either a
//!   normalized user or one message per failing field path
//! - **Dynamic rows**: an ordered list whose rows keep a stable rendering key
//!   while their positions shift
//! - **Form orchestration**: submit handling, error display lookup and
//!   re-validation after the first submit
//!
//! ## Quick Start
//!
//! ```rust
//! use techform::prelude::*;
//!
//! let mut form = UserForm::default();
//! form.set_name("  ana maria ");
//! form.set_email("ana@gmail.com");
//! form.set_password("123456");
//! form.add_tech();
//! form.set_tech_title(0, "Go");
//!
//! let mut output = String::new();
//! let outcome = form.submit(|user| output = render_output(user).unwrap_or_default());
//! assert!(outcome.is_accepted());
//! assert!(output.contains("\"Ana Maria\""));
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod events;
pub mod form;
pub mod list;
pub mod observability;
pub mod schema;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{FormConfig, LoggingConfig, Messages, SchemaConfig};
    pub use crate::errors::{ConfigError, FieldError, FieldErrorKind, FormError};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, RecordedEvent,
    };
    pub use crate::form::{render_errors, render_output, FormState, SubmitOutcome, UserForm};
    pub use crate::list::{FieldArray, Row, RowKey};
    pub use crate::observability::init_tracing;
    pub use crate::schema::{
        validate, FieldPath, NormalizedUser, Tech, TechEntryInput, UserFormInput, UserSchema,
        ValidationErrors, ValidationResult,
    };
}

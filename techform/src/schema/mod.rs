//! Schema validation for the user form.
//!
//! [`validate`] turns a raw [`UserFormInput`] into either a
//! [`NormalizedUser`] or a [`ValidationErrors`] holding one message per
//! failing field path. Validation is pure and evaluates every field.

mod path;
mod report;
pub mod rules;
mod user;

pub use path::{FieldPath, PathSegment};
pub use report::ValidationErrors;
pub use rules::FieldPipeline;
pub use user::{
    fields, validate, NormalizedUser, Tech, TechEntryInput, UserFormInput, UserSchema,
    ValidationResult,
};

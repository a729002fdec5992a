//! Dynamic row list backing the technologies section of the form.

mod array;

pub use array::{FieldArray, Row, RowKey};

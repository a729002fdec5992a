//! Collected field errors keyed by path.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::path::FieldPath;
use crate::errors::{FieldError, FieldErrorKind};

/// Every field error of one validation pass, in field order.
///
/// Holds at most one error per path. The first error recorded for a path is
/// the one kept, so a field shows the earliest check it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(FieldPath, FieldError)>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the path already has one.
    ///
    /// Returns `true` when the error was stored.
    pub fn insert(&mut self, path: FieldPath, error: FieldError) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.entries.push((path, error));
        true
    }

    /// Records the error of a field result, if any, and returns the value.
    pub fn record<T>(&mut self, path: FieldPath, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(path, error);
                None
            }
        }
    }

    /// Returns the error stored for a path.
    #[must_use]
    pub fn get(&self, path: impl Into<FieldPath>) -> Option<&FieldError> {
        let path = path.into();
        self.entries
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, error)| error)
    }

    /// Returns the message stored for a path.
    #[must_use]
    pub fn message(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.get(path).map(|error| error.message.as_str())
    }

    /// Returns the kind of error stored for a path.
    #[must_use]
    pub fn kind(&self, path: impl Into<FieldPath>) -> Option<FieldErrorKind> {
        self.get(path).map(|error| error.kind)
    }

    /// Returns true if the path has an error.
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }

    /// Iterates over `(path, error)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.entries.iter().map(|(path, error)| (path, error))
    }

    /// Returns the number of failing paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no errors have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the errors of row `index` under `list` and moves the errors of
    /// later rows up by one position.
    pub fn remove_row(&mut self, list: &str, index: usize) {
        self.entries
            .retain(|(path, _)| path.row_index(list) != Some(index));
        for (path, _) in &mut self.entries {
            if let Some(row) = path.row_index(list) {
                if row > index {
                    *path = path.with_row_index(list, row - 1);
                }
            }
        }
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, error) in &self.entries {
            map.serialize_entry(path, error)?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, error)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a FieldPath, &'a FieldError);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

//! Dotted/indexed field paths such as `techs.1.knowledge`.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field.
    Key(String),
    /// A position inside a list.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Locates a value within the nested form input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a path rooted at a named field.
    #[must_use]
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(key.into())],
        }
    }

    /// Appends a named field.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Appends a list position.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the list position directly under `list`, if this path points
    /// inside a row of that list.
    #[must_use]
    pub fn row_index(&self, list: &str) -> Option<usize> {
        match self.segments.as_slice() {
            [PathSegment::Key(key), PathSegment::Index(index), ..] if key == list => Some(*index),
            _ => None,
        }
    }

    /// Returns a copy with the row index under `list` replaced.
    #[must_use]
    pub fn with_row_index(&self, list: &str, index: usize) -> Self {
        let mut path = self.clone();
        if path.row_index(list).is_some() {
            path.segments[1] = PathSegment::Index(index);
        }
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parses the dotted form. All-digit segments become indices.
impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        let segments = value
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(index) if s.bytes().all(|b| b.is_ascii_digit()) => PathSegment::Index(index),
                _ => PathSegment::Key(s.to_string()),
            })
            .collect();
        Self { segments }
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_path() {
        let path = FieldPath::root("techs").index(1).key("knowledge");
        assert_eq!(path.to_string(), "techs.1.knowledge");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let path = FieldPath::from("techs.0.title");
        assert_eq!(path, FieldPath::root("techs").index(0).key("title"));
        assert_eq!(path.to_string(), "techs.0.title");
    }

    #[test]
    fn test_parse_keeps_signed_numbers_as_keys() {
        let path = FieldPath::from("techs.+1");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("techs".to_string()),
                PathSegment::Key("+1".to_string())
            ]
        );
    }

    #[test]
    fn test_row_index() {
        assert_eq!(FieldPath::from("techs.3.title").row_index("techs"), Some(3));
        assert_eq!(FieldPath::from("techs").row_index("techs"), None);
        assert_eq!(FieldPath::from("name").row_index("techs"), None);
    }

    #[test]
    fn test_with_row_index() {
        let path = FieldPath::from("techs.3.title").with_row_index("techs", 2);
        assert_eq!(path.to_string(), "techs.2.title");

        let untouched = FieldPath::from("email").with_row_index("techs", 2);
        assert_eq!(untouched.to_string(), "email");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&FieldPath::from("techs.0.knowledge")).unwrap();
        assert_eq!(json, r#""techs.0.knowledge""#);
    }
}

//! Text rendering of accepted and rejected submissions.

use crate::errors::FormError;
use crate::schema::{NormalizedUser, ValidationErrors};

/// Renders an accepted user as pretty JSON with two-space indentation.
///
/// Fields appear as name, email, password, techs.
pub fn render_output(user: &NormalizedUser) -> Result<String, FormError> {
    Ok(serde_json::to_string_pretty(user)?)
}

/// Renders the error map as pretty JSON, one entry per failing path.
pub fn render_errors(errors: &ValidationErrors) -> Result<String, FormError> {
    Ok(serde_json::to_string_pretty(errors)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FieldError, FieldErrorKind};
    use crate::schema::{FieldPath, Tech};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_output() {
        let user = NormalizedUser {
            name: "John".to_string(),
            email: "john@gmail.com".to_string(),
            password: "123456".to_string(),
            techs: vec![Tech {
                title: "Go".to_string(),
                knowledge: 5,
            }],
        };

        let expected = r#"{
  "name": "John",
  "email": "john@gmail.com",
  "password": "123456",
  "techs": [
    {
      "title": "Go",
      "knowledge": 5
    }
  ]
}"#;
        assert_eq!(render_output(&user).unwrap(), expected);
    }

    #[test]
    fn test_render_errors() {
        let mut errors = ValidationErrors::new();
        errors.insert(
            FieldPath::root("techs"),
            FieldError::new(FieldErrorKind::EmptyList, "Deve existir uma tecnologia"),
        );

        let expected = r#"{
  "techs": {
    "code": "FORM-005-EMPTY_LIST",
    "kind": "empty_list",
    "message": "Deve existir uma tecnologia"
  }
}"#;
        assert_eq!(render_errors(&errors).unwrap(), expected);
    }
}

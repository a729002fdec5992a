//! Test fixtures for form inputs.

use crate::form::UserForm;
use crate::schema::{TechEntryInput, UserFormInput};

/// Builder for raw form inputs that starts from a valid record.
#[derive(Debug, Clone)]
pub struct InputBuilder {
    input: UserFormInput,
}

impl Default for InputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuilder {
    /// Starts from `john / john@gmail.com / 123456 / [Go, 5]`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: valid_input(),
        }
    }

    /// Starts from an all-empty record.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            input: UserFormInput::default(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.input.name = name.into();
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.input.email = email.into();
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.input.password = password.into();
        self
    }

    /// Removes every technology row.
    #[must_use]
    pub fn no_techs(mut self) -> Self {
        self.input.techs.clear();
        self
    }

    /// Appends a technology row.
    #[must_use]
    pub fn tech(mut self, title: impl Into<String>, knowledge: impl std::fmt::Display) -> Self {
        self.input.techs.push(TechEntryInput::new(title, knowledge));
        self
    }

    /// Replaces the technology rows.
    #[must_use]
    pub fn techs(mut self, techs: Vec<TechEntryInput>) -> Self {
        self.input.techs = techs;
        self
    }

    /// Returns the built input.
    #[must_use]
    pub fn build(self) -> UserFormInput {
        self.input
    }

    /// Loads the built input into a fresh form with the default schema.
    #[must_use]
    pub fn into_form(self) -> UserForm {
        let mut form = UserForm::default();
        form.set_name(self.input.name);
        form.set_email(self.input.email);
        form.set_password(self.input.password);
        for entry in self.input.techs {
            form.append_tech(entry);
        }
        form
    }
}

/// A record that passes the default schema.
#[must_use]
pub fn valid_input() -> UserFormInput {
    UserFormInput {
        name: "john".to_string(),
        email: "john@gmail.com".to_string(),
        password: "123456".to_string(),
        techs: vec![TechEntryInput::new("Go", 5)],
    }
}

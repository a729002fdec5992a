//! The user form: raw state, row editing, and submission.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::state::{FormState, SubmitOutcome};
use crate::errors::FieldError;
use crate::events::{self, types, EventSink, NoOpEventSink};
use crate::list::{FieldArray, RowKey};
use crate::schema::{
    fields, FieldPath, NormalizedUser, TechEntryInput, UserFormInput, UserSchema, ValidationErrors,
    ValidationResult,
};

/// Holds the values of one open form and binds them to the schema.
///
/// Validation runs on submit. Once a submit has happened, every edit
/// re-validates so displayed errors follow the user's corrections; this can
/// be switched off with [`UserForm::with_revalidate_on_change`].
pub struct UserForm {
    session_id: Uuid,
    schema: Arc<UserSchema>,
    name: String,
    email: String,
    password: String,
    techs: FieldArray<TechEntryInput>,
    errors: ValidationErrors,
    state: FormState,
    revalidate_on_change: bool,
    sink: Arc<dyn EventSink>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new(Arc::new(UserSchema::default()))
    }
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("session_id", &self.session_id)
            .field("techs", &self.techs.len())
            .field("errors", &self.errors.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl UserForm {
    /// Creates an empty form validated by `schema`.
    #[must_use]
    pub fn new(schema: Arc<UserSchema>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            schema,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            techs: FieldArray::new(),
            errors: ValidationErrors::new(),
            state: FormState::default(),
            revalidate_on_change: true,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the sink that receives lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Turns re-validation after the first submit on or off.
    #[must_use]
    pub fn with_revalidate_on_change(mut self, enabled: bool) -> Self {
        self.revalidate_on_change = enabled;
        self
    }

    /// Returns the id attached to this form's events.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns the submission counters.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Returns the name as typed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email as typed.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the technology rows.
    #[must_use]
    pub fn techs(&self) -> &FieldArray<TechEntryInput> {
        &self.techs
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.after_edit();
    }

    /// Sets the email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.after_edit();
    }

    /// Sets the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.after_edit();
    }

    /// Appends a blank row (empty title, knowledge 1).
    pub fn add_tech(&mut self) -> RowKey {
        self.append_tech(TechEntryInput::new("", 1))
    }

    /// Appends a row with the given values.
    pub fn append_tech(&mut self, entry: TechEntryInput) -> RowKey {
        let key = self.techs.append(entry);
        let index = self.techs.len() - 1;
        self.sink.try_emit(
            types::ROW_ADDED,
            Some(events::row_payload(self.session_id, key, index, self.techs.len())),
        );
        self.after_edit();
        key
    }

    /// Removes the row at `index`; out-of-range indices are ignored.
    ///
    /// Errors shown for later rows move up with them.
    pub fn remove_tech(&mut self, index: usize) -> Option<TechEntryInput> {
        let key = self.techs.key_at(index)?;
        let removed = self.techs.remove_at(index)?;
        self.errors.remove_row(fields::TECHS, index);
        self.sink.try_emit(
            types::ROW_REMOVED,
            Some(events::row_payload(self.session_id, key, index, self.techs.len())),
        );
        self.after_edit();
        Some(removed)
    }

    /// Sets a row's title. Returns false if the row does not exist.
    pub fn set_tech_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        let Some(entry) = self.techs.get_mut(index) else {
            return false;
        };
        entry.title = title.into();
        self.after_edit();
        true
    }

    /// Sets a row's knowledge text. Returns false if the row does not exist.
    pub fn set_tech_knowledge(&mut self, index: usize, knowledge: impl fmt::Display) -> bool {
        let Some(entry) = self.techs.get_mut(index) else {
            return false;
        };
        entry.knowledge = knowledge.to_string();
        self.after_edit();
        true
    }

    /// Snapshots the current values.
    #[must_use]
    pub fn raw_input(&self) -> UserFormInput {
        UserFormInput {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            techs: self.techs.to_vec(),
        }
    }

    /// Validates the current values without touching stored errors.
    pub fn validate(&self) -> ValidationResult {
        self.schema.validate(&self.raw_input())
    }

    /// Validates and, on success, hands the normalized user to `on_valid`.
    ///
    /// On failure the errors are kept for display and the values stay
    /// editable.
    pub fn submit<F>(&mut self, on_valid: F) -> SubmitOutcome
    where
        F: FnOnce(&NormalizedUser),
    {
        match self.validate() {
            Ok(user) => {
                self.errors.clear();
                self.state.record_submit(true);
                tracing::info!(
                    session_id = %self.session_id,
                    submit_count = self.state.submit_count,
                    tech_count = user.techs.len(),
                    "Form submission accepted"
                );
                self.sink.try_emit(
                    types::SUBMITTED,
                    Some(events::submitted_payload(
                        self.session_id,
                        Utc::now(),
                        self.state.submit_count,
                        user.techs.len(),
                    )),
                );
                on_valid(&user);
                SubmitOutcome::Accepted
            }
            Err(errors) => {
                self.state.record_submit(false);
                tracing::info!(
                    session_id = %self.session_id,
                    submit_count = self.state.submit_count,
                    error_count = errors.len(),
                    "Form submission rejected"
                );
                self.sink.try_emit(
                    types::REJECTED,
                    Some(events::rejected_payload(
                        self.session_id,
                        self.state.submit_count,
                        &errors,
                    )),
                );
                self.errors = errors;
                SubmitOutcome::Rejected
            }
        }
    }

    /// Returns the errors currently on display.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the error shown at `path`.
    #[must_use]
    pub fn error(&self, path: impl Into<FieldPath>) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Returns the message shown at `path`.
    #[must_use]
    pub fn message(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.errors.message(path)
    }

    /// Returns the message shown under a row's field.
    #[must_use]
    pub fn row_message(&self, index: usize, field: &str) -> Option<&str> {
        self.message(FieldPath::root(fields::TECHS).index(index).key(field))
    }

    fn after_edit(&mut self) {
        if !(self.state.is_submitted && self.revalidate_on_change) {
            return;
        }
        self.errors = match self.validate() {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        tracing::trace!(error_count = self.errors.len(), "Form re-validated after edit");
    }
}

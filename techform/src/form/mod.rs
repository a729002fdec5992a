//! Form orchestration: binds editable values to the schema on submit.

mod controller;
mod output;
mod state;


pub use controller::UserForm;
pub use output::{render_errors, render_output};
pub use state::{FormState, SubmitOutcome};

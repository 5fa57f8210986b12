//! Form definitions
//!
//! Each form declares its field specifications, schema and defaults, and
//! maps submitted values to a gateway payload.

pub mod appointment;
pub mod patient_intake;
pub mod registration;

pub use appointment::AppointmentForm;
pub use patient_intake::PatientIntakeForm;
pub use registration::RegistrationForm;

use crate::form::FormController;
use crate::submission::SubmissionController;

/// What a host needs to draw a form
pub trait FormView {
    fn title(&self) -> &str;

    fn subtitle(&self) -> Option<&str> {
        None
    }

    fn submit_label(&self) -> &str;

    fn controller(&self) -> &FormController;

    fn controller_mut(&mut self) -> &mut FormController;

    fn submission(&self) -> &SubmissionController;

    /// Submit control disabled while a submission is in flight
    fn submit_disabled(&self) -> bool {
        self.submission().is_loading()
    }
}

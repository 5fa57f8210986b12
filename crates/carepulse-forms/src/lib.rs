//! CarePulse Forms
//!
//! Patient-facing forms and the admin access gate of the CarePulse
//! appointment-management application.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field specifications, field values, widget
//!   descriptions, patient/appointment records
//! - **Render Layer**: kind-dispatched field renderer and the field wrapper
//! - **Form Layer**: form state, validation schemas, the form controller
//! - **Application Layer**: submission controller and the three form
//!   definitions (patient intake, registration, appointment)
//! - **Ports Layer**: persistence gateway, navigator, credential store
//! - **Infrastructure Layer**: HTTP and in-memory persistence adapters
//!
//! ## Flow
//!
//! A form definition owns a [`FormController`]. The controller hands each
//! field's binding to the wrapper, which asks the [`FieldRenderer`] for a
//! widget. Input flows back through [`FormController::change`]. On submit the
//! form validates, then runs the [`SubmissionController`] against a
//! [`PersistenceGateway`] and navigates on success.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod forms;
pub mod gate;
pub mod infrastructure;
pub mod navigation;
pub mod ports;
pub mod render;
pub mod submission;

pub use domain::field::{FieldKind, FieldSpec, Icon, SelectOption};
pub use domain::records::{
    AppointmentChanges, AppointmentKind, AppointmentRecord, AppointmentStatus, AppointmentUpdate,
    BinaryAttachment, Gender, NewAppointment, NewUser, PatientPayload, PatientRecord, UserRecord,
};
pub use domain::value::{FieldValue, FileAttachment};
pub use domain::value_objects::{Email, EntityId, Phone};
pub use domain::widget::Widget;
pub use error::{FormsError, Result};
pub use config::AdminPasskey;
pub use form::{FieldErrors, FormController, FormState, RuleSchema, ValidationSchema};
pub use forms::{AppointmentForm, FormView, PatientIntakeForm, RegistrationForm};
pub use gate::{AccessGate, CredentialStore, FileCredentialStore, GateState, InMemoryCredentialStore};
pub use infrastructure::{HttpPersistence, InMemoryPersistence};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use ports::{GatewayError, GatewayResult, PersistenceGateway};
pub use render::{FieldRenderer, FieldUnit};
pub use submission::{SubmissionController, SubmissionState, SubmitOutcome};

//! Appointment form in its create, schedule and cancel variants

use chrono::{NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::doctor_options;
use crate::domain::{
    AppointmentChanges, AppointmentKind, AppointmentRecord, AppointmentStatus, AppointmentUpdate,
    EntityId, FieldKind, FieldSpec, FieldValue, NewAppointment,
};
use crate::error::{FormsError, Result};
use crate::form::schemas::{appointment_schema, INVALID_DATE};
use crate::form::{FormController, FormState};
use crate::navigation::{Navigator, Route};
use crate::ports::PersistenceGateway;
use crate::submission::{SubmissionController, SubmitOutcome};

use super::FormView;

/// Display pattern of the schedule picker
pub const SCHEDULE_FORMAT: &str = "MM/dd/yyyy  -  h:mm aa";

pub struct AppointmentForm {
    kind: AppointmentKind,
    user_id: EntityId,
    patient_id: Option<EntityId>,
    appointment: Option<AppointmentRecord>,
    controller: FormController,
    submission: SubmissionController,
    open: bool,
}

impl AppointmentForm {
    /// `patient_id` is needed to create, `appointment` to schedule or cancel.
    pub fn new(
        kind: AppointmentKind,
        user_id: EntityId,
        patient_id: Option<EntityId>,
        appointment: Option<AppointmentRecord>,
    ) -> Result<Self> {
        let defaults = Self::defaults(appointment.as_ref(), Utc::now().naive_utc());
        let controller = FormController::new(Self::fields(kind), Arc::new(appointment_schema(kind)), defaults)?;

        Ok(Self {
            kind,
            user_id,
            patient_id,
            appointment,
            controller,
            submission: SubmissionController::new(),
            open: true,
        })
    }

    /// Values taken from an existing appointment, schedule defaulting to `now`
    pub fn defaults(appointment: Option<&AppointmentRecord>, now: NaiveDateTime) -> BTreeMap<String, FieldValue> {
        let text = |value: Option<&str>| FieldValue::text(value.unwrap_or_default());

        BTreeMap::from([
            (
                "primaryPhysician".to_string(),
                text(appointment.map(|a| a.primary_physician.as_str())),
            ),
            (
                "schedule".to_string(),
                FieldValue::DateTime(appointment.map(|a| a.schedule.naive_utc()).unwrap_or(now)),
            ),
            ("reason".to_string(), text(appointment.map(|a| a.reason.as_str()))),
            ("note".to_string(), text(appointment.and_then(|a| a.note.as_deref()))),
            (
                "cancellationReason".to_string(),
                text(appointment.and_then(|a| a.cancellation_reason.as_deref())),
            ),
        ])
    }

    /// Visible fields: cancel shows only the cancellation reason
    pub fn fields(kind: AppointmentKind) -> Vec<FieldSpec> {
        match kind {
            AppointmentKind::Cancel => vec![FieldSpec::new(FieldKind::TextArea, "cancellationReason")
                .label("Reason for cancellation")
                .placeholder("Urgent meeting came up")],
            AppointmentKind::Create | AppointmentKind::Schedule => vec![
                FieldSpec::new(FieldKind::Select, "primaryPhysician")
                    .label("Doctor")
                    .placeholder("Select a doctor")
                    .options(doctor_options()),
                FieldSpec::new(FieldKind::DatePicker, "schedule")
                    .label("Expected appointment date")
                    .show_time(true)
                    .date_format(SCHEDULE_FORMAT),
                FieldSpec::new(FieldKind::TextArea, "reason")
                    .label("Appointment reason")
                    .placeholder("Annual monthly check-up"),
                FieldSpec::new(FieldKind::TextArea, "note")
                    .label("Comments/notes")
                    .placeholder("Prefer afternoon appointments, if possible"),
            ],
        }
    }

    pub fn kind(&self) -> AppointmentKind {
        self.kind
    }

    pub fn status(&self) -> AppointmentStatus {
        self.kind.status()
    }

    /// Whether the hosting modal is still shown
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn new_appointment(
        user_id: &EntityId,
        patient_id: Option<&EntityId>,
        state: &FormState,
    ) -> Result<NewAppointment> {
        let patient = patient_id
            .cloned()
            .ok_or_else(|| FormsError::MissingContext("patient id".into()))?;

        Ok(NewAppointment {
            user_id: user_id.clone(),
            patient,
            primary_physician: state.text("primaryPhysician"),
            schedule: schedule(state)?,
            reason: state.text("reason"),
            status: AppointmentStatus::Pending,
            note: state.optional_text("note"),
        })
    }

    pub fn update(
        kind: AppointmentKind,
        user_id: &EntityId,
        appointment: Option<&AppointmentRecord>,
        state: &FormState,
    ) -> Result<AppointmentUpdate> {
        let appointment = appointment.ok_or_else(|| FormsError::MissingContext("appointment".into()))?;

        Ok(AppointmentUpdate {
            user_id: user_id.clone(),
            appointment_id: appointment.id.clone(),
            appointment: AppointmentChanges {
                primary_physician: state.optional_text("primaryPhysician"),
                schedule: schedule(state)?,
                status: kind.status(),
                cancellation_reason: state.optional_text("cancellationReason"),
            },
            kind,
        })
    }

    /// Validate, then create or update the appointment.
    ///
    /// Create navigates to the success page; schedule and cancel dismiss
    /// the form instead.
    pub async fn submit(
        &mut self,
        gateway: &dyn PersistenceGateway,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome<AppointmentRecord> {
        if !self.controller.validate() {
            return SubmitOutcome::Invalid(self.controller.errors().clone());
        }

        let kind = self.kind;
        let user_id = &self.user_id;
        let state = self.controller.state();

        let outcome = match kind {
            AppointmentKind::Create => {
                let patient_id = self.patient_id.as_ref();
                self.submission
                    .run(
                        "createAppointment",
                        || Self::new_appointment(user_id, patient_id, state),
                        |appointment| gateway.create_appointment(appointment),
                    )
                    .await
            }
            AppointmentKind::Schedule | AppointmentKind::Cancel => {
                let appointment = self.appointment.as_ref();
                self.submission
                    .run(
                        "updateAppointment",
                        || Self::update(kind, user_id, appointment, state),
                        |update| gateway.update_appointment(update),
                    )
                    .await
            }
        };

        if let SubmitOutcome::Completed(record) = &outcome {
            self.controller.reset();
            match kind {
                AppointmentKind::Create => navigator.push(Route::AppointmentSuccess {
                    user_id: self.user_id.clone(),
                    appointment_id: record.id.clone(),
                }),
                AppointmentKind::Schedule | AppointmentKind::Cancel => {
                    self.appointment = Some(record.clone());
                    self.open = false;
                }
            }
        }
        outcome
    }
}

impl FormView for AppointmentForm {
    fn title(&self) -> &str {
        match self.kind {
            AppointmentKind::Create => "New Appointment",
            AppointmentKind::Schedule => "Schedule Appointment",
            AppointmentKind::Cancel => "Cancel Appointment",
        }
    }

    fn subtitle(&self) -> Option<&str> {
        match self.kind {
            AppointmentKind::Create => Some("Request a new appointment in 10 seconds."),
            AppointmentKind::Schedule => Some("Please fill in the following details to schedule"),
            AppointmentKind::Cancel => Some("Are you sure you want to cancel your appointment?"),
        }
    }

    fn submit_label(&self) -> &str {
        match self.kind {
            AppointmentKind::Cancel => "Cancel Appointment",
            AppointmentKind::Schedule => "Schedule Appointment",
            AppointmentKind::Create => "Submit Appointment",
        }
    }

    fn controller(&self) -> &FormController {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    fn submission(&self) -> &SubmissionController {
        &self.submission
    }
}

fn schedule(state: &FormState) -> Result<chrono::DateTime<Utc>> {
    state
        .datetime("schedule")
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| FormsError::InvalidInput {
            field: "schedule".into(),
            reason: INVALID_DATE.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Widget;
    use crate::infrastructure::InMemoryPersistence;
    use crate::navigation::RecordingNavigator;

    fn existing() -> AppointmentRecord {
        AppointmentRecord {
            id: EntityId::from_string("appt-1"),
            user_id: EntityId::from_string("user-1"),
            patient: EntityId::from_string("patient-1"),
            primary_physician: "Aditi Das".into(),
            schedule: Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
            reason: "Annual check-up".into(),
            status: AppointmentStatus::Pending,
            note: None,
            cancellation_reason: None,
        }
    }

    fn create_form() -> AppointmentForm {
        AppointmentForm::new(
            AppointmentKind::Create,
            EntityId::from_string("user-1"),
            Some(EntityId::from_string("patient-1")),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_labels_per_kind() {
        let user = EntityId::from_string("user-1");
        let labels: Vec<_> = [AppointmentKind::Cancel, AppointmentKind::Schedule, AppointmentKind::Create]
            .into_iter()
            .map(|kind| {
                AppointmentForm::new(kind, user.clone(), None, Some(existing()))
                    .unwrap()
                    .submit_label()
                    .to_string()
            })
            .collect();
        assert_eq!(labels, ["Cancel Appointment", "Schedule Appointment", "Submit Appointment"]);
    }

    #[test]
    fn test_cancel_shows_only_reason() {
        let fields = AppointmentForm::fields(AppointmentKind::Cancel);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "cancellationReason");
        assert_eq!(AppointmentForm::fields(AppointmentKind::Schedule).len(), 4);
    }

    #[test]
    fn test_defaults_come_from_appointment() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().naive_utc();
        let defaults = AppointmentForm::defaults(Some(&existing()), now);
        assert_eq!(defaults["primaryPhysician"], FieldValue::text("Aditi Das"));
        assert_eq!(defaults["reason"], FieldValue::text("Annual check-up"));
        assert_eq!(
            defaults["schedule"].as_datetime(),
            Some(existing().schedule.naive_utc())
        );

        let empty = AppointmentForm::defaults(None, now);
        assert_eq!(empty["schedule"].as_datetime(), Some(now));
        assert_eq!(empty["note"], FieldValue::text(""));
    }

    #[test]
    fn test_schedule_picker_shows_time() {
        let mut form = create_form();
        form.controller_mut().input("schedule", "2024-03-07T14:05").unwrap();
        let units = form.controller().render();
        let picker = units.iter().find(|u| u.name == "schedule").unwrap();
        match picker.widget.as_ref().unwrap() {
            Widget::DatePicker { display, show_time, .. } => {
                assert!(show_time);
                assert_eq!(display.as_deref(), Some("03/07/2024  -  2:05 PM"));
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_navigates_to_success() {
        let gateway = InMemoryPersistence::new();
        let navigator = RecordingNavigator::new();
        let mut form = create_form();
        let c = form.controller_mut();
        c.change("primaryPhysician", FieldValue::text("Aditi Das")).unwrap();
        c.change("reason", FieldValue::text("Fever")).unwrap();

        let outcome = form.submit(&gateway, &navigator).await;
        let record = outcome.record().cloned().unwrap();

        assert_eq!(record.status, AppointmentStatus::Pending);
        assert_eq!(record.patient.as_str(), "patient-1");
        assert_eq!(record.note, None);
        assert_eq!(
            navigator.last().unwrap().path(),
            format!("/patients/user-1/new-appointment/success?appointmentId={}", record.id)
        );
        assert_eq!(form.controller().state().text("reason"), "");
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn test_create_without_patient_fails() {
        let gateway = InMemoryPersistence::new();
        let navigator = RecordingNavigator::new();
        let mut form =
            AppointmentForm::new(AppointmentKind::Create, EntityId::from_string("user-1"), None, None).unwrap();
        let c = form.controller_mut();
        c.change("primaryPhysician", FieldValue::text("Aditi Das")).unwrap();
        c.change("reason", FieldValue::text("Fever")).unwrap();

        let outcome = form.submit(&gateway, &navigator).await;

        assert_eq!(outcome, SubmitOutcome::Failed("missing context: patient id".into()));
        assert!(navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_updates_and_dismisses() {
        let gateway = InMemoryPersistence::new();
        gateway.insert_appointment(existing());
        let navigator = RecordingNavigator::new();
        let mut form = AppointmentForm::new(
            AppointmentKind::Cancel,
            EntityId::from_string("user-1"),
            None,
            Some(existing()),
        )
        .unwrap();

        assert!(matches!(
            form.submit(&gateway, &navigator).await,
            SubmitOutcome::Invalid(_)
        ));

        form.controller_mut()
            .change("cancellationReason", FieldValue::text("Urgent meeting came up"))
            .unwrap();
        let outcome = form.submit(&gateway, &navigator).await;
        let record = outcome.record().cloned().unwrap();

        assert_eq!(record.status, AppointmentStatus::Cancelled);
        assert_eq!(record.cancellation_reason.as_deref(), Some("Urgent meeting came up"));
        assert_eq!(record.schedule, existing().schedule);
        assert!(!form.is_open());
        assert!(navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_requires_reason() {
        let gateway = InMemoryPersistence::new();
        let navigator = RecordingNavigator::new();
        let mut existing = existing();
        existing.reason = String::new();
        let mut form = AppointmentForm::new(
            AppointmentKind::Schedule,
            EntityId::from_string("user-1"),
            None,
            Some(existing),
        )
        .unwrap();

        match form.submit(&gateway, &navigator).await {
            SubmitOutcome::Invalid(errors) => {
                assert!(errors.contains_key("reason"));
                assert!(!errors.contains_key("primaryPhysician"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_update_payload_carries_kind_and_status() {
        let form = AppointmentForm::new(
            AppointmentKind::Schedule,
            EntityId::from_string("user-1"),
            None,
            Some(existing()),
        )
        .unwrap();
        let update = AppointmentForm::update(
            AppointmentKind::Schedule,
            &EntityId::from_string("user-1"),
            Some(&existing()),
            form.controller().state(),
        )
        .unwrap();

        assert_eq!(update.kind, AppointmentKind::Schedule);
        assert_eq!(update.appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(update.appointment_id.as_str(), "appt-1");
        assert_eq!(update.appointment.primary_physician.as_deref(), Some("Aditi Das"));
    }
}

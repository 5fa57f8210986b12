//! Concrete schemas for the patient intake, registration and appointment forms

use crate::catalog::gender_options;
use crate::domain::AppointmentKind;

use super::schema::{Rule, RuleSchema};

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const SELECT_DOCTOR: &str = "Select at least one doctor";
pub const INVALID_DATE: &str = "Invalid date";

fn length(min: usize, max: usize, subject: &str) -> [Rule; 2] {
    [
        Rule::MinLength(min, format!("{} must be at least {} characters", subject, min)),
        Rule::MaxLength(max, format!("{} must be at most {} characters", subject, max)),
    ]
}

fn user_fields(schema: RuleSchema) -> RuleSchema {
    schema
        .required("name", length(2, 50, "Name"))
        .required("email", [Rule::Email(INVALID_EMAIL.into())])
        .required("phone", [Rule::Phone(INVALID_PHONE.into())])
}

/// Patient intake: name, email, phone
pub fn user_schema() -> RuleSchema {
    user_fields(RuleSchema::new())
}

/// Full patient registration
pub fn patient_schema() -> RuleSchema {
    user_fields(RuleSchema::new())
        .required("birthDate", [Rule::Date(INVALID_DATE.into())])
        .required(
            "gender",
            [Rule::OneOf(gender_options(), "Select a gender".into())],
        )
        .required("address", length(5, 500, "Address"))
        .required("occupation", length(2, 500, "Occupation"))
        .required("emergencyContactName", length(2, 50, "Contact name"))
        .required("emergencyContactNumber", [Rule::Phone(INVALID_PHONE.into())])
        .required("primaryPhysician", [Rule::MinLength(2, SELECT_DOCTOR.into())])
        .required("insuranceProvider", length(2, 50, "Insurance name"))
        .required("insurancePolicyNumber", length(2, 50, "Policy number"))
        .optional("allergies", [])
        .optional("currentMedication", [])
        .optional("familyMedicalHistory", [])
        .optional("pastMedicalHistory", [])
        .optional("identificationType", [])
        .optional("identificationNumber", [])
        .optional("identificationDocument", [])
        .required(
            "treatmentConsent",
            [Rule::MustBeTrue("You must consent to treatment in order to proceed".into())],
        )
        .required(
            "disclosureConsent",
            [Rule::MustBeTrue("You must consent to disclosure in order to proceed".into())],
        )
        .required(
            "privacyConsent",
            [Rule::MustBeTrue("You must consent to privacy in order to proceed".into())],
        )
}

/// Appointment schema for a form variant.
///
/// Create and schedule need a doctor, a date and a reason; cancel needs
/// only a cancellation reason.
pub fn appointment_schema(kind: AppointmentKind) -> RuleSchema {
    match kind {
        AppointmentKind::Create | AppointmentKind::Schedule => RuleSchema::new()
            .required("primaryPhysician", [Rule::MinLength(2, SELECT_DOCTOR.into())])
            .required("schedule", [Rule::Date(INVALID_DATE.into())])
            .required("reason", length(2, 500, "Reason"))
            .optional("note", [])
            .optional("cancellationReason", []),
        AppointmentKind::Cancel => RuleSchema::new()
            .optional("primaryPhysician", [])
            .optional("schedule", [])
            .optional("reason", [])
            .optional("note", [])
            .required("cancellationReason", length(2, 500, "Reason")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use crate::form::{FormState, ValidationSchema};
    use std::collections::BTreeMap;

    fn state(values: &[(&str, FieldValue)]) -> FormState {
        FormState::new(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_user_schema_accepts_sample() {
        let state = state(&[
            ("name", FieldValue::text("Roumodip Das")),
            ("email", FieldValue::text("rdas567@gmail.com")),
            ("phone", FieldValue::text("+918966620102")),
        ]);
        assert!(user_schema().validate(&state).is_empty());
    }

    #[test]
    fn test_user_schema_messages() {
        let state = state(&[
            ("name", FieldValue::text("R")),
            ("email", FieldValue::text("rdas567")),
            ("phone", FieldValue::text("8966")),
        ]);
        let errors = user_schema().validate(&state);
        assert_eq!(errors["name"], "Name must be at least 2 characters");
        assert_eq!(errors["email"], INVALID_EMAIL);
        assert_eq!(errors["phone"], INVALID_PHONE);
    }

    #[test]
    fn test_cancel_needs_only_cancellation_reason() {
        let schema = appointment_schema(AppointmentKind::Cancel);
        let errors = schema.validate(&state(&[]));
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["cancellationReason"]);

        let ok = state(&[("cancellationReason", FieldValue::text("Urgent meeting came up"))]);
        assert!(schema.validate(&ok).is_empty());
    }

    #[test]
    fn test_create_and_schedule_need_doctor_date_reason() {
        for kind in [AppointmentKind::Create, AppointmentKind::Schedule] {
            let errors = appointment_schema(kind).validate(&state(&[]));
            let mut keys: Vec<_> = errors.keys().map(String::as_str).collect();
            keys.sort();
            assert_eq!(keys, vec!["primaryPhysician", "reason", "schedule"]);
            assert_eq!(errors["primaryPhysician"], SELECT_DOCTOR);
        }
    }

    #[test]
    fn test_patient_schema_requires_consents() {
        let errors = patient_schema().validate(&state(&[("treatmentConsent", FieldValue::Bool(false))]));
        assert_eq!(
            errors["treatmentConsent"],
            "You must consent to treatment in order to proceed"
        );
        assert!(errors.contains_key("privacyConsent"));
        assert!(!errors.contains_key("allergies"));
        assert!(!errors.contains_key("identificationDocument"));
    }
}

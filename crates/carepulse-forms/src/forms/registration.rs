//! Patient registration: the full patient profile for an existing user

use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{
    doctor_options, gender_options, identification_type_options, DEFAULT_IDENTIFICATION_TYPE,
    EMAIL_ICON, USER_ICON,
};
use crate::domain::{
    BinaryAttachment, FieldKind, FieldSpec, FieldValue, FileAttachment, FileSummary, Gender, Icon,
    PatientPayload, PatientRecord, UserRecord, Widget,
};
use crate::error::{FormsError, Result};
use crate::form::schemas::{patient_schema, INVALID_DATE};
use crate::form::{FormController, FormState};
use crate::navigation::{Navigator, Route};
use crate::ports::PersistenceGateway;
use crate::submission::{SubmissionController, SubmitOutcome};

use super::FormView;

const TEXT_FIELDS: [&str; 16] = [
    "name",
    "email",
    "phone",
    "address",
    "occupation",
    "emergencyContactName",
    "emergencyContactNumber",
    "primaryPhysician",
    "insuranceProvider",
    "insurancePolicyNumber",
    "allergies",
    "currentMedication",
    "familyMedicalHistory",
    "pastMedicalHistory",
    "identificationNumber",
    "identificationType",
];

const CONSENTS: [&str; 3] = ["treatmentConsent", "disclosureConsent", "privacyConsent"];

pub struct RegistrationForm {
    user: UserRecord,
    controller: FormController,
    submission: SubmissionController,
}

impl RegistrationForm {
    pub fn new(user: UserRecord) -> Result<Self> {
        Ok(Self {
            user,
            controller: FormController::new(Self::fields(), Arc::new(patient_schema()), Self::defaults())?,
            submission: SubmissionController::new(),
        })
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// Starting values: empty text, today as birth date, male, birth
    /// certificate, no document, no consent
    pub fn defaults() -> BTreeMap<String, FieldValue> {
        let mut defaults: BTreeMap<String, FieldValue> = TEXT_FIELDS
            .into_iter()
            .map(|name| (name.to_string(), FieldValue::text("")))
            .collect();

        defaults.insert("birthDate".into(), FieldValue::DateTime(Utc::now().naive_utc()));
        defaults.insert("gender".into(), FieldValue::text(Gender::Male.as_str()));
        defaults.insert("identificationType".into(), FieldValue::text(DEFAULT_IDENTIFICATION_TYPE));
        defaults.insert("identificationDocument".into(), FieldValue::Files(Vec::new()));
        for consent in CONSENTS {
            defaults.insert(consent.into(), FieldValue::Bool(false));
        }
        defaults
    }

    pub fn fields() -> Vec<FieldSpec> {
        vec![
            // Personal information
            FieldSpec::new(FieldKind::TextInput, "name")
                .label("Full Name")
                .placeholder("John Doe")
                .icon(Icon::new(USER_ICON, "user")),
            FieldSpec::new(FieldKind::TextInput, "email")
                .label("Email address")
                .placeholder("johndoe@gmail.com")
                .icon(Icon::new(EMAIL_ICON, "email")),
            FieldSpec::new(FieldKind::PhoneInput, "phone")
                .label("Phone Number")
                .placeholder("(555) 123-4567"),
            FieldSpec::new(FieldKind::DatePicker, "birthDate").label("Date of birth"),
            FieldSpec::new(FieldKind::Skeleton, "gender")
                .label("Gender")
                .render_with(|binding| Widget::RadioGroup {
                    name: binding.name.to_string(),
                    selected: binding.value.as_text().map(str::to_string),
                    options: gender_options(),
                }),
            FieldSpec::new(FieldKind::TextInput, "address")
                .label("Address")
                .placeholder("14 street, New york, NY - 5101"),
            FieldSpec::new(FieldKind::TextInput, "occupation")
                .label("Occupation")
                .placeholder("Software Engineer"),
            FieldSpec::new(FieldKind::TextInput, "emergencyContactName")
                .label("Emergency contact name")
                .placeholder("Guardian's name"),
            FieldSpec::new(FieldKind::PhoneInput, "emergencyContactNumber")
                .label("Emergency contact number")
                .placeholder("(555) 123-4567"),
            // Medical information
            FieldSpec::new(FieldKind::Select, "primaryPhysician")
                .label("Primary care physician")
                .placeholder("Select a physician")
                .options(doctor_options()),
            FieldSpec::new(FieldKind::TextInput, "insuranceProvider")
                .label("Insurance provider")
                .placeholder("BlueCross BlueShield"),
            FieldSpec::new(FieldKind::TextInput, "insurancePolicyNumber")
                .label("Insurance policy number")
                .placeholder("ABC123456789"),
            FieldSpec::new(FieldKind::TextArea, "allergies")
                .label("Allergies (if any)")
                .placeholder("Peanuts, Penicillin, Pollen"),
            FieldSpec::new(FieldKind::TextArea, "currentMedication")
                .label("Current medications")
                .placeholder("Ibuprofen 200mg, Levothyroxine 50mcg"),
            FieldSpec::new(FieldKind::TextArea, "familyMedicalHistory")
                .label("Family medical history (if relevant)")
                .placeholder("Mother had brain cancer, Father has hypertension"),
            FieldSpec::new(FieldKind::TextArea, "pastMedicalHistory")
                .label("Past medical history")
                .placeholder("Appendectomy in 2015, Asthma diagnosis in childhood"),
            // Identification and verification
            FieldSpec::new(FieldKind::Select, "identificationType")
                .label("Identification Type")
                .placeholder("Select identification type")
                .options(identification_type_options()),
            FieldSpec::new(FieldKind::TextInput, "identificationNumber")
                .label("Identification Number")
                .placeholder("123456789"),
            FieldSpec::new(FieldKind::Skeleton, "identificationDocument")
                .label("Scanned Copy of Identification Document")
                .render_with(|binding| Widget::FileUploader {
                    name: binding.name.to_string(),
                    files: binding.value.as_files().iter().map(FileSummary::from).collect(),
                }),
            // Consent and privacy
            FieldSpec::new(FieldKind::Checkbox, "treatmentConsent")
                .label("I consent to receive treatment for my health condition."),
            FieldSpec::new(FieldKind::Checkbox, "disclosureConsent")
                .label("I consent to the use and disclosure of my health information for treatment purposes."),
            FieldSpec::new(FieldKind::Checkbox, "privacyConsent")
                .label("I acknowledge that I have reviewed and agree to the privacy policy"),
        ]
    }

    /// Build the registration payload from validated state
    pub fn payload(user: &UserRecord, state: &FormState) -> Result<PatientPayload> {
        let birth_date = state.datetime("birthDate").ok_or_else(|| FormsError::InvalidInput {
            field: "birthDate".into(),
            reason: INVALID_DATE.into(),
        })?;
        let gender = state
            .text("gender")
            .parse::<Gender>()
            .map_err(|reason| FormsError::InvalidInput {
                field: "gender".into(),
                reason,
            })?;

        Ok(PatientPayload {
            user_id: user.id.clone(),
            name: state.text("name"),
            email: state.text("email"),
            phone: state.text("phone"),
            birth_date: Utc.from_utc_datetime(&birth_date),
            gender,
            address: state.text("address"),
            occupation: state.text("occupation"),
            emergency_contact_name: state.text("emergencyContactName"),
            emergency_contact_number: state.text("emergencyContactNumber"),
            primary_physician: state.text("primaryPhysician"),
            insurance_provider: state.text("insuranceProvider"),
            insurance_policy_number: state.text("insurancePolicyNumber"),
            allergies: state.optional_text("allergies"),
            current_medication: state.optional_text("currentMedication"),
            family_medical_history: state.optional_text("familyMedicalHistory"),
            past_medical_history: state.optional_text("pastMedicalHistory"),
            identification_type: state.optional_text("identificationType"),
            identification_number: state.optional_text("identificationNumber"),
            identification_document: identification_attachment(state.files("identificationDocument")),
            treatment_consent: state.flag("treatmentConsent"),
            disclosure_consent: state.flag("disclosureConsent"),
            privacy_consent: state.flag("privacyConsent"),
        })
    }

    /// Validate, register the patient and continue to the appointment form
    pub async fn submit(
        &mut self,
        gateway: &dyn PersistenceGateway,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome<PatientRecord> {
        if !self.controller.validate() {
            return SubmitOutcome::Invalid(self.controller.errors().clone());
        }

        let user = &self.user;
        let state = self.controller.state();
        let outcome = self
            .submission
            .run(
                "registerPatient",
                || Self::payload(user, state),
                |patient| gateway.register_patient(patient),
            )
            .await;

        if outcome.is_completed() {
            navigator.push(Route::NewAppointment {
                user_id: self.user.id.clone(),
            });
            self.controller.reset();
        }
        outcome
    }
}

impl FormView for RegistrationForm {
    fn title(&self) -> &str {
        "Welcome 👋"
    }

    fn subtitle(&self) -> Option<&str> {
        Some("Let us know more about yourself.")
    }

    fn submit_label(&self) -> &str {
        "Submit and Continue"
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

/// First uploaded document, wrapped for upload. Further files are ignored.
pub fn identification_attachment(files: &[FileAttachment]) -> Option<BinaryAttachment> {
    files.first().map(|file| BinaryAttachment {
        blob_file: file.bytes.clone(),
        mime_type: file.mime_type.clone(),
        file_name: file.file_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use crate::infrastructure::InMemoryPersistence;
    use crate::navigation::RecordingNavigator;
    use chrono::NaiveDate;

    fn user() -> UserRecord {
        UserRecord {
            id: EntityId::from_string("user-1"),
            name: "Roumodip Das".into(),
            email: "rdas567@gmail.com".into(),
            phone: "+918966620102".into(),
        }
    }

    fn fill(form: &mut RegistrationForm) {
        let c = form.controller_mut();
        for (name, value) in [
            ("name", "Roumodip Das"),
            ("email", "rdas567@gmail.com"),
            ("phone", "+918966620102"),
            ("gender", "female"),
            ("address", "14 street, Kolkata"),
            ("occupation", "Engineer"),
            ("emergencyContactName", "Mita Das"),
            ("emergencyContactNumber", "+918966620103"),
            ("primaryPhysician", "Aditi Das"),
            ("insuranceProvider", "BlueCross"),
            ("insurancePolicyNumber", "ABC123456789"),
        ] {
            c.change(name, FieldValue::text(value)).unwrap();
        }
        c.input("birthDate", "1995-04-12").unwrap();
        for consent in CONSENTS {
            c.change(consent, FieldValue::Bool(true)).unwrap();
        }
    }

    #[test]
    fn test_defaults() {
        let form = RegistrationForm::new(user()).unwrap();
        let state = form.controller().state();
        assert_eq!(state.text("gender"), "male");
        assert_eq!(state.text("identificationType"), "Birth Certificate");
        assert_eq!(state.text("name"), "");
        assert!(state.datetime("birthDate").is_some());
        assert!(state.files("identificationDocument").is_empty());
        assert!(!state.flag("privacyConsent"));
    }

    #[test]
    fn test_skeleton_fields_render_through_callbacks() {
        let mut form = RegistrationForm::new(user()).unwrap();
        form.controller_mut()
            .change(
                "identificationDocument",
                FieldValue::Files(vec![FileAttachment::new("id.png", "image/png", vec![1, 2, 3])]),
            )
            .unwrap();

        let units = form.controller().render();
        let gender = units.iter().find(|u| u.name == "gender").unwrap();
        match gender.widget.as_ref().unwrap() {
            Widget::RadioGroup { selected, options, .. } => {
                assert_eq!(selected.as_deref(), Some("male"));
                assert_eq!(options, &vec!["male".to_string(), "female".into(), "other".into()]);
            }
            other => panic!("unexpected widget {other:?}"),
        }

        let upload = units.iter().find(|u| u.name == "identificationDocument").unwrap();
        match upload.widget.as_ref().unwrap() {
            Widget::FileUploader { files, .. } => assert_eq!(files.len(), 1),
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_consent_checkboxes_have_no_field_label() {
        let form = RegistrationForm::new(user()).unwrap();
        let units = form.controller().render();
        let consent = units.iter().find(|u| u.name == "treatmentConsent").unwrap();
        assert!(consent.label.is_none());
        match consent.widget.as_ref().unwrap() {
            Widget::Checkbox { label, checked, .. } => {
                assert!(!checked);
                assert_eq!(
                    label.as_deref(),
                    Some("I consent to receive treatment for my health condition.")
                );
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_only_first_document_is_attached() {
        let files = vec![
            FileAttachment::new("front.png", "image/png", vec![1]),
            FileAttachment::new("back.jpg", "image/jpeg", vec![2]),
        ];
        let attachment = identification_attachment(&files).unwrap();
        assert_eq!(attachment.file_name, "front.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.blob_file, vec![1]);
        assert!(identification_attachment(&[]).is_none());
    }

    #[test]
    fn test_payload_maps_values() {
        let mut form = RegistrationForm::new(user()).unwrap();
        fill(&mut form);
        let payload = RegistrationForm::payload(form.user(), form.controller().state()).unwrap();

        assert_eq!(payload.user_id.as_str(), "user-1");
        assert_eq!(payload.gender, Gender::Female);
        assert_eq!(
            payload.birth_date.date_naive(),
            NaiveDate::from_ymd_opt(1995, 4, 12).unwrap()
        );
        assert_eq!(payload.allergies, None);
        assert_eq!(payload.identification_type.as_deref(), Some("Birth Certificate"));
        assert!(payload.identification_document.is_none());
        assert!(payload.treatment_consent && payload.disclosure_consent && payload.privacy_consent);
    }

    #[tokio::test]
    async fn test_missing_consent_blocks_submit() {
        let gateway = InMemoryPersistence::new();
        let navigator = RecordingNavigator::new();
        let mut form = RegistrationForm::new(user()).unwrap();
        fill(&mut form);
        form.controller_mut()
            .change("privacyConsent", FieldValue::Bool(false))
            .unwrap();

        match form.submit(&gateway, &navigator).await {
            SubmitOutcome::Invalid(errors) => assert_eq!(
                errors["privacyConsent"],
                "You must consent to privacy in order to proceed"
            ),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(navigator.history().is_empty());

        form.controller_mut()
            .change("privacyConsent", FieldValue::Bool(true))
            .unwrap();
        assert!(form.controller().state().error("privacyConsent").is_none());
    }

    #[tokio::test]
    async fn test_submit_registers_and_navigates() {
        let gateway = InMemoryPersistence::new();
        let navigator = RecordingNavigator::new();
        let mut form = RegistrationForm::new(user()).unwrap();
        fill(&mut form);
        form.controller_mut()
            .change(
                "identificationDocument",
                FieldValue::Files(vec![FileAttachment::new("id.pdf", "application/pdf", vec![9; 4])]),
            )
            .unwrap();

        let outcome = form.submit(&gateway, &navigator).await;
        let patient = outcome.record().cloned().unwrap();

        assert_eq!(patient.user_id.as_str(), "user-1");
        let document = gateway
            .document(patient.identification_document_id.as_deref().unwrap())
            .unwrap();
        assert_eq!(document.file_name, "id.pdf");
        assert_eq!(document.mime_type, "application/pdf");
        assert_eq!(document.blob_file, vec![9; 4]);
        assert_eq!(
            navigator.last().unwrap().path(),
            "/patients/user-1/new-appointment"
        );
    }
}

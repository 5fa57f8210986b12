//! Records exchanged with the persistence gateway
//!
//! Field names follow the remote API's camelCase wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::base64_bytes;
use super::value_objects::EntityId;

// =============================================================================
// Users & Patients
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "$id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown gender `{}`", s))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identification document wrapped for upload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryAttachment {
    #[serde(with = "base64_bytes")]
    pub blob_file: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    pub user_id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: DateTime<Utc>,
    pub gender: Gender,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: Option<String>,
    pub identification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub identification_document: Option<BinaryAttachment>,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(alias = "$id")]
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    pub email: String,
    pub primary_physician: String,
    pub identification_document_id: Option<String>,
}

// =============================================================================
// Appointments
// =============================================================================

/// Appointment form variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentKind {
    #[default]
    Create,
    Schedule,
    Cancel,
}

impl AppointmentKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Schedule => "schedule",
            Self::Cancel => "cancel",
        }
    }

    /// Status an appointment takes when this variant is submitted
    pub fn status(self) -> AppointmentStatus {
        match self {
            Self::Schedule => AppointmentStatus::Scheduled,
            Self::Cancel => AppointmentStatus::Cancelled,
            Self::Create => AppointmentStatus::Pending,
        }
    }
}

impl FromStr for AppointmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "schedule" => Ok(Self::Schedule),
            "cancel" => Ok(Self::Cancel),
            other => Err(format!("unknown appointment type `{}`", other)),
        }
    }
}

impl fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Scheduled,
    Cancelled,
}

impl AppointmentStatus {
    /// Status for a raw submission tag; anything but schedule/cancel is pending
    pub fn for_tag(tag: &str) -> Self {
        tag.parse::<AppointmentKind>()
            .map(AppointmentKind::status)
            .unwrap_or(Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub user_id: EntityId,
    pub patient: EntityId,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    pub primary_physician: Option<String>,
    pub schedule: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub cancellation_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub user_id: EntityId,
    pub appointment_id: EntityId,
    pub appointment: AppointmentChanges,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    #[serde(alias = "$id")]
    pub id: EntityId,
    pub user_id: EntityId,
    pub patient: EntityId,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub note: Option<String>,
    pub cancellation_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_derivation_is_exact() {
        assert_eq!(AppointmentKind::Create.status(), AppointmentStatus::Pending);
        assert_eq!(AppointmentKind::Schedule.status(), AppointmentStatus::Scheduled);
        assert_eq!(AppointmentKind::Cancel.status(), AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_status_for_raw_tags() {
        assert_eq!(AppointmentStatus::for_tag("schedule"), AppointmentStatus::Scheduled);
        assert_eq!(AppointmentStatus::for_tag("cancel"), AppointmentStatus::Cancelled);
        assert_eq!(AppointmentStatus::for_tag("create"), AppointmentStatus::Pending);
        assert_eq!(AppointmentStatus::for_tag("reschedule"), AppointmentStatus::Pending);
    }

    #[test]
    fn test_update_serializes_kind_as_type() {
        let update = AppointmentUpdate {
            user_id: EntityId::from_string("u1"),
            appointment_id: EntityId::from_string("a1"),
            appointment: AppointmentChanges {
                primary_physician: None,
                schedule: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
                status: AppointmentStatus::Cancelled,
                cancellation_reason: Some("Urgent meeting came up".into()),
            },
            kind: AppointmentKind::Cancel,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "cancel");
        assert_eq!(json["appointmentId"], "a1");
        assert_eq!(json["appointment"]["status"], "cancelled");
    }

    #[test]
    fn test_record_accepts_dollar_id() {
        let user: UserRecord = serde_json::from_str(
            r#"{"$id":"abc","name":"Roumodip Das","email":"rdas567@gmail.com","phone":"+918966620102"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_str(), "abc");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert!("unknown".parse::<Gender>().is_err());
    }
}

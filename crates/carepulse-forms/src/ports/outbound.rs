//! Outbound ports
//!
//! The persistence service stores users, patients and appointments. Calls
//! are fallible in two ways: an `Err` for transport or server failures, and
//! `Ok(None)` when the service answers without a record.

use async_trait::async_trait;

use crate::domain::{
    AppointmentRecord, AppointmentUpdate, EntityId, NewAppointment, NewUser, PatientPayload,
    PatientRecord, UserRecord,
};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Persistence gateway port
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Create a user, or return the existing user with the same email
    async fn create_user(&self, user: NewUser) -> GatewayResult<Option<UserRecord>>;

    /// Register a patient profile for a user
    async fn register_patient(&self, patient: PatientPayload) -> GatewayResult<Option<PatientRecord>>;

    /// Request a new appointment
    async fn create_appointment(&self, appointment: NewAppointment) -> GatewayResult<Option<AppointmentRecord>>;

    /// Schedule or cancel an existing appointment
    async fn update_appointment(&self, update: AppointmentUpdate) -> GatewayResult<Option<AppointmentRecord>>;

    /// Look up a user by id
    async fn get_user(&self, id: &EntityId) -> GatewayResult<Option<UserRecord>>;

    /// Look up the patient profile of a user
    async fn get_patient(&self, user_id: &EntityId) -> GatewayResult<Option<PatientRecord>>;

    /// Look up an appointment by id
    async fn get_appointment(&self, id: &EntityId) -> GatewayResult<Option<AppointmentRecord>>;
}

/// Gateway error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

//! In-memory persistence gateway for tests and the offline demo

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::{
    AppointmentRecord, AppointmentUpdate, BinaryAttachment, EntityId, NewAppointment, NewUser,
    PatientPayload, PatientRecord, UserRecord,
};
use crate::ports::outbound::{GatewayError, GatewayResult, PersistenceGateway};

/// Failure injected into the next gateway call
#[derive(Debug, Clone)]
enum Fault {
    Error(GatewayError),
    Empty,
}

/// In-memory persistence gateway
#[derive(Default)]
pub struct InMemoryPersistence {
    users: DashMap<String, UserRecord>,
    patients: DashMap<String, PatientRecord>,
    documents: DashMap<String, BinaryAttachment>,
    appointments: DashMap<String, AppointmentRecord>,
    created_users: Mutex<Vec<NewUser>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    fault: Mutex<Option<Fault>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with a connection error
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fault.lock() = Some(Fault::Error(GatewayError::Connection(message.into())));
    }

    /// Answer the next call without a record
    pub fn respond_empty_next(&self) {
        *self.fault.lock() = Some(Fault::Empty);
    }

    /// Every `create_user` payload received, in order
    pub fn created_users(&self) -> Vec<NewUser> {
        self.created_users.lock().clone()
    }

    /// Number of calls made to one gateway operation
    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    pub fn insert_appointment(&self, appointment: AppointmentRecord) {
        self.appointments
            .insert(appointment.id.to_string(), appointment);
    }

    pub fn appointments(&self) -> Vec<AppointmentRecord> {
        let mut all: Vec<_> = self.appointments.iter().map(|a| a.value().clone()).collect();
        all.sort_by_key(|a| a.schedule);
        all
    }

    pub fn document(&self, id: &str) -> Option<BinaryAttachment> {
        self.documents.get(id).map(|d| d.value().clone())
    }

    /// Count the call and apply any injected fault
    fn enter(&self, operation: &'static str) -> GatewayResult<bool> {
        *self.calls.lock().entry(operation).or_insert(0) += 1;
        match self.fault.lock().take() {
            Some(Fault::Error(e)) => Err(e),
            Some(Fault::Empty) => Ok(false),
            None => Ok(true),
        }
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryPersistence {
    async fn create_user(&self, user: NewUser) -> GatewayResult<Option<UserRecord>> {
        self.created_users.lock().push(user.clone());
        if !self.enter("createUser")? {
            return Ok(None);
        }

        if let Some(existing) = self.users.iter().find(|u| u.email == user.email) {
            tracing::debug!(user_id = %existing.id, "user already exists");
            return Ok(Some(existing.value().clone()));
        }

        let record = UserRecord {
            id: EntityId::new(),
            name: user.name,
            email: user.email,
            phone: user.phone,
        };
        self.users.insert(record.id.to_string(), record.clone());
        Ok(Some(record))
    }

    async fn register_patient(&self, patient: PatientPayload) -> GatewayResult<Option<PatientRecord>> {
        if !self.enter("registerPatient")? {
            return Ok(None);
        }

        let identification_document_id = patient.identification_document.map(|document| {
            let id = EntityId::new().to_string();
            self.documents.insert(id.clone(), document);
            id
        });

        let record = PatientRecord {
            id: EntityId::new(),
            user_id: patient.user_id,
            name: patient.name,
            email: patient.email,
            primary_physician: patient.primary_physician,
            identification_document_id,
        };
        self.patients.insert(record.user_id.to_string(), record.clone());
        Ok(Some(record))
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> GatewayResult<Option<AppointmentRecord>> {
        if !self.enter("createAppointment")? {
            return Ok(None);
        }

        let record = AppointmentRecord {
            id: EntityId::new(),
            user_id: appointment.user_id,
            patient: appointment.patient,
            primary_physician: appointment.primary_physician,
            schedule: appointment.schedule,
            reason: appointment.reason,
            status: appointment.status,
            note: appointment.note,
            cancellation_reason: None,
        };
        self.insert_appointment(record.clone());
        Ok(Some(record))
    }

    async fn update_appointment(&self, update: AppointmentUpdate) -> GatewayResult<Option<AppointmentRecord>> {
        if !self.enter("updateAppointment")? {
            return Ok(None);
        }

        let Some(mut record) = self.appointments.get_mut(update.appointment_id.as_str()) else {
            tracing::warn!(appointment_id = %update.appointment_id, "appointment not found");
            return Ok(None);
        };

        let changes = update.appointment;
        if let Some(physician) = changes.primary_physician {
            record.primary_physician = physician;
        }
        record.schedule = changes.schedule;
        record.status = changes.status;
        if changes.cancellation_reason.is_some() {
            record.cancellation_reason = changes.cancellation_reason;
        }
        Ok(Some(record.clone()))
    }

    async fn get_user(&self, id: &EntityId) -> GatewayResult<Option<UserRecord>> {
        if !self.enter("getUser")? {
            return Ok(None);
        }
        Ok(self.users.get(id.as_str()).map(|u| u.value().clone()))
    }

    async fn get_patient(&self, user_id: &EntityId) -> GatewayResult<Option<PatientRecord>> {
        if !self.enter("getPatient")? {
            return Ok(None);
        }
        Ok(self.patients.get(user_id.as_str()).map(|p| p.value().clone()))
    }

    async fn get_appointment(&self, id: &EntityId) -> GatewayResult<Option<AppointmentRecord>> {
        if !self.enter("getAppointment")? {
            return Ok(None);
        }
        Ok(self.appointments.get(id.as_str()).map(|a| a.value().clone()))
    }
}

//! HTTP persistence gateway
//!
//! Talks JSON to the CarePulse API. Responses wrap the record in a `data`
//! envelope; a 404 or a missing/null `data` means no record.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    AppointmentRecord, AppointmentUpdate, EntityId, NewAppointment, NewUser, PatientPayload,
    PatientRecord, UserRecord,
};
use crate::ports::outbound::{GatewayError, GatewayResult, PersistenceGateway};

pub struct HttpPersistence {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpPersistence {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> GatewayResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(method = %method.as_str(), url = %url, "gateway request");

        let mut req = self.client.request(method, &url);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::CONFLICT => GatewayError::Conflict(message),
                _ => GatewayError::Server {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::Serialization(e.to_string()))?;
        unwrap_envelope(json)
    }
}

/// Take the record out of a `{"data": ...}` response
pub fn unwrap_envelope<T: DeserializeOwned>(json: serde_json::Value) -> GatewayResult<Option<T>> {
    match json.get("data") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data.clone())
            .map(Some)
            .map_err(|e| GatewayError::Serialization(e.to_string())),
    }
}

#[async_trait]
impl PersistenceGateway for HttpPersistence {
    async fn create_user(&self, user: NewUser) -> GatewayResult<Option<UserRecord>> {
        self.send(Method::POST, "/users", Some(&user)).await
    }

    async fn register_patient(&self, patient: PatientPayload) -> GatewayResult<Option<PatientRecord>> {
        self.send(Method::POST, "/patients", Some(&patient)).await
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> GatewayResult<Option<AppointmentRecord>> {
        self.send(Method::POST, "/appointments", Some(&appointment)).await
    }

    async fn update_appointment(&self, update: AppointmentUpdate) -> GatewayResult<Option<AppointmentRecord>> {
        let path = format!("/appointments/{}", update.appointment_id);
        self.send(Method::PATCH, &path, Some(&update)).await
    }

    async fn get_user(&self, id: &EntityId) -> GatewayResult<Option<UserRecord>> {
        self.send::<_, ()>(Method::GET, &format!("/users/{}", id), None).await
    }

    async fn get_patient(&self, user_id: &EntityId) -> GatewayResult<Option<PatientRecord>> {
        self.send::<_, ()>(Method::GET, &format!("/users/{}/patient", user_id), None)
            .await
    }

    async fn get_appointment(&self, id: &EntityId) -> GatewayResult<Option<AppointmentRecord>> {
        self.send::<_, ()>(Method::GET, &format!("/appointments/{}", id), None)
            .await
    }
}

//! Navigation targets and the navigator port

use parking_lot::Mutex;
use std::fmt;

use crate::domain::EntityId;

/// Fixed routes the forms and the access gate navigate to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Admin,
    PatientRegister { user_id: EntityId },
    NewAppointment { user_id: EntityId },
    AppointmentSuccess { user_id: EntityId, appointment_id: EntityId },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::PatientRegister { user_id } => format!("/patients/{}/register", user_id),
            Self::NewAppointment { user_id } => format!("/patients/{}/new-appointment", user_id),
            Self::AppointmentSuccess { user_id, appointment_id } => format!(
                "/patients/{}/new-appointment/success?appointmentId={}",
                user_id, appointment_id
            ),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation port
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Navigator that remembers every route it was asked to open
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(path = %route, "navigate");
        self.history.lock().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_templates() {
        let user_id = EntityId::from_string("u42");
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Admin.path(), "/admin");
        assert_eq!(
            Route::PatientRegister { user_id: user_id.clone() }.path(),
            "/patients/u42/register"
        );
        assert_eq!(
            Route::NewAppointment { user_id: user_id.clone() }.path(),
            "/patients/u42/new-appointment"
        );
        assert_eq!(
            Route::AppointmentSuccess {
                user_id,
                appointment_id: EntityId::from_string("a7"),
            }
            .to_string(),
            "/patients/u42/new-appointment/success?appointmentId=a7"
        );
    }

    #[test]
    fn test_recording_navigator() {
        let nav = RecordingNavigator::new();
        nav.push(Route::Home);
        nav.push(Route::Admin);
        assert_eq!(nav.history(), vec![Route::Home, Route::Admin]);
        assert_eq!(nav.last(), Some(Route::Admin));
    }
}

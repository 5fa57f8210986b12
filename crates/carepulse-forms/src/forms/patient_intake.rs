//! Patient intake: the "get started" form creating a user

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{EMAIL_ICON, USER_ICON};
use crate::domain::{FieldKind, FieldSpec, FieldValue, Icon, NewUser, UserRecord};
use crate::error::Result;
use crate::form::schemas::user_schema;
use crate::form::{FormController, FormState};
use crate::navigation::{Navigator, Route};
use crate::ports::PersistenceGateway;
use crate::submission::{SubmissionController, SubmitOutcome};

use super::FormView;

pub struct PatientIntakeForm {
    controller: FormController,
    submission: SubmissionController,
}

impl PatientIntakeForm {
    pub fn new() -> Result<Self> {
        let defaults: BTreeMap<String, FieldValue> = ["name", "email", "phone"]
            .into_iter()
            .map(|name| (name.to_string(), FieldValue::text("")))
            .collect();

        Ok(Self {
            controller: FormController::new(Self::fields(), Arc::new(user_schema()), defaults)?,
            submission: SubmissionController::new(),
        })
    }

    pub fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new(FieldKind::TextInput, "name")
                .label("Full Name")
                .placeholder("Roumodip Das")
                .icon(Icon::new(USER_ICON, "user")),
            FieldSpec::new(FieldKind::TextInput, "email")
                .label("Email")
                .placeholder("rdas567@gmail.com")
                .icon(Icon::new(EMAIL_ICON, "email")),
            FieldSpec::new(FieldKind::PhoneInput, "phone")
                .label("Phone Number")
                .placeholder("8966620102"),
        ]
    }

    pub fn payload(state: &FormState) -> NewUser {
        NewUser {
            name: state.text("name"),
            email: state.text("email"),
            phone: state.text("phone"),
        }
    }

    /// Validate, create the user and continue to registration
    pub async fn submit(
        &mut self,
        gateway: &dyn PersistenceGateway,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome<UserRecord> {
        if !self.controller.validate() {
            return SubmitOutcome::Invalid(self.controller.errors().clone());
        }

        let state = self.controller.state();
        let outcome = self
            .submission
            .run(
                "createUser",
                || Ok(Self::payload(state)),
                |user| async move {
                    gateway.create_user(user).await.map(|created| {
                        created.filter(|u| {
                            if u.id.is_empty() {
                                tracing::error!("created user has no id, not redirecting");
                            }
                            !u.id.is_empty()
                        })
                    })
                },
            )
            .await;

        if let SubmitOutcome::Completed(user) = &outcome {
            navigator.push(Route::PatientRegister {
                user_id: user.id.clone(),
            });
            self.controller.reset();
        }
        outcome
    }
}

impl FormView for PatientIntakeForm {
    fn title(&self) -> &str {
        "Hi patients!! 👋"
    }

    fn subtitle(&self) -> Option<&str> {
        Some("Get started with appointments.")
    }

    fn submit_label(&self) -> &str {
        "Get Started"
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

//! Appointment commands

use serde::Serialize;

use carepulse_forms::catalog::status_icon;
use carepulse_forms::{
    AppointmentForm, AppointmentKind, AppointmentRecord, EntityId, FormView, PersistenceGateway,
};

use super::{settle, Context};
use crate::output::success;
use crate::AppointmentCommands;

/// Appointment as printed, with the badge icon of its status
#[derive(Serialize)]
struct AppointmentView<'a> {
    #[serde(flatten)]
    appointment: &'a AppointmentRecord,
    status_icon: &'static str,
}

impl<'a> From<&'a AppointmentRecord> for AppointmentView<'a> {
    fn from(appointment: &'a AppointmentRecord) -> Self {
        Self {
            appointment,
            status_icon: status_icon(appointment.status),
        }
    }
}

pub fn print_appointment(ctx: &Context, appointment: &AppointmentRecord) {
    ctx.format.print(&AppointmentView::from(appointment));
}

async fn fetch(gateway: &dyn PersistenceGateway, id: &str) -> Result<AppointmentRecord, String> {
    gateway
        .get_appointment(&EntityId::from_string(id))
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("appointment {} not found", id))
}

pub async fn handle(action: AppointmentCommands, ctx: &Context) -> Result<(), String> {
    let gateway = ctx.gateway.as_ref();

    match action {
        AppointmentCommands::Create {
            user_id,
            patient_id,
            doctor,
            schedule,
            reason,
            note,
        } => {
            let mut form = AppointmentForm::new(
                AppointmentKind::Create,
                EntityId::from_string(user_id),
                Some(EntityId::from_string(patient_id)),
                None,
            )
            .map_err(|e| e.to_string())?;

            let controller = form.controller_mut();
            let mut inputs = vec![("primaryPhysician", doctor), ("schedule", schedule), ("reason", reason)];
            inputs.extend(note.map(|n| ("note", n)));
            for (field, raw) in inputs {
                controller.input(field, &raw).map_err(|e| e.to_string())?;
            }

            let appointment = settle(form.submit(gateway, &ctx.navigator).await)?;
            success(&format!("Requested appointment {}", appointment.id));
            print_appointment(ctx, &appointment);
        }
        AppointmentCommands::Schedule {
            user_id,
            appointment_id,
            doctor,
            schedule,
            reason,
        } => {
            let existing = fetch(gateway, &appointment_id).await?;
            let mut form = AppointmentForm::new(
                AppointmentKind::Schedule,
                EntityId::from_string(user_id),
                None,
                Some(existing),
            )
            .map_err(|e| e.to_string())?;

            let controller = form.controller_mut();
            let inputs = [("primaryPhysician", doctor), ("schedule", schedule), ("reason", reason)];
            for (field, raw) in inputs.into_iter().filter_map(|(f, v)| v.map(|v| (f, v))) {
                controller.input(field, &raw).map_err(|e| e.to_string())?;
            }

            let appointment = settle(form.submit(gateway, &ctx.navigator).await)?;
            success(&format!("Scheduled appointment {}", appointment.id));
            print_appointment(ctx, &appointment);
        }
        AppointmentCommands::Cancel {
            user_id,
            appointment_id,
            reason,
        } => {
            let existing = fetch(gateway, &appointment_id).await?;
            let mut form = AppointmentForm::new(
                AppointmentKind::Cancel,
                EntityId::from_string(user_id),
                None,
                Some(existing),
            )
            .map_err(|e| e.to_string())?;
            form.controller_mut()
                .input("cancellationReason", &reason)
                .map_err(|e| e.to_string())?;

            let appointment = settle(form.submit(gateway, &ctx.navigator).await)?;
            success(&format!("Cancelled appointment {}", appointment.id));
            print_appointment(ctx, &appointment);
        }
        AppointmentCommands::Get { id } => {
            let appointment = fetch(gateway, &id).await?;
            print_appointment(ctx, &appointment);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carepulse_forms::AppointmentStatus;

    #[test]
    fn test_view_carries_status_icon() {
        let appointment = AppointmentRecord {
            id: EntityId::from_string("appt-1"),
            user_id: EntityId::from_string("user-1"),
            patient: EntityId::from_string("patient-1"),
            primary_physician: "Aditi Das".into(),
            schedule: "2024-07-01T09:30:00Z".parse().unwrap(),
            reason: "Annual check-up".into(),
            status: AppointmentStatus::Cancelled,
            note: None,
            cancellation_reason: Some("Urgent meeting came up".into()),
        };

        let value = serde_json::to_value(AppointmentView::from(&appointment)).unwrap();
        assert_eq!(value["statusIcon"], "/assets/icons/cancelled.svg");
        assert_eq!(value["primaryPhysician"], "Aditi Das");
    }
}

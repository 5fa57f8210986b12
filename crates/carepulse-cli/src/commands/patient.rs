//! Patient commands

use carepulse_forms::{
    EntityId, FieldValue, FormView, PatientIntakeForm, PersistenceGateway, RegistrationForm,
};

use super::{apply_values, read_document, settle, Context};
use crate::output::success;
use crate::PatientCommands;

pub async fn handle(action: PatientCommands, ctx: &Context) -> Result<(), String> {
    let gateway = ctx.gateway.as_ref();

    match action {
        PatientCommands::Intake { name, email, phone } => {
            let mut form = PatientIntakeForm::new().map_err(|e| e.to_string())?;
            let controller = form.controller_mut();
            for (field, raw) in [("name", name), ("email", email), ("phone", phone)] {
                controller.input(field, &raw).map_err(|e| e.to_string())?;
            }

            let user = settle(form.submit(gateway, &ctx.navigator).await)?;
            success(&format!("Created user {}", user.id));
            ctx.format.print(&user);
        }
        PatientCommands::Register { user_id, values, document } => {
            let user_id = EntityId::from_string(user_id);
            let user = gateway
                .get_user(&user_id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("user {} not found", user_id))?;

            let mut form = RegistrationForm::new(user.clone()).map_err(|e| e.to_string())?;
            let controller = form.controller_mut();
            for (field, raw) in [("name", &user.name), ("email", &user.email), ("phone", &user.phone)] {
                controller.input(field, raw).map_err(|e| e.to_string())?;
            }
            apply_values(controller, &values)?;
            if let Some(path) = document {
                let file = read_document(&path)?;
                controller
                    .change("identificationDocument", FieldValue::Files(vec![file]))
                    .map_err(|e| e.to_string())?;
            }

            let patient = settle(form.submit(gateway, &ctx.navigator).await)?;
            success(&format!("Registered patient {}", patient.id));
            ctx.format.print(&patient);
        }
        PatientCommands::Get { user_id } => {
            let patient = gateway
                .get_patient(&EntityId::from_string(user_id.clone()))
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("no patient registered for user {}", user_id))?;
            ctx.format.print(&patient);
        }
    }
    Ok(())
}

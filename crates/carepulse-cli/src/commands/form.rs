//! Form commands

use serde::Serialize;
use tabled::Tabled;

use carepulse_forms::{
    AppointmentForm, AppointmentKind, EntityId, FieldUnit, FormView, PatientIntakeForm,
    RegistrationForm, UserRecord,
};

use super::Context;
use crate::{AppointmentVariant, FormCommands, FormName};

#[derive(Serialize, Tabled)]
struct FieldRow {
    name: String,
    kind: &'static str,
    label: String,
    widget: String,
    value: String,
}

impl From<&FieldUnit> for FieldRow {
    fn from(unit: &FieldUnit) -> Self {
        Self {
            name: unit.name.clone(),
            kind: unit.kind.tag(),
            label: unit.label.clone().unwrap_or_default(),
            widget: unit
                .widget
                .as_ref()
                .map(|w| w.kind_name().to_string())
                .unwrap_or_else(|| "-".into()),
            value: unit
                .widget
                .as_ref()
                .map(|w| w.display_value())
                .unwrap_or_default(),
        }
    }
}

impl From<AppointmentVariant> for AppointmentKind {
    fn from(variant: AppointmentVariant) -> Self {
        match variant {
            AppointmentVariant::Create => AppointmentKind::Create,
            AppointmentVariant::Schedule => AppointmentKind::Schedule,
            AppointmentVariant::Cancel => AppointmentKind::Cancel,
        }
    }
}

pub async fn handle(action: FormCommands, ctx: &Context) -> Result<(), String> {
    match action {
        FormCommands::Show { form, kind } => {
            let view: Box<dyn FormView> = match form {
                FormName::Intake => Box::new(PatientIntakeForm::new().map_err(|e| e.to_string())?),
                FormName::Registration => Box::new(
                    RegistrationForm::new(placeholder_user()).map_err(|e| e.to_string())?,
                ),
                FormName::Appointment => Box::new(
                    AppointmentForm::new(kind.into(), EntityId::new(), None, None)
                        .map_err(|e| e.to_string())?,
                ),
            };

            println!("{}", view.title());
            if let Some(subtitle) = view.subtitle() {
                println!("{}", subtitle);
            }
            let rows: Vec<FieldRow> = view.controller().render().iter().map(FieldRow::from).collect();
            ctx.format.print_rows(&rows);
            println!("[{}]", view.submit_label());
        }
    }
    Ok(())
}

fn placeholder_user() -> UserRecord {
    UserRecord {
        id: EntityId::new(),
        name: String::new(),
        email: String::new(),
        phone: String::new(),
    }
}

//! Offline walk-through of the patient journey

use colored::Colorize;
use std::sync::Arc;

use carepulse_forms::gate::codec;
use carepulse_forms::{
    AccessGate, AdminPasskey, AppointmentForm, AppointmentKind, FieldValue, FileAttachment, FormView,
    InMemoryCredentialStore, InMemoryPersistence, PatientIntakeForm, RegistrationForm,
};

use super::appointment::print_appointment;
use super::{apply_values, settle, Context};

const DEMO_PASSKEY: &str = "111111";

fn step(title: &str) {
    println!("\n{}", title.bold().underline());
}

pub async fn run(ctx: &Context) -> Result<(), String> {
    let gateway = InMemoryPersistence::new();
    let navigator = &ctx.navigator;

    step("1. Patient intake");
    let mut intake = PatientIntakeForm::new().map_err(|e| e.to_string())?;
    apply_values(
        intake.controller_mut(),
        &[
            "name=Roumodip Das".into(),
            "email=rdas567@gmail.com".into(),
            "phone=8966620102".into(),
        ],
    )?;
    let user = settle(intake.submit(&gateway, navigator).await)?;
    ctx.format.print(&user);

    step("2. Registration");
    let mut registration = RegistrationForm::new(user.clone()).map_err(|e| e.to_string())?;
    apply_values(
        registration.controller_mut(),
        &[
            format!("name={}", user.name),
            format!("email={}", user.email),
            format!("phone={}", user.phone),
            "birthDate=1995-04-12".into(),
            "gender=male".into(),
            "address=14 street, Kolkata".into(),
            "occupation=Software Engineer".into(),
            "emergencyContactName=Mita Das".into(),
            "emergencyContactNumber=8966620103".into(),
            "primaryPhysician=Aditi Das".into(),
            "insuranceProvider=BlueCross BlueShield".into(),
            "insurancePolicyNumber=ABC123456789".into(),
            "identificationNumber=123456789".into(),
            "treatmentConsent=true".into(),
            "disclosureConsent=true".into(),
            "privacyConsent=true".into(),
        ],
    )?;
    registration
        .controller_mut()
        .change(
            "identificationDocument",
            FieldValue::Files(vec![FileAttachment::new(
                "birth-certificate.png",
                "image/png",
                b"demo document".to_vec(),
            )]),
        )
        .map_err(|e| e.to_string())?;
    let patient = settle(registration.submit(&gateway, navigator).await)?;
    ctx.format.print(&patient);

    step("3. New appointment");
    let mut request = AppointmentForm::new(
        AppointmentKind::Create,
        user.id.clone(),
        Some(patient.id.clone()),
        None,
    )
    .map_err(|e| e.to_string())?;
    apply_values(
        request.controller_mut(),
        &[
            "primaryPhysician=Aditi Das".into(),
            "schedule=2024-07-01T09:30".into(),
            "reason=Annual monthly check-up".into(),
            "note=Prefer afternoon appointments, if possible".into(),
        ],
    )?;
    let appointment = settle(request.submit(&gateway, navigator).await)?;
    print_appointment(ctx, &appointment);

    step("4. Admin access");
    let mut gate = AccessGate::new(
        AdminPasskey::new(DEMO_PASSKEY).map_err(|e| e.to_string())?,
        Arc::new(InMemoryCredentialStore::new()),
    );
    gate.mount(navigator);
    gate.set_input("000000");
    gate.submit(navigator).map_err(|e| e.to_string())?;
    println!("{}", gate.error().unwrap_or_default().red());
    gate.set_input(DEMO_PASSKEY);
    gate.submit(navigator).map_err(|e| e.to_string())?;
    println!("stored credential: {}", codec::encode(DEMO_PASSKEY));

    step("5. Schedule");
    let mut schedule = AppointmentForm::new(
        AppointmentKind::Schedule,
        user.id.clone(),
        None,
        Some(appointment.clone()),
    )
    .map_err(|e| e.to_string())?;
    apply_values(schedule.controller_mut(), &["schedule=2024-07-02T15:00".into()])?;
    let scheduled = settle(schedule.submit(&gateway, navigator).await)?;
    print_appointment(ctx, &scheduled);

    step("6. Cancel");
    let mut cancel = AppointmentForm::new(AppointmentKind::Cancel, user.id.clone(), None, Some(scheduled))
        .map_err(|e| e.to_string())?;
    apply_values(
        cancel.controller_mut(),
        &["cancellationReason=Urgent meeting came up".into()],
    )?;
    let cancelled = settle(cancel.submit(&gateway, navigator).await)?;
    print_appointment(ctx, &cancelled);

    Ok(())
}

//! CLI Commands

pub mod admin;
pub mod appointment;
pub mod config;
pub mod demo;
pub mod form;
pub mod patient;

use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use carepulse_forms::{
    AdminPasskey, FileAttachment, FormController, HttpPersistence, Navigator, Route, SubmitOutcome,
};

use crate::output::{self, OutputFormat};

/// Settings and adapters shared by every command
pub struct Context {
    pub gateway: Arc<HttpPersistence>,
    pub admin_passkey: Option<String>,
    pub format: OutputFormat,
    pub navigator: PrintNavigator,
}

impl Context {
    pub fn new(api_url: &str, api_key: Option<&str>, admin_passkey: Option<String>, format: OutputFormat) -> Self {
        Self {
            gateway: Arc::new(HttpPersistence::new(api_url, api_key)),
            admin_passkey,
            format,
            navigator: PrintNavigator,
        }
    }

    pub fn passkey(&self) -> Result<AdminPasskey, String> {
        match &self.admin_passkey {
            Some(passkey) => AdminPasskey::new(passkey.clone()).map_err(|e| e.to_string()),
            None => AdminPasskey::from_env().map_err(|e| e.to_string()),
        }
    }
}

/// Reports navigation on stderr instead of switching pages
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn push(&self, route: Route) {
        eprintln!("{} {}", "→".cyan(), route.path().as_str().bold());
    }
}

/// Turn a submit outcome into the record or a printable error
pub fn settle<R: Serialize>(outcome: SubmitOutcome<R>) -> Result<R, String> {
    match outcome {
        SubmitOutcome::Completed(record) => Ok(record),
        SubmitOutcome::Invalid(errors) => {
            output::print_errors(&errors);
            Err(format!("form has {} invalid field(s)", errors.len()))
        }
        SubmitOutcome::Busy => Err("a submission is already in progress".into()),
        SubmitOutcome::Failed(reason) => Err(reason),
    }
}

/// Apply `name=value` pairs as raw input
pub fn apply_values(controller: &mut FormController, pairs: &[String]) -> Result<(), String> {
    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", pair))?;
        controller.input(name.trim(), raw).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn read_document(path: &Path) -> Result<FileAttachment, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    Ok(FileAttachment::new(file_name, mime_type(path), bytes))
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carepulse_forms::PatientIntakeForm;
    use carepulse_forms::FormView;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type(Path::new("scan.PNG")), "image/png");
        assert_eq!(mime_type(Path::new("id.pdf")), "application/pdf");
        assert_eq!(mime_type(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_apply_values() {
        let mut form = PatientIntakeForm::new().unwrap();
        apply_values(
            form.controller_mut(),
            &["name=Roumodip Das".to_string(), "email=rdas567@gmail.com".to_string()],
        )
        .unwrap();
        assert_eq!(form.controller().state().text("name"), "Roumodip Das");

        let err = apply_values(form.controller_mut(), &["name".to_string()]).unwrap_err();
        assert!(err.contains("NAME=VALUE"));
        assert!(apply_values(form.controller_mut(), &["age=3".to_string()]).is_err());
    }
}

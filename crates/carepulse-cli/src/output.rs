//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use carepulse_forms::FieldErrors;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// One `field | value` line of a record table
#[derive(Tabled)]
struct Entry {
    field: String,
    value: String,
}

impl OutputFormat {
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Table => {
                let value = serde_json::to_value(data).unwrap_or_default();
                println!("{}", record_table(&value));
            }
        }
    }

    /// Print rows; tables use the row type's columns
    pub fn print_rows<T: Serialize + Tabled>(&self, rows: &[T]) {
        match self {
            OutputFormat::Table => {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            _ => self.print(&rows),
        }
    }
}

fn record_table(value: &serde_json::Value) -> String {
    let entries: Vec<Entry> = match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(field, value)| Entry {
                field: field.clone(),
                value: scalar(value),
            })
            .collect(),
        other => vec![Entry {
            field: "value".into(),
            value: scalar(other),
        }],
    };
    Table::new(entries).with(Style::rounded()).to_string()
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".into(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        eprintln!("  {} {}", format!("{}:", field).as_str().bold(), message.as_str().red());
    }
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

//! CarePulse CLI
//!
//! Command-line host for the CarePulse patient forms and admin gate.
//!
//! # Usage
//!
//! ```bash
//! carepulse form show registration
//! carepulse patient intake --name "Roumodip Das" --email rdas567@gmail.com --phone 8966620102
//! carepulse patient register --user-id <id> -s gender=female -s address="14 street" --document id.png
//! carepulse appointment create --user-id <id> --patient-id <id> --doctor "Aditi Das" --schedule 2024-07-01T09:30 --reason "Annual check-up"
//! carepulse appointment cancel --user-id <id> --appointment-id <id> --reason "Urgent meeting came up"
//! carepulse admin login --passkey 123456
//! carepulse demo --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carepulse_forms::config::{DEFAULT_API_URL, ENV_ADMIN_PASSKEY, ENV_API_URL};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "carepulse")]
#[command(author = "CarePulse")]
#[command(version = "0.1.0")]
#[command(about = "CarePulse Command Line Interface", long_about = None)]
struct Cli {
    /// Persistence API base URL
    #[arg(long, env = ENV_API_URL)]
    api_url: Option<String>,

    /// API key for authentication
    #[arg(long, env = "CAREPULSE_API_KEY")]
    api_key: Option<String>,

    /// Expected admin passkey
    #[arg(long, env = ENV_ADMIN_PASSKEY, hide_env_values = true)]
    admin_passkey: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect form layouts
    Form {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Patient intake and registration
    Patient {
        #[command(subcommand)]
        action: PatientCommands,
    },
    /// Request, schedule and cancel appointments
    Appointment {
        #[command(subcommand)]
        action: AppointmentCommands,
    },
    /// Admin access gate
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Walk through the whole patient journey against an in-memory store
    Demo,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormName {
    Intake,
    Registration,
    Appointment,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AppointmentVariant {
    Create,
    Schedule,
    Cancel,
}

#[derive(Subcommand)]
enum FormCommands {
    /// Show the fields of a form and their widgets
    Show {
        form: FormName,
        /// Appointment form variant
        #[arg(long, value_enum, default_value = "create")]
        kind: AppointmentVariant,
    },
}

#[derive(Subcommand)]
enum PatientCommands {
    /// Create a user from name, email and phone
    Intake {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Register the patient profile of a user
    Register {
        #[arg(long)]
        user_id: String,
        /// Field value as name=value, repeatable
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
        /// Scanned identification document
        #[arg(long)]
        document: Option<std::path::PathBuf>,
    },
    /// Show a user's patient profile
    Get { user_id: String },
}

#[derive(Subcommand)]
enum AppointmentCommands {
    /// Request a new appointment
    Create {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        doctor: String,
        /// Date and time, e.g. 2024-07-01T09:30
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Schedule a pending appointment
    Schedule {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        appointment_id: String,
        #[arg(long)]
        doctor: Option<String>,
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Cancel an appointment
    Cancel {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        appointment_id: String,
        #[arg(long)]
        reason: String,
    },
    /// Get appointment details
    Get { id: String },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Enter the admin passkey
    Login {
        #[arg(long)]
        passkey: String,
    },
    /// Check whether a stored credential unlocks the admin area
    Status,
    /// Forget the stored credential
    Logout,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let api_url = cli
        .api_url
        .or(config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_key = cli.api_key.or(config.api_key.clone());
    let admin_passkey = cli.admin_passkey.or(config.admin_passkey.clone());
    let format = cli.format.or(config.format()).unwrap_or_default();

    let ctx = commands::Context::new(&api_url, api_key.as_deref(), admin_passkey, format);

    let result = match cli.command {
        Commands::Form { action } => commands::form::handle(action, &ctx).await,
        Commands::Patient { action } => commands::patient::handle(action, &ctx).await,
        Commands::Appointment { action } => commands::appointment::handle(action, &ctx).await,
        Commands::Admin { action } => commands::admin::handle(action, &ctx).await,
        Commands::Demo => commands::demo::run(&ctx).await,
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Config commands

use crate::config::Config;
use crate::ConfigCommands;

fn masked(value: &str) -> String {
    format!("{}****", value.chars().take(2).collect::<String>())
}

pub async fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            match key.as_str() {
                "api_url" => config.api_url = Some(value),
                "api_key" => config.api_key = Some(value),
                "admin_passkey" => config.admin_passkey = Some(value),
                "default_format" => config.default_format = Some(value),
                _ => return Err(format!("Unknown config key: {}", key)),
            }
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile).unwrap_or_default();
            let value = match key.as_str() {
                "api_url" => config.api_url,
                "api_key" => config.api_key.as_deref().map(masked),
                "admin_passkey" => config.admin_passkey.as_deref().map(masked),
                "default_format" => config.default_format,
                _ => return Err(format!("Unknown config key: {}", key)),
            };
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile).unwrap_or_default();
            let not_set = || "(not set)".to_string();
            println!("api_url: {}", config.api_url.unwrap_or_else(not_set));
            println!("api_key: {}", config.api_key.as_deref().map(masked).unwrap_or_else(not_set));
            println!(
                "admin_passkey: {}",
                config.admin_passkey.as_deref().map(masked).unwrap_or_else(not_set)
            );
            println!("default_format: {}", config.default_format.unwrap_or_else(not_set));
        }
    }
    Ok(())
}

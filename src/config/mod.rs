use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::services::validator::IntakePolicy;

/// Service configuration loaded from environment variables, with defaults
/// suitable for a single-tenant deployment.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    /// Upload size ceiling in megabytes.
    pub max_file_size_mb: u64,
    /// Upload page-count ceiling.
    pub max_pages: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    info!("DATABASE_PATH not set, using default: intake.db");
                    PathBuf::from("intake.db")
                }),
            upload_dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|_| {
                info!("UPLOAD_DIR not set, using default: uploads");
                PathBuf::from("uploads")
            }),
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 1)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            max_pages: Self::parse_env_var("MAX_PAGES", 3).context("Failed to parse MAX_PAGES")?,
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    /// The upload acceptance policy derived from this configuration.
    pub fn intake_policy(&self) -> IntakePolicy {
        IntakePolicy {
            max_file_size: self.max_file_size_mb * 1024 * 1024,
            max_pages: self.max_pages,
            upload_dir: self.upload_dir.clone(),
        }
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using default: {:?})",
                        var_name, e, default
                    );
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_pages == 0 {
            return Err(anyhow::anyhow!("MAX_PAGES must be greater than 0"));
        }
        Ok(())
    }
}

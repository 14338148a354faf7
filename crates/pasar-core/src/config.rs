//! Configuration module
//!
//! Environment-driven configuration for the upload service. Values come from
//! the process environment (optionally loaded from `.env` by the binary) with
//! constant defaults, so tests can construct a `Config` directly and point
//! the storage root at an isolated temporary directory.

use std::env;
use std::path::PathBuf;

use crate::constants::{ALLOWED_IMAGE_CONTENT_TYPES, ALLOWED_IMAGE_EXTENSIONS};
use crate::validation::UploadPolicy;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;
const DEFAULT_STORAGE_ROOT: &str = "public";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:4000";

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Public-servable root directory; stored references resolve against it.
    pub storage_root: PathBuf,
    /// Host prefix consumers use to turn stored references into fetchable URLs.
    pub public_base_url: String,
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let allowed_extensions = parse_csv_list(
            &env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| ALLOWED_IMAGE_EXTENSIONS.join(",")),
        );

        let allowed_content_types = parse_csv_list(
            &env::var("ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| ALLOWED_IMAGE_CONTENT_TYPES.join(",")),
        );

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: parse_csv_list(&cors_origins_str),
            environment,
            storage_root: PathBuf::from(
                env::var("STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string()),
            ),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_content_types,
        })
    }

    /// Build the upload policy the validator enforces. Keeping this derived
    /// from the config means the declarative HTTP limits and the validator
    /// cannot drift apart.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_size_bytes: self.max_file_size_bytes,
            allowed_content_types: self.allowed_content_types.clone(),
            allowed_extensions: self.allowed_extensions.clone(),
        }
    }
}

fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

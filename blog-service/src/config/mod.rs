use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_MONGODB_HOST: &str = "basicsexploring.cgr22.mongodb.net";
const DEFAULT_APP_NAME: &str = "basicsExploring";

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
}

impl BlogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_env(common_config, |key| env::var(key).ok())
    }

    /// Resolve the MongoDB settings through `lookup`. `MONGODB_URI` wins over
    /// the credential variables.
    pub fn from_env(
        common: core_config::Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let uri = match lookup("MONGODB_URI") {
            Some(uri) => uri,
            None => {
                let user = required(&lookup, "DB_USER")?;
                let password = Secret::new(required(&lookup, "DB_USER_PASSWORD")?);
                let host =
                    lookup("MONGODB_HOST").unwrap_or_else(|| DEFAULT_MONGODB_HOST.to_string());
                atlas_uri(&user, &password, &host)
            }
        };

        Ok(BlogConfig {
            common,
            mongodb: MongoConfig {
                uri: Secret::new(uri),
                database: lookup("MONGODB_DATABASE")
                    .unwrap_or_else(|| "blogCollection".to_string()),
                collection: lookup("MONGODB_COLLECTION").unwrap_or_else(|| "blogs".to_string()),
            },
        })
    }
}

/// Build an Atlas SRV connection string from credentials.
pub fn atlas_uri(user: &str, password: &Secret<String>, host: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
        urlencoding::encode(user),
        urlencoding::encode(password.expose_secret()),
        host,
        DEFAULT_APP_NAME
    )
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    lookup(key).ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!(
            "{} is required when MONGODB_URI is not set",
            key
        ))
    })
}

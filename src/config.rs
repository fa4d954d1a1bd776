use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use validator::Validate;

use crate::api::{CredentialProvider, NoCredentials, StaticToken};
use crate::domain::value_objects::PageSize;
use crate::{Result, StorefrontError};

#[derive(Clone, Debug, Validate)]
pub struct StorefrontConfig {
    #[validate(url)]
    pub api_url: String,
    pub api_token: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl StorefrontConfig {
    /// Reads `STOREFRONT_*` variables; call `dotenvy::dotenv()` first to pick up a `.env`.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("STOREFRONT_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| StorefrontError::Config("STOREFRONT_API_URL is not set".into()))?;
        let config = Self {
            api_url,
            api_token: lookup("STOREFRONT_API_TOKEN").filter(|v| !v.is_empty()),
            page_size: try_load(&lookup, "STOREFRONT_PAGE_SIZE", 12)?,
            timeout_secs: try_load(&lookup, "STOREFRONT_TIMEOUT_SECS", 30)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match &self.api_token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(NoCredentials),
        }
    }

    pub fn page_size(&self) -> PageSize { PageSize::new(self.page_size) }
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| StorefrontError::Config(format!("invalid {key} value {raw:?}: {e}"))),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

//! Configuration module
//!
//! The address prefix is the public base URL of the object store (for example
//! `https://bucket.s3.us-west-2.amazonaws.com`). It is used both to build asset URLs
//! and to recognize and strip that prefix when decoding stored URLs.

use std::env;

use crate::error::KeyError;

const URL_PREFIX_VAR: &str = "ASSET_URL_PREFIX";
const LEGACY_URL_PREFIX_VAR: &str = "S3_URL_PREFIX";

/// Asset key configuration
#[derive(Clone, Debug)]
pub struct Config {
    url_prefix: String,
    local_storage_path: Option<String>,
}

impl Config {
    /// Build a configuration from an explicit address prefix.
    pub fn new(url_prefix: impl AsRef<str>) -> Result<Self, KeyError> {
        let config = Config {
            url_prefix: clean_prefix(url_prefix.as_ref()),
            local_storage_path: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, KeyError> {
        Self::from_env_if_set()?.ok_or_else(|| {
            tracing::error!(
                "{} (or {}) is not defined",
                URL_PREFIX_VAR,
                LEGACY_URL_PREFIX_VAR
            );
            KeyError::Configuration(format!(
                "{} or {} must be set",
                URL_PREFIX_VAR, LEGACY_URL_PREFIX_VAR
            ))
        })
    }

    /// Like [`Config::from_env`], but an unset prefix yields `Ok(None)` without logging.
    ///
    /// A prefix that is set but empty is still an error.
    pub fn from_env_if_set() -> Result<Option<Self>, KeyError> {
        dotenvy::dotenv().ok();

        let Ok(url_prefix) = env::var(URL_PREFIX_VAR).or_else(|_| env::var(LEGACY_URL_PREFIX_VAR))
        else {
            return Ok(None);
        };

        let config = Config {
            url_prefix: clean_prefix(&url_prefix),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        config.validate()?;
        Ok(Some(config))
    }

    pub fn with_local_storage_path(mut self, path: impl Into<String>) -> Self {
        self.local_storage_path = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<(), KeyError> {
        if self.url_prefix.is_empty() {
            return Err(KeyError::Configuration(format!(
                "{} must not be empty",
                URL_PREFIX_VAR
            )));
        }
        Ok(())
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }
}

fn clean_prefix(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

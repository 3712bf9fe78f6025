//! Classifier endpoint configuration.

use serde::{Deserialize, Serialize};

/// Name of the environment variable holding the endpoint URL, read at
/// compile time by the web app and at runtime by the CLI.
pub const ENDPOINT_ENV: &str = "DEBRIS_CLASSIFIER_ENDPOINT";

/// Where the classification service listens when nothing else is
/// configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// Settings for talking to the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Full URL of the `POST` prediction endpoint.
    pub endpoint: String,
}

impl ClassifierConfig {
    /// Build a config from an optional environment value.
    ///
    /// A missing or blank value selects [`DEFAULT_ENDPOINT`].
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        let endpoint = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);
        Self {
            endpoint: endpoint.to_owned(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::from_env_value(None)
    }
}

use super::error::{RestDaoError, RestResult};

/// Runtime configuration describing how to reach the hosted REST API.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the REST endpoint (e.g. `https://xyz.example.co/rest/v1`).
    pub base_url: String,
    /// API key sent both as `apikey` and as a bearer token.
    pub api_key: String,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> RestResult<Self> {
        let base_url = std::env::var("PENA_REST_URL").map_err(|_| RestDaoError::MissingEnvVar {
            var: "PENA_REST_URL",
        })?;
        let api_key =
            std::env::var("PENA_REST_API_KEY").map_err(|_| RestDaoError::MissingEnvVar {
                var: "PENA_REST_API_KEY",
            })?;

        Ok(Self::new(base_url, api_key))
    }
}

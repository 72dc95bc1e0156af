//! API client configuration from environment variables.

use url::Url;

/// Variable holding the backend base URL.
pub const API_URL_VAR: &str = "TASKDECK_API_URL";
/// Used when [`API_URL_VAR`] is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL must be http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Where the task API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self { base_url: parsed })
    }

    /// Resolve the base URL from the environment.
    ///
    /// Native builds read `.env` and the process environment, falling back to
    /// the value baked in at compile time. Browser builds only have the
    /// compile-time value.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        let value = {
            dotenvy::dotenv().ok();
            std::env::var(API_URL_VAR)
                .ok()
                .or_else(|| option_env!("TASKDECK_API_URL").map(str::to_string))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        };
        #[cfg(target_arch = "wasm32")]
        let value = option_env!("TASKDECK_API_URL")
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        Self::new(value.trim())
    }

    /// Absolute URL for an endpoint path such as `/api/v1/tasks`.
    ///
    /// The path is appended rather than resolved, so a base URL with a path
    /// prefix (`https://host/backend`) keeps it.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_to_base_path() {
        let config = ApiConfig::new("https://example.com/backend/").unwrap();
        assert_eq!(
            config.endpoint("/api/v1/tasks"),
            "https://example.com/backend/api/v1/tasks"
        );

        let root = ApiConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            root.endpoint("/api/v1/auth/login"),
            "http://localhost:3000/api/v1/auth/login"
        );
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}

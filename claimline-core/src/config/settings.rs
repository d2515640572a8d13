use std::env;
use std::path::PathBuf;

/// Load .env file if it exists (called automatically when using `from_env`)
pub fn load_dotenv() {
    // Silently ignore errors (file might not exist)
    let _ = dotenvy::dotenv();
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the chat gateway, used by the session client
    /// (default: http://127.0.0.1:8787)
    pub api_base_url: String,
    /// Gateway bind host (default: 127.0.0.1)
    pub gateway_host: String,
    /// Gateway bind port (default: 8787)
    pub gateway_port: u16,
    /// OpenAI-compatible chat provider base URL (required by the gateway)
    pub provider_base_url: Option<String>,
    /// Provider API key, when the endpoint requires one
    pub provider_api_key: Option<String>,
    /// Provider model id (default: gpt-4o-mini)
    pub provider_model: String,
    /// Override for the SQLite database path
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function automatically loads a .env file from the project root if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from env without loading .env
    fn from_env_inner() -> Result<Self, ConfigError> {
        let gateway_host =
            env::var("CLAIMLINE_GATEWAY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let gateway_port = match env::var("CLAIMLINE_GATEWAY_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("CLAIMLINE_GATEWAY_PORT", raw))?,
            Err(_) => 8787,
        };

        Ok(Self {
            api_base_url: env::var("CLAIMLINE_API_URL")
                .unwrap_or_else(|_| format!("http://{}:{}", gateway_host, gateway_port)),
            gateway_host,
            gateway_port,
            provider_base_url: env::var("CLAIMLINE_PROVIDER_URL").ok(),
            provider_api_key: env::var("CLAIMLINE_PROVIDER_API_KEY").ok(),
            provider_model: env::var("CLAIMLINE_PROVIDER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            db_path: env::var("CLAIMLINE_DB_PATH").ok().map(PathBuf::from),
        })
    }

    /// Get the HTTP bind address for the gateway
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway_host, self.gateway_port)
    }

    /// Provider base URL, or an error naming the missing variable.
    ///
    /// The gateway cannot run without a provider; the CLI and session client
    /// never need one.
    pub fn require_provider_url(&self) -> Result<&str, ConfigError> {
        self.provider_base_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("CLAIMLINE_PROVIDER_URL".to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Defaults first, then explicit values, in one test to avoid
        // parallel-test races on process-wide env vars.
        unsafe {
            env::remove_var("CLAIMLINE_API_URL");
            env::remove_var("CLAIMLINE_GATEWAY_HOST");
            env::remove_var("CLAIMLINE_GATEWAY_PORT");
            env::remove_var("CLAIMLINE_PROVIDER_URL");
            env::remove_var("CLAIMLINE_PROVIDER_API_KEY");
            env::remove_var("CLAIMLINE_PROVIDER_MODEL");
            env::remove_var("CLAIMLINE_DB_PATH");
        }

        let config = Config::from_env_inner().unwrap();
        assert_eq!(config.gateway_host, "127.0.0.1");
        assert_eq!(config.gateway_port, 8787);
        assert_eq!(config.api_base_url, "http://127.0.0.1:8787");
        assert_eq!(config.provider_model, "gpt-4o-mini");
        assert!(config.provider_base_url.is_none());
        assert!(config.require_provider_url().is_err());
        assert_eq!(config.bind_addr(), "127.0.0.1:8787");

        unsafe {
            env::set_var("CLAIMLINE_GATEWAY_HOST", "0.0.0.0");
            env::set_var("CLAIMLINE_GATEWAY_PORT", "9000");
            env::set_var("CLAIMLINE_API_URL", "https://intake.example.com");
            env::set_var("CLAIMLINE_PROVIDER_URL", "http://127.0.0.1:11434");
        }

        let config = Config::from_env_inner().unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.api_base_url, "https://intake.example.com");
        assert_eq!(config.require_provider_url().unwrap(), "http://127.0.0.1:11434");

        unsafe {
            env::set_var("CLAIMLINE_GATEWAY_PORT", "not-a-port");
        }
        assert!(matches!(
            Config::from_env_inner(),
            Err(ConfigError::InvalidVar("CLAIMLINE_GATEWAY_PORT", _))
        ));

        unsafe {
            env::remove_var("CLAIMLINE_API_URL");
            env::remove_var("CLAIMLINE_GATEWAY_HOST");
            env::remove_var("CLAIMLINE_GATEWAY_PORT");
            env::remove_var("CLAIMLINE_PROVIDER_URL");
        }
    }
}

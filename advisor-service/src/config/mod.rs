use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_MODEL: &str = "llama3-70b-8192";
const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default outbound call timeout in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub common: core_config::Config,
    pub groq: GroqConfig,
}

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// Base URL of the OpenAI-compatible API. Overridable for tests.
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl AdvisorConfig {
    /// Load configuration from the environment.
    ///
    /// `GROQ_API_KEY` has no default: a missing credential fails the load,
    /// so the process refuses to start instead of serving without one.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AdvisorConfig {
            common,
            groq: GroqConfig {
                api_key: Secret::new(get_env("GROQ_API_KEY", None, is_prod)?),
                model: get_env("GROQ_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                api_base: get_env("GROQ_API_BASE", Some(DEFAULT_API_BASE), is_prod)?,
                timeout_seconds: get_env(
                    "GROQ_TIMEOUT_SECONDS",
                    Some(&DEFAULT_TIMEOUT_SECONDS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

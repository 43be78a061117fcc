use serde::Serialize;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 5000;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

/// How `POST /plan_trip` produces plans. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerMode {
    /// Canned plan, no upstream access.
    Fixed,
    Generation,
}

impl PlannerMode {
    /// `DUMMY_MODE=true` (any case) selects the canned plan.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if value.trim().eq_ignore_ascii_case("true") => PlannerMode::Fixed,
            _ => PlannerMode::Generation,
        }
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerMode::Fixed => write!(f, "fixed"),
            PlannerMode::Generation => write!(f, "generation"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar { name: &'static str, value: String },
    Client(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
            ConfigError::InvalidVar { name, value } => {
                write!(f, "{} has an invalid value: '{}'", name, value)
            }
            ConfigError::Client(msg) => write!(f, "Failed to initialize model client: {}", msg),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: PlannerMode,
    pub openai: OpenAiConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());
        let port: u16 = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(PORT);

        let mode = PlannerMode::from_flag(lookup("DUMMY_MODE").as_deref());

        let api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        let model = lookup("OPENAI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature = match lookup("OPENAI_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or(ConfigError::InvalidVar {
                    name: "OPENAI_TEMPERATURE",
                    value: raw,
                })?,
            None => DEFAULT_TEMPERATURE,
        };
        let base_url = lookup("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        let timeout_secs = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidVar {
                    name: "OPENAI_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            mode,
            openai: OpenAiConfig {
                api_key,
                model,
                temperature,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

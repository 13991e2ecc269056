use crate::gateway::{AnthropicGateway, Gateway, GatewayError, RelayGateway};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// POST `{system, messages}` to a chat relay endpoint.
    Relay,
    /// Call the Anthropic Messages API directly.
    Anthropic,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "syrus")]
#[command(about = "SYRUS terminal chat window")]
pub struct Config {
    #[arg(long, env = "SYRUS_BACKEND", value_enum, default_value_t = Backend::Relay)]
    pub backend: Backend,

    #[arg(long, env = "SYRUS_ENDPOINT", default_value = "http://127.0.0.1:3000/api/chat")]
    pub endpoint: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = crate::gateway::ANTHROPIC_URL)]
    pub anthropic_url: String,

    #[arg(long, env = "SYRUS_MODEL", default_value = "claude-sonnet-4-20250514")]
    pub model: String,

    #[arg(long, env = "SYRUS_MAX_TOKENS", default_value_t = 1024)]
    pub max_tokens: u32,

    /// Give up on a gateway call after this many seconds. Unset waits forever.
    #[arg(long, env = "SYRUS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the anthropic backend needs ANTHROPIC_API_KEY or --anthropic-api-key")]
    MissingApiKey,
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("--max-tokens must be greater than zero")]
    ZeroMaxTokens,
    #[error("failed to build gateway: {0}")]
    Gateway(#[from] GatewayError),
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            Backend::Relay => check_url("endpoint", &self.endpoint),
            Backend::Anthropic => {
                match self.anthropic_api_key.as_deref() {
                    Some(key) if !key.trim().is_empty() => {}
                    _ => return Err(ConfigError::MissingApiKey),
                }
                if self.max_tokens == 0 {
                    return Err(ConfigError::ZeroMaxTokens);
                }
                check_url("anthropic-url", &self.anthropic_url)
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn build_gateway(&self) -> Result<Arc<dyn Gateway>, ConfigError> {
        self.validate()?;
        let gateway: Arc<dyn Gateway> = match self.backend {
            Backend::Relay => Arc::new(RelayGateway::new(self.endpoint.clone(), self.timeout())?),
            Backend::Anthropic => Arc::new(AnthropicGateway::new(
                self.anthropic_api_key.clone().unwrap_or_default(),
                self.anthropic_url.clone(),
                self.model.clone(),
                self.max_tokens,
                self.timeout(),
            )?),
        };
        Ok(gateway)
    }
}

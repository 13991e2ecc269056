//! Completion gateway boundary.
//!
//! Every failure mode (transport, status, payload) collapses into
//! [`GatewayError::Unavailable`]; the detail string is for logs only.

mod anthropic;
mod dispatch;
mod relay;

pub use anthropic::{AnthropicGateway, DEFAULT_URL as ANTHROPIC_URL};
pub use dispatch::Dispatcher;
pub use relay::RelayGateway;

use crate::conversation::{GatewayOutcome, GatewayRequest, Message};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable(detail.into())
    }

    pub(crate) fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let snippet: String = body.chars().take(200).collect();
        Self::unavailable(format!("status {status}: {snippet}"))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::unavailable(format!("malformed payload: {err}"))
    }
}

/// A service that answers a conversation with one assistant message.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<Message, GatewayError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Runs one request to completion. Never fails: errors ride inside the outcome.
pub async fn resolve(gateway: &dyn Gateway, request: GatewayRequest) -> GatewayOutcome {
    let started = std::time::Instant::now();
    let result = gateway.complete(request.system, &request.messages).await;

    match &result {
        Ok(reply) => tracing::info!(
            gateway = gateway.name(),
            ticket = request.ticket,
            history = request.messages.len(),
            reply_chars = reply.content.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "gateway replied"
        ),
        Err(err) => tracing::warn!(
            gateway = gateway.name(),
            ticket = request.ticket,
            elapsed_ms = started.elapsed().as_millis() as u64,
            error = %err,
            "gateway call failed"
        ),
    }

    GatewayOutcome {
        ticket: request.ticket,
        result,
    }
}

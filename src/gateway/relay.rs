use super::{Gateway, GatewayError};
use crate::conversation::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat relay endpoint: `{system, messages}` in, `{content}` out.
pub struct RelayGateway {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct RelayResponse {
    content: Option<String>,
}

impl RelayGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

fn parse_reply(body: &str) -> Result<Message, GatewayError> {
    let parsed: RelayResponse = serde_json::from_str(body)?;
    match parsed.content {
        Some(content) if !content.is_empty() => Ok(Message::assistant(content)),
        _ => Err(GatewayError::unavailable("reply has no content")),
    }
}

#[async_trait]
impl Gateway for RelayGateway {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<Message, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest { system, messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::status(status, &body));
        }

        parse_reply(&body)
    }

    fn name(&self) -> &str {
        "relay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    #[test]
    fn parse_reply_requires_string_content() {
        assert_eq!(
            parse_reply(r#"{"content":"Noted."}"#).expect("content should parse"),
            Message::assistant("Noted.")
        );
        assert!(parse_reply(r#"{"content":""}"#).is_err());
        assert!(parse_reply(r#"{"error":"overloaded"}"#).is_err());
        assert!(parse_reply(r#"{"content":42}"#).is_err());
        assert!(parse_reply("<html>").is_err());
    }

    #[tokio::test]
    async fn posts_system_and_history_and_reads_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat").json_body(json!({
                    "system": "be terse",
                    "messages": [
                        { "role": "assistant", "content": "SYRUS." },
                        { "role": "user", "content": "skills: writing" }
                    ]
                }));
                then.status(200).json_body(json!({ "content": "Noted." }));
            })
            .await;

        let gateway = RelayGateway::new(server.url("/api/chat"), None).expect("client should build");
        let reply = gateway
            .complete(
                "be terse",
                &[Message::assistant("SYRUS."), Message::user("skills: writing")],
            )
            .await
            .expect("relay should answer");

        mock.assert_async().await;
        assert_eq!(reply, Message::assistant("Noted."));
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable_even_with_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(500).json_body(json!({ "content": "partial" }));
            })
            .await;

        let gateway = RelayGateway::new(server.url("/api/chat"), None).expect("client should build");
        let result = gateway.complete("sys", &[Message::user("hi")]).await;
        assert!(matches!(result, Err(GatewayError::Unavailable(detail)) if detail.contains("500")));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let gateway = RelayGateway::new("http://127.0.0.1:9/api/chat", Some(Duration::from_secs(5)))
            .expect("client should build");
        let result = gateway.complete("sys", &[Message::user("hi")]).await;
        assert!(result.is_err());
    }
}

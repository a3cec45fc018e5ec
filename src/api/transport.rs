use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

/// Raw HTTP outcome handed back to the client for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a GraphQL request somewhere and returns the raw response.
pub trait Transport {
    fn send(&self, request: &GraphQlRequest<'_>) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &GraphQlRequest<'_>) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Blocking HTTPS transport with the API key attached.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: Url,
    authorization: String,
}

impl HttpTransport {
    pub fn new(endpoint: Url, api_key: &str) -> Result<Self> {
        // reqwest is built without a crypto provider; errors mean one is already installed
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("linear-analytics/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            authorization: authorization_header(api_key),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &GraphQlRequest<'_>) -> Result<HttpResponse> {
        debug!(endpoint = %self.endpoint, "POST graphql");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", &self.authorization)
            .json(request)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "graphql response");
        Ok(HttpResponse { status, body })
    }
}

/// Personal API keys go in the header as-is; OAuth tokens take a Bearer prefix.
pub fn authorization_header(api_key: &str) -> String {
    let key = api_key.trim();
    if key.starts_with("lin_api_") || key.starts_with("Bearer ") {
        key.to_string()
    } else {
        format!("Bearer {}", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authorization_header() {
        assert_eq!(authorization_header("lin_api_123"), "lin_api_123");
        assert_eq!(authorization_header("oauth-token"), "Bearer oauth-token");
        assert_eq!(authorization_header("Bearer abc"), "Bearer abc");
    }

    #[test]
    fn test_request_omits_null_variables() {
        let request = GraphQlRequest {
            query: "query { viewer { id } }",
            variables: Value::Null,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("variables").is_none());

        let request = GraphQlRequest {
            query: "query Team($id: String!) { team(id: $id) { id } }",
            variables: json!({ "id": "t1" }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["variables"]["id"], "t1");
    }
}

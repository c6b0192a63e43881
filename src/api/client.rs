use crate::api::traits::PropertyApi;
use crate::api::types::ListQuery;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{Property, PropertyId, PropertyInput};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// HTTP client for the properties REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Create a client with the default configuration (localhost:8080)
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client for a custom server
    pub fn with_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("properties-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one JSON request and normalize the answer.
    ///
    /// * 204 gives `[]` for GET and `null` for anything else.
    /// * Other 2xx bodies are parsed as JSON, kept as a JSON string when they
    ///   are not JSON, and read as `null` when empty.
    /// * Non-2xx becomes [`ClientError::Http`] with the status line plus
    ///   whatever the error body says.
    pub async fn http<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = %method, url = %url, "Sending request");

        let is_get = method == Method::GET;
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(if is_get { Value::Array(Vec::new()) } else { Value::Null });
        }

        let text = response.text().await?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)));
        }

        let message = error_message(status, &text);
        warn!(status = status.as_u16(), %message, "Request failed");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn collection_url(&self, params: &[(&'static str, String)]) -> Result<Url> {
        Url::parse_with_params(&self.endpoint, params).map_err(|e| invalid_url(&self.endpoint, e))
    }

    /// Collection URL plus the id as one percent-encoded path segment
    fn item_url(&self, id: &PropertyId) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid_url(&self.endpoint, e))?;
        url.path_segments_mut()
            .map_err(|_| invalid_url(&self.endpoint, "cannot hold a path"))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

fn invalid_url(raw: &str, e: impl std::fmt::Display) -> ClientError {
    ClientError::InvalidUrl(format!("{}: {}", raw, e))
}

/// Build `"<status> <reason>"` plus the best detail found in the error body
fn error_message(status: StatusCode, body: &str) -> String {
    let mut message = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let detail = match (json.get("message"), json.get("errors")) {
            (Some(Value::String(text)), _) if !text.is_empty() => text.clone(),
            (Some(msg), _) if is_truthy(msg) => msg.to_string(),
            (_, Some(errors)) if is_truthy(errors) => errors.to_string(),
            _ => json.to_string(),
        };
        message.push_str(" - ");
        message.push_str(&detail);
    }

    message
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[async_trait]
impl PropertyApi for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<Value> {
        let url = self.collection_url(&query.pairs())?;
        self.http::<()>(Method::GET, url, None).await
    }

    async fn get(&self, id: &PropertyId) -> Result<Property> {
        let url = self.item_url(id)?;
        let raw = self.http::<()>(Method::GET, url, None).await?;
        Ok(serde_json::from_value(raw)?)
    }

    async fn create(&self, input: &PropertyInput) -> Result<Value> {
        let url = self.collection_url(&[])?;
        self.http(Method::POST, url, Some(input)).await
    }

    async fn update(&self, id: &PropertyId, input: &PropertyInput) -> Result<Value> {
        let url = self.item_url(id)?;
        self.http(Method::PUT, url, Some(input)).await
    }

    async fn delete(&self, id: &PropertyId) -> Result<()> {
        let url = self.item_url(id)?;
        self.http::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}

//! HTTP client for the club's events API.

use async_trait::async_trait;
use beach_club::events::{ApiEventProvider, NewEvent, ProviderError, ProviderResult, RawApiEvent};
use serde_json::Value;
use std::time::Duration;

/// Events API provider backed by `reqwest`
pub struct HttpEventProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEventProvider {
    /// Create a new provider
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server root, without the `/api/events` suffix
    /// * `timeout_secs` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    async fn checked(response: reqwest::Response) -> ProviderResult<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ApiEventProvider for HttpEventProvider {
    async fn fetch_all(&self) -> ProviderResult<Vec<RawApiEvent>> {
        let response = self
            .client
            .get(self.events_url())
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let body = Self::checked(response).await?;
        parse_events_body(&body)
    }

    async fn create_event(&self, event: NewEvent) -> ProviderResult<RawApiEvent> {
        let response = self
            .client
            .post(self.events_url())
            .json(&event)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let body = Self::checked(response).await?;
        parse_created_body(&body)
    }

    async fn delete_event(&self, id: &str) -> ProviderResult<()> {
        let response = self
            .client
            .delete(format!("{}/{}", self.events_url(), id))
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Self::checked(response).await?;
        Ok(())
    }
}

/// Decode a listing: a bare array, or an object wrapping it in `events` or `data`
pub fn parse_events_body(body: &str) -> ProviderResult<Vec<RawApiEvent>> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut map) => match map.remove("events").or_else(|| map.remove("data")) {
            Some(list @ Value::Array(_)) => list,
            _ => {
                return Err(ProviderError::Decode(
                    "expected an `events` or `data` array".to_string(),
                ));
            }
        },
        other => {
            return Err(ProviderError::Decode(format!(
                "expected an array or object, got {other}"
            )));
        }
    };

    serde_json::from_value(list).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Decode a created event, bare or wrapped in `event` or `data`
fn parse_created_body(body: &str) -> ProviderResult<RawApiEvent> {
    let mut value: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    if let Value::Object(map) = &mut value
        && let Some(inner) = map.remove("event").or_else(|| map.remove("data"))
    {
        value = inner;
    }
    serde_json::from_value(value).map_err(|e| ProviderError::Decode(e.to_string()))
}

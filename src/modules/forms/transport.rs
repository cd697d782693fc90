use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use super::models::FormKind;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no endpoint configured for the {0} form")]
    NotConfigured(FormKind),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network failure: {0}")]
    Network(String),
}

/// Posts a URL-encoded field set and reports the response status code.
///
/// Any status is a successful delivery from the transport's point of view;
/// only failures to get a response are errors.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<u16, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl FormTransport for HttpTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<u16, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    TransportError::Timeout(self.timeout)
                } else {
                    TransportError::Network(error.to_string())
                }
            })?;

        Ok(response.status().as_u16())
    }
}

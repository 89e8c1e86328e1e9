//! HTTP exchange seam.
//!
//! Services talk to the network through [`HttpExchange`], a minimal
//! request/response trait. [`RestClient`] is the reqwest-backed production
//! implementation; tests substitute an in-memory fake.

use std::fmt;

use async_trait::async_trait;

use crate::error::ServiceError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct WireRequest {
    pub method: Method,
    pub url: String,
    /// Serializer-produced text, sent as `application/json`.
    pub body: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// One HTTP round-trip. Implementations map transport failures to
/// [`ServiceError::Network`]; status-code interpretation stays with the
/// caller.
#[async_trait]
pub trait HttpExchange: Send + Sync {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, ServiceError>;
}

/// Maps a response status onto the error taxonomy, yielding the body of a
/// successful response.
pub(crate) fn check_status(response: WireResponse, url: &str) -> Result<String, ServiceError> {
    match response.status {
        200..=299 => Ok(response.body),
        404 => Err(ServiceError::NotFound(url.to_owned())),
        status => Err(ServiceError::Network(format!(
            "{url} answered status {status}"
        ))),
    }
}

/// Production [`HttpExchange`] backed by a shared reqwest client.
#[derive(Clone, Default)]
pub struct RestClient {
    client: reqwest::Client,
}

impl RestClient {
    pub fn new() -> RestClient {
        RestClient {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpExchange for RestClient {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, ServiceError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let builder = match request.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        tracing::debug!(method = %request.method, url = %request.url, status, "http round-trip");
        Ok(WireResponse { status, body })
    }
}

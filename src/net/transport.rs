//! HTTP transports underneath the gateway.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Native builds and tests: `GlooTransport` reports `Unavailable`; tests
//! drive the gateway through a scripted transport instead.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::future::Future;

use super::types::{ApiRequest, ApiResponse};
use crate::config::ShellConfig;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("http transport not available outside the browser")]
    Unavailable,
}

/// Sends a prepared request and yields the raw response.
///
/// Non-2xx statuses are *responses*, not errors; only failures to complete
/// the exchange are `TransportError`s.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// Browser transport built on `gloo-net`.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    api_base: String,
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::Request;

            use super::types::Method;

            let url = self.url_for(&request.path);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Encode(e.to_string()))?;

            let call = Box::pin(async move {
                let resp = prepared
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                Ok(ApiResponse::new(status, parse_body(&text)))
            });
            let timeout = Box::pin(gloo_timers::future::TimeoutFuture::new(self.timeout_ms));

            match select(call, timeout).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(((), _)) => Err(TransportError::Timeout(self.timeout_ms)),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Unavailable)
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Decode a response body; empty or non-JSON bodies become `Null`.
#[cfg(any(test, feature = "csr"))]
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or(serde_json::Value::Null)
}

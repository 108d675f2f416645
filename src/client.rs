//! Generic JSON request helper over a pooled hyper client.
//!
//! [`ApiClient`] issues GET/POST/PUT/DELETE requests against a fixed
//! base URL, optionally attaching a caller-supplied header map and a
//! JSON body, and decodes the response body into whatever type the
//! caller asks for. Any transport failure, timeout, non-2xx status,
//! or undecodable body surfaces as a single [`RelayError`] — callers
//! get no finer-grained distinction and no retry.

use std::time::Duration;

use axum::http::HeaderMap;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::Method;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RelayError;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HyperClient = Client<HttpsConnector, Full<Bytes>>;

#[must_use]
pub fn build_http_client() -> HyperClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring` as the default.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

#[derive(Clone)]
pub struct ApiClient {
    client: HyperClient,
    base_url: url::Url,
    timeout_ms: u64,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: url::Url, timeout_ms: u64) -> Self {
        Self {
            client: build_http_client(),
            base_url,
            timeout_ms,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<T, RelayError> {
        self.request(Method::GET, path, None::<&()>, headers).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: Option<&HeaderMap>,
    ) -> Result<T, RelayError> {
        self.request(Method::POST, path, body, headers).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: Option<&HeaderMap>,
    ) -> Result<T, RelayError> {
        self.request(Method::PUT, path, body, headers).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<T, RelayError> {
        self.request(Method::DELETE, path, None::<&()>, headers)
            .await
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: Option<&HeaderMap>,
    ) -> Result<T, RelayError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RelayError::UrlParse {
                source: Box::new(e),
            })?;
        let uri: hyper::Uri = url.as_str().parse().map_err(|e| RelayError::UrlParse {
            source: Box::new(e),
        })?;

        let body_bytes = match body {
            Some(b) => Bytes::from(serde_json::to_vec(b)?),
            None => Bytes::new(),
        };
        let has_body = body.is_some();

        let mut builder = hyper::Request::builder().method(method).uri(uri);
        if let Some(extra) = headers {
            for (key, value) in extra {
                builder = builder.header(key, value);
            }
        }
        if has_body && headers.map_or(true, |h| !h.contains_key(CONTENT_TYPE)) {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        let request =
            builder
                .body(Full::new(body_bytes))
                .map_err(|e| RelayError::HttpRequest {
                    source: Box::new(e),
                })?;

        let timeout = Duration::from_millis(self.timeout_ms);
        let response = tokio::time::timeout(timeout, self.client.request(request))
            .await
            .map_err(|_| RelayError::Timeout(self.timeout_ms))?
            .map_err(|e| RelayError::HttpRequest {
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status));
        }

        let collected =
            response
                .into_body()
                .collect()
                .await
                .map_err(|e| RelayError::HttpRequest {
                    source: Box::new(e),
                })?;
        Ok(serde_json::from_slice(&collected.to_bytes())?)
    }
}

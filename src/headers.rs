//! Outbound header construction for forwarded requests.
//!
//! [`forward_headers`] clones the inbound client headers, strips
//! hop-by-hop headers, rewrites `Host` to the origin's authority, and
//! adds proxy metadata (`Via`, `X-Correlation-Id`). `Content-Length`
//! is also dropped: the proxy re-encodes POST/PUT bodies down to the
//! `name`/`value` fields, so the inbound length no longer applies.

use std::sync::LazyLock;

use axum::http::{HeaderMap, HeaderName, HeaderValue};

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

#[must_use]
pub fn forward_headers(
    original: &HeaderMap,
    origin_url: &url::Url,
    correlation_id: &str,
) -> HeaderMap {
    let mut headers = original.clone();

    for header_name in HOP_BY_HOP.iter() {
        headers.remove(header_name);
    }
    headers.remove(hyper::header::CONTENT_LENGTH);

    // Rewrite Host to the origin authority
    if let Some(host) = origin_url.host_str() {
        let host_value = origin_url
            .port()
            .map_or_else(|| host.to_string(), |port| format!("{host}:{port}"));
        if let Ok(val) = HeaderValue::from_str(&host_value) {
            headers.insert("host", val);
        }
    }

    if let Ok(val) = HeaderValue::from_str("1.1 apirelay") {
        headers.insert("via", val);
    }

    if let Ok(val) = HeaderValue::from_str(correlation_id) {
        headers.insert("x-correlation-id", val);
    }

    headers
}

/// Reuse the caller's correlation id when present, otherwise mint one.
#[must_use]
pub fn correlation_id(inbound: &HeaderMap) -> String {
    inbound
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> url::Url {
        url::Url::parse("http://localhost:3000").unwrap()
    }

    #[test]
    fn strips_hop_by_hop() {
        let mut original = HeaderMap::new();
        original.insert("connection", "keep-alive".parse().unwrap());
        original.insert("te", "trailers".parse().unwrap());
        original.insert("content-type", "application/json".parse().unwrap());

        let result = forward_headers(&original, &origin(), "test-id");

        assert!(result.get("connection").is_none());
        assert!(result.get("te").is_none());
        assert!(result.get("content-type").is_some());
    }

    #[test]
    fn strips_content_length() {
        let mut original = HeaderMap::new();
        original.insert("content-length", "512".parse().unwrap());

        let result = forward_headers(&original, &origin(), "test-id");
        assert!(result.get("content-length").is_none());
    }

    #[test]
    fn rewrites_host() {
        let mut original = HeaderMap::new();
        original.insert("host", "public.example.com".parse().unwrap());

        let result = forward_headers(&original, &origin(), "test-id");
        assert_eq!(result.get("host").unwrap(), "localhost:3000");
    }

    #[test]
    fn sets_via_and_correlation_id() {
        let original = HeaderMap::new();
        let result = forward_headers(&original, &origin(), "my-correlation-id");

        assert_eq!(result.get("via").unwrap(), "1.1 apirelay");
        assert_eq!(result.get("x-correlation-id").unwrap(), "my-correlation-id");
    }

    #[test]
    fn keeps_custom_headers() {
        let mut original = HeaderMap::new();
        original.insert("x-tenant", "acme".parse().unwrap());
        original.insert("authorization", "Bearer abc".parse().unwrap());

        let result = forward_headers(&original, &origin(), "test-id");
        assert_eq!(result.get("x-tenant").unwrap(), "acme");
        assert_eq!(result.get("authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn correlation_id_reuses_inbound() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-correlation-id", "abc-123".parse().unwrap());
        assert_eq!(correlation_id(&inbound), "abc-123");
    }

    #[test]
    fn correlation_id_generated_when_absent() {
        let inbound = HeaderMap::new();
        let id = correlation_id(&inbound);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}

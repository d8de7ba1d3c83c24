//! Conversions between wire-level hyper types and the core value objects.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http_body_util::Full;
use junction_core::{Request, Response};

/// Parse a raw query string into a flat string map. Absent or unparsable
/// query strings become an empty map.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .and_then(|raw| serde_urlencoded::from_str::<HashMap<String, String>>(raw).ok())
        .unwrap_or_default()
}

/// Parse a request body into the form-data map, keyed off the content
/// type. JSON object fields are stringified; anything else is ignored —
/// actions that want raw bodies register their own parsing middleware.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> HashMap<String, String> {
    if body.is_empty() {
        return HashMap::new();
    }
    match content_type {
        Some(value) if value.starts_with("application/json") => {
            serde_json::from_slice::<HashMap<String, serde_json::Value>>(body)
                .map(|fields| {
                    fields
                        .into_iter()
                        .map(|(key, value)| (key, stringify(value)))
                        .collect()
                })
                .unwrap_or_default()
        }
        Some(value) if value.starts_with("application/x-www-form-urlencoded") => {
            serde_urlencoded::from_bytes(body).unwrap_or_default()
        }
        _ => HashMap::new(),
    }
}

fn stringify(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Build a core request from decomposed hyper parts plus the collected
/// body bytes.
pub fn into_core_request(parts: http::request::Parts, body: Bytes) -> Request {
    let path = parts.uri.path().to_string();
    let query = parse_query(parts.uri.query());
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let data = parse_body(content_type.as_deref(), &body);

    Request::new(parts.method, path)
        .with_headers(parts.headers)
        .with_query(query)
        .with_data(data)
}

/// Prepare a core response and convert it into a hyper response.
pub fn into_hyper_response(mut response: Response) -> http::Response<Full<Bytes>> {
    response.prepare();

    let body = response.content().cloned().unwrap_or_default();
    let mut converted = http::Response::new(Full::new(body));
    *converted.status_mut() = response.status();
    *converted.headers_mut() = response.headers().clone();
    converted
}

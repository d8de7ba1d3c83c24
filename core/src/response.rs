use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;

/// An outbound HTTP response under construction.
///
/// Actions and middlewares build and decorate one of these; the transport
/// adapter calls [`Response::prepare`] right before transmission.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    content: Option<Bytes>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Set a header. Names that are not valid HTTP header names are
    /// silently dropped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn remove_header(&mut self, name: &str) {
        if let Ok(name) = HeaderName::try_from(name) {
            self.headers.remove(name);
        }
    }

    pub fn with_content_type(self, value: &str) -> Self {
        self.with_header("content-type", value)
    }

    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Finalize the response for transmission: compute `Content-Length`
    /// from the body, or strip the content headers entirely when there is
    /// no body.
    pub fn prepare(&mut self) {
        match &self.content {
            None => {
                self.headers.remove(CONTENT_TYPE);
                self.headers.remove(CONTENT_LENGTH);
            }
            Some(content) => {
                self.headers
                    .insert(CONTENT_LENGTH, HeaderValue::from(content.len()));
            }
        }
    }

    /// A `text/plain` response.
    pub fn text(body: impl Into<Bytes>) -> Self {
        Self::new()
            .with_content_type("text/plain")
            .with_content(body)
    }

    /// A `text/html` response.
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::new()
            .with_content_type("text/html")
            .with_content(body)
    }

    /// An `application/json` response serialized from `body`.
    pub fn json<T: Serialize>(body: &T) -> Self {
        let content = serde_json::to_vec(body).expect("failed to serialize JSON body");
        Self::new()
            .with_content_type("application/json")
            .with_content(content)
    }

    /// A `302 Found` redirect to `uri`.
    pub fn redirect(uri: &str) -> Self {
        let mut response = Self::new().with_status(StatusCode::FOUND);
        if let Ok(value) = HeaderValue::try_from(uri) {
            response.headers.insert(LOCATION, value);
        }
        response
    }
}

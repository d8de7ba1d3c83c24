use std::collections::HashMap;
use std::sync::Arc;

use http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::route::{PathParams, Route};

/// An inbound HTTP request as the router core sees it.
///
/// Built once per request by the transport adapter, then owned by the task
/// handling that request. Immutable apart from the single route attachment
/// performed at resolution time.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: Method,
    uri: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    data: HashMap<String, String>,
    route: Option<Arc<Route>>,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// The path component of the requested uri.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
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

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Query string parameters.
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Form or JSON body fields, as parsed by the transport adapter.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }

    pub fn with_data(mut self, data: HashMap<String, String>) -> Self {
        self.data = data;
        self
    }

    /// The route this request resolved to. `None` until the dispatcher
    /// attaches it.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_deref()
    }

    /// Attach the matched route. Called by the dispatcher at resolution
    /// time; the route outlives the request, the request only borrows its
    /// parameter knowledge.
    pub fn set_route(&mut self, route: Arc<Route>) {
        self.route = Some(route);
    }

    /// Parameters captured from the uri by the matched route, in
    /// declaration order. Empty when no route is attached.
    pub fn route_parameters(&self) -> PathParams {
        match &self.route {
            Some(route) => route.parse_parameters(&self.uri),
            None => PathParams::default(),
        }
    }

    /// Single captured path parameter by name.
    pub fn param(&self, name: &str) -> Option<String> {
        self.route_parameters().get(name).map(str::to_owned)
    }
}

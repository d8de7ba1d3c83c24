use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Error;
use crate::handler::Handler;
use crate::middleware::Middleware;

/// What a `{name}` token is allowed to capture: one or more URL-safe
/// characters (letters, digits, hyphen). Never a `/`, so a parameter spans
/// exactly one path segment.
const PARAM_PATTERN: &str = "([a-zA-Z0-9-]+)";

/// Ordered name → value pairs captured from a matched uri, in declaration
/// order of the `{name}` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One registered endpoint: the compiled matcher for its path template, the
/// parameter names in declaration order, the action, and the middleware
/// list wrapped around it.
///
/// The matcher is compiled exactly once, here. `matches` and
/// `parse_parameters` only ever re-run the cached expression — resolution
/// happens on every request and must not pay compilation again.
pub struct Route {
    pattern: String,
    matcher: Regex,
    parameter_names: Vec<String>,
    action: Arc<dyn Handler>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Route {
    pub(crate) fn new(pattern: &str, action: Arc<dyn Handler>) -> Result<Self, Error> {
        let (matcher, parameter_names) = compile(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            parameter_names,
            action,
            middlewares: Vec::new(),
        })
    }

    /// The original path template, e.g. `/users/{id}/posts/{post}`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `uri` satisfies the compiled matcher in full. Anchored at
    /// both ends, tolerant of one optional trailing slash; prefix and
    /// substring matches never count.
    pub fn matches(&self, uri: &str) -> bool {
        self.matcher.is_match(uri)
    }

    /// Pair each declared parameter name with the value captured from
    /// `uri`, in declaration order. Empty when `uri` does not match; call
    /// [`Route::matches`] first, or use [`Route::try_match`] to do both in
    /// one evaluation.
    pub fn parse_parameters(&self, uri: &str) -> PathParams {
        self.try_match(uri).unwrap_or_default()
    }

    /// Fused match + extraction: `None` when `uri` does not match.
    pub fn try_match(&self, uri: &str) -> Option<PathParams> {
        let captures = self.matcher.captures(uri)?;
        let params = self
            .parameter_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let value = captures
                    .get(index + 1)
                    .map(|group| group.as_str().to_string())
                    .unwrap_or_default();
                (name.clone(), value)
            })
            .collect();
        Some(PathParams(params))
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameter_names.is_empty()
    }

    /// The handler invoked when this route is dispatched.
    pub fn action(&self) -> &dyn Handler {
        self.action.as_ref()
    }

    /// Append a middleware. Only meaningful before the route becomes
    /// reachable; the router hands out `&mut Route` at registration time
    /// for exactly this.
    pub fn middleware(&mut self, middleware: impl Middleware) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Replace the whole middleware list.
    pub fn set_middlewares(&mut self, middlewares: Vec<Arc<dyn Middleware>>) -> &mut Self {
        self.middlewares = middlewares;
        self
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    pub fn has_middlewares(&self) -> bool {
        !self.middlewares.is_empty()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("parameters", &self.parameter_names)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Compile a path template into an anchored regular expression plus the
/// parameter names in declaration order. Each `{name}` token (letters-only
/// name) becomes a capture group; literal segments are escaped verbatim;
/// the whole expression is `^…/?$`.
fn compile(pattern: &str) -> Result<(Regex, Vec<String>), Error> {
    let mut names = Vec::new();
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');

    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let literal = &rest[..open];
        if literal.contains('}') {
            return Err(malformed(pattern, "unbalanced `}`"));
        }
        source.push_str(&regex::escape(literal));

        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            return Err(malformed(pattern, "unterminated `{`"));
        };
        let name = &tail[..close];
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(malformed(
                pattern,
                format!("parameter name `{name}` must be letters only"),
            ));
        }
        names.push(name.to_string());
        source.push_str(PARAM_PATTERN);
        rest = &tail[close + 1..];
    }
    if rest.contains('}') {
        return Err(malformed(pattern, "unbalanced `}`"));
    }
    source.push_str(&regex::escape(rest));
    source.push_str("/?$");

    let matcher = Regex::new(&source).map_err(|err| malformed(pattern, err.to_string()))?;
    Ok((matcher, names))
}

fn malformed(pattern: &str, reason: impl Into<String>) -> Error {
    Error::MalformedPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

use http::Method;

/// Core-level error taxonomy.
///
/// The router itself only ever produces the first two variants. Everything
/// an action or a middleware raises travels through [`Error::Handler`]
/// without the core inspecting it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No registered route matches the (method, uri) pair.
    #[error("no route matches {method} {uri}")]
    RouteNotFound { method: Method, uri: String },

    /// A route pattern failed to compile at registration time. Fatal during
    /// bootstrap: the application must not start serving.
    #[error("malformed route pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// An application-level failure raised inside an action or a middleware.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl Error {
    /// Wrap a collaborator error so it can unwind through the pipeline.
    pub fn handler<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Error::Handler(err.into())
    }
}

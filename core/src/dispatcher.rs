use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::pipeline::Pipeline;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Orchestrates one request: resolve, attach the route, run the pipeline.
///
/// Owns the router outright. Anything that needs to dispatch is handed a
/// reference to this value — there is no process-global application state
/// to reach into.
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Produce the final response for `request`.
    ///
    /// The one core-level condition recognized here is `RouteNotFound`,
    /// recovered into a plain-text 404. Anything raised by a middleware or
    /// the action is returned to the caller untouched — translating
    /// validation failures, database errors and the like is the outer
    /// application layer's concern.
    pub async fn run(&self, mut request: Request) -> Result<Response, Error> {
        let route = match self.router.resolve(request.method(), request.uri()) {
            Ok(route) => route,
            Err(Error::RouteNotFound { method, uri }) => {
                debug!(%method, %uri, "no route matched");
                return Ok(Response::text("Not Found").with_status(StatusCode::NOT_FOUND));
            }
            Err(other) => return Err(other),
        };

        debug!(pattern = route.pattern(), "route matched");
        request.set_route(Arc::clone(&route));

        Pipeline::new(route.middlewares(), route.action())
            .invoke(request)
            .await
    }
}

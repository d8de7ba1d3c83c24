use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// A cross-cutting layer wrapped around a route action.
///
/// A middleware receives the request together with the [`Next`]
/// continuation. It may forward the request and return the inner response
/// as-is, post-process that response on the way back out, or return its own
/// response without calling `next` at all — which short-circuits: every
/// layer nested inside it, the action included, never runs.
///
/// The pipeline adds no handling of its own. An error returned by `next`
/// unwinds through every enclosing layer unchanged, so a middleware that
/// wants to react to inner failures must guard its own `next` call.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error>;
}

/// The continuation handed to a middleware: the middlewares left to run, in
/// declaration order, terminated by the route action.
pub struct Next<'a> {
    pub(crate) remaining: &'a [Arc<dyn Middleware>],
    pub(crate) action: &'a dyn Handler,
}

impl Next<'_> {
    /// Invoke the rest of the chain with `request`.
    pub async fn run(self, request: Request) -> Result<Response, Error> {
        match self.remaining.split_first() {
            Some((current, rest)) => {
                let next = Next {
                    remaining: rest,
                    action: self.action,
                };
                current.handle(request, next).await
            }
            None => self.action.call(request).await,
        }
    }
}

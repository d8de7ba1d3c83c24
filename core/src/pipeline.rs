use std::sync::Arc;

use crate::error::Error;
use crate::handler::Handler;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// A route's middleware list composed around its action.
///
/// For middlewares `[m0, m1, .., mk]` the chain is the inside-out
/// composition with the action at the center: inbound, layers run in
/// declaration order (`m0` first); outbound, post-processing runs in
/// reverse, so `m0` sees the final, most-decorated response.
pub struct Pipeline<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    action: &'a dyn Handler,
}

impl<'a> Pipeline<'a> {
    pub fn new(middlewares: &'a [Arc<dyn Middleware>], action: &'a dyn Handler) -> Self {
        Self {
            middlewares,
            action,
        }
    }

    /// Run the full chain for one request.
    ///
    /// Transparent to errors: whatever a layer or the action raises is
    /// returned unchanged.
    pub async fn invoke(self, request: Request) -> Result<Response, Error> {
        let next = Next {
            remaining: self.middlewares,
            action: self.action,
        };
        next.run(request).await
    }
}

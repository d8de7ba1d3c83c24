//! junction — parameterized HTTP routing with an onion middleware pipeline.
//!
//! This facade re-exports the router core and the hyper transport so an
//! application only needs one dependency:
//!
//! ```ignore
//! use junction::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut router = Router::new();
//!     router.get("/greet/{name}", |req: Request| async move {
//!         let name = req.param("name").unwrap_or_default();
//!         Ok::<Response, Error>(Response::text(format!("Hello, {name}!")))
//!     })?;
//!
//!     let dispatcher = Dispatcher::new(router);
//!     Server::new(([127, 0, 0, 1], 3000).into(), dispatcher).run().await
//! }
//! ```

pub use junction_core::{
    Dispatcher, Error, Handler, Middleware, Next, PathParams, Pipeline, Request, Response, Route,
    Router,
};
pub use junction_http::Server;

pub mod prelude {
    pub use junction_core::{
        Dispatcher, Error, Handler, Middleware, Next, PathParams, Pipeline, Request, Response,
        Route, Router,
    };
    pub use junction_http::Server;

    // Re-export what middleware implementations and handlers reach for.
    pub use async_trait::async_trait;
    pub use bytes::Bytes;
    pub use http::{Method, StatusCode};
}

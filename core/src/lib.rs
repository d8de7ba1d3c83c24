//! junction-core — parameterized request routing and a composable
//! middleware pipeline.
//!
//! A [`Router`] maps (method, path) pairs onto registered [`Route`]s:
//! path templates like `/users/{id}` are compiled once into anchored
//! matchers, and within one method registration order is match priority.
//! Each route carries an action plus an ordered middleware list; the
//! [`Pipeline`] wraps the action in those layers onion-style, and the
//! [`Dispatcher`] ties resolution and invocation together.
//!
//! Transport, persistence, sessions, validation and rendering live in
//! sibling crates — this one never touches a socket.

pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod route;
pub mod router;

pub use dispatcher::Dispatcher;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use middleware::{Middleware, Next};
pub use pipeline::Pipeline;
pub use request::Request;
pub use response::Response;
pub use route::{PathParams, Route};
pub use router::Router;

pub mod prelude {
    pub use crate::dispatcher::Dispatcher;
    pub use crate::error::Error;
    pub use crate::handler::Handler;
    pub use crate::middleware::{Middleware, Next};
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::route::{PathParams, Route};
    pub use crate::router::Router;

    // Re-export the http types that appear in the public surface.
    pub use http::{Method, StatusCode};
}

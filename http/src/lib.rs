//! HTTP ingress adapter for junction.
//!
//! Turns OS-level connections into [`junction_core::Request`] values,
//! hands them to a [`junction_core::Dispatcher`], and writes the prepared
//! [`junction_core::Response`] back out over hyper. The router core never
//! sees a socket; this crate is the only place transport details live.

pub mod adapter;
pub mod server;

pub use server::Server;

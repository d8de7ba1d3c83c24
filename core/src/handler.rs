use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// Boxed future used across handler and middleware signatures.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A route action: anything that turns a [`Request`] into a [`Response`].
///
/// Async functions and closures get this for free via the blanket impl
/// below; stateful controller types implement it directly.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn call(&self, request: Request) -> Result<Response, Error>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    async fn call(&self, request: Request) -> Result<Response, Error> {
        (self)(request).await
    }
}

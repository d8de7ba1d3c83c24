//! Minimal junction application: three routes, one middleware.

use std::net::SocketAddr;

use junction::prelude::*;

/// Tags every response passing through it and logs the visit.
struct PoweredBy;

#[async_trait]
impl Middleware for PoweredBy {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error> {
        tracing::info!(uri = request.uri(), "handling request");
        let response = next.run(request).await?;
        Ok(response.with_header("x-powered-by", "junction"))
    }
}

async fn home(_request: Request) -> Result<Response, Error> {
    Ok(Response::text("Hello, junction!"))
}

async fn greet(request: Request) -> Result<Response, Error> {
    let name = request.param("name").unwrap_or_default();
    Ok(Response::json(&serde_json::json!({
        "greeting": format!("Hello, {name}!")
    })))
}

async fn echo(request: Request) -> Result<Response, Error> {
    Ok(Response::json(request.data()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let mut router = Router::new();
    router.get("/", home)?;
    router.get("/greet/{name}", greet)?.middleware(PoweredBy);
    router.post("/echo", echo)?;

    let dispatcher = Dispatcher::new(router);
    let addr: SocketAddr = ([127, 0, 0, 1], 3000).into();
    Server::new(addr, dispatcher).run().await
}

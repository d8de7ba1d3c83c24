//! Accept loop and per-request plumbing.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use junction_core::{Dispatcher, Response};
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span};

/// HTTP/1 server that feeds inbound requests to a [`Dispatcher`].
///
/// One spawned task per connection; each request is exclusively owned by
/// the task handling it. The dispatcher is behind an `Arc` and only ever
/// read — routes were sealed before the server started.
pub struct Server {
    addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    pub fn new(addr: SocketAddr, dispatcher: Dispatcher) -> Self {
        Self {
            addr,
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Bind and serve until the process stops.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(self.addr).await?;
        info!("junction listening on http://{}", self.addr);

        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let dispatcher = Arc::clone(&self.dispatcher);

            tokio::task::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let dispatcher = Arc::clone(&dispatcher);
                    async move {
                        Ok::<_, std::convert::Infallible>(handle(dispatcher, req).await)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("error serving connection: {err:?}");
                }
            });
        }
    }
}

async fn handle(
    dispatcher: Arc<Dispatcher>,
    req: hyper::Request<Incoming>,
) -> hyper::Response<Full<Bytes>> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!(
        "http_request",
        http.method = %req.method(),
        http.path = %req.uri().path(),
        http.request_id = %request_id,
    );

    async move {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                error!("failed to read request body: {err:?}");
                Bytes::new()
            }
        };
        let request = crate::adapter::into_core_request(parts, body);

        let response = match dispatcher.run(request).await {
            Ok(response) => response,
            Err(err) => {
                // The core is transparent to action/middleware errors;
                // rendering them is this layer's job.
                error!("unhandled error from pipeline: {err:?}");
                Response::text("Internal Server Error")
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        crate::adapter::into_hyper_response(response)
    }
    .instrument(span)
    .await
}

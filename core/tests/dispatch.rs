//! End-to-end dispatch: registration, resolution, pipeline, response.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use junction_core::prelude::*;

fn json_id_action() -> impl Handler {
    |request: Request| async move {
        let id = request.param("id").unwrap_or_default();
        Ok::<Response, Error>(Response::json(&serde_json::json!({ "id": id })))
    }
}

#[tokio::test]
async fn test_parameterized_route_returns_json_payload() {
    let mut router = Router::new();
    router.get("/test/{id}", json_id_action()).unwrap();
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/test/42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.content(), Some(&Bytes::from(r#"{"id":"42"}"#)));
}

#[tokio::test]
async fn test_unmatched_request_becomes_plain_404() {
    let mut router = Router::new();
    router.get("/test", |_request: Request| async move {
        Ok::<Response, Error>(Response::text("test"))
    })
    .unwrap();
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/does/not/exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.content(), Some(&Bytes::from("Not Found")));
}

#[tokio::test]
async fn test_method_isolation_yields_404() {
    let mut router = Router::new();
    router.post("/test", |_request: Request| async move {
        Ok::<Response, Error>(Response::text("posted"))
    })
    .unwrap();
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/test"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

struct AppendHeader {
    name: &'static str,
    value: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl Middleware for AppendHeader {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error> {
        let response = next.run(request).await?;
        self.log.lock().unwrap().push(self.name);
        Ok(response.with_header(self.name, self.value))
    }
}

#[tokio::test]
async fn test_route_middlewares_wrap_the_action_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = Router::new();
    router.get("/test", |_request: Request| async move {
        Ok::<Response, Error>(Response::text("test"))
    })
    .unwrap()
    .middleware(AppendHeader {
        name: "x-test-one",
        value: "one",
        log: Arc::clone(&log),
    })
    .middleware(AppendHeader {
        name: "x-test-two",
        value: "two",
        log: Arc::clone(&log),
    });
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/test"))
        .await
        .unwrap();

    assert_eq!(response.header("x-test-one"), Some("one"));
    assert_eq!(response.header("x-test-two"), Some("two"));
    // Outbound post-processing runs innermost-first.
    assert_eq!(*log.lock().unwrap(), vec!["x-test-two", "x-test-one"]);
}

struct Stopper;

#[async_trait]
impl Middleware for Stopper {
    async fn handle(&self, _request: Request, _next: Next<'_>) -> Result<Response, Error> {
        Ok(Response::text("Stopped"))
    }
}

struct CountingAction {
    hits: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for CountingAction {
    async fn call(&self, _request: Request) -> Result<Response, Error> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(Response::text("Unreachable"))
    }
}

#[tokio::test]
async fn test_middleware_can_stop_the_stack() {
    let hits = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut router = Router::new();
    router.get("/test", CountingAction {
        hits: Arc::clone(&hits),
    })
    .unwrap()
    .middleware(Stopper)
    .middleware(AppendHeader {
        name: "x-test-two",
        value: "two",
        log: Arc::clone(&log),
    });
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/test"))
        .await
        .unwrap();

    assert_eq!(response.content(), Some(&Bytes::from("Stopped")));
    assert_eq!(response.header("x-test-two"), None);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_handler_errors_surface_to_the_caller() {
    let mut router = Router::new();
    router.get("/boom", |_request: Request| async move {
        Err::<Response, _>(Error::handler(std::io::Error::other("exploded")))
    })
    .unwrap();
    let dispatcher = Dispatcher::new(router);

    let result = dispatcher.run(Request::new(Method::GET, "/boom")).await;
    assert!(matches!(result, Err(Error::Handler(_))));
}

#[tokio::test]
async fn test_request_carries_the_matched_route() {
    let mut router = Router::new();
    router.get("/users/{id}", |request: Request| async move {
        let pattern = request
            .route()
            .map(|route| route.pattern().to_string())
            .unwrap_or_default();
        Ok::<Response, Error>(Response::text(pattern))
    })
    .unwrap();
    let dispatcher = Dispatcher::new(router);

    let response = dispatcher
        .run(Request::new(Method::GET, "/users/9"))
        .await
        .unwrap();

    assert_eq!(response.content(), Some(&Bytes::from("/users/{id}")));
}

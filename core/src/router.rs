use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::error::Error;
use crate::handler::Handler;
use crate::route::Route;

/// Registry of routes, one ordered list per HTTP method.
///
/// Registration happens during bootstrap, strictly before serving starts.
/// After that the table is only ever read, so concurrent resolution needs
/// no locking — this is the design choice that keeps the router safe under
/// concurrency without any coordination.
///
/// Within one method's list, insertion order is match priority: the first
/// registered route that matches wins, regardless of specificity. Two
/// overlapping patterns are allowed; the later one is simply shadowed
/// wherever both match.
#[derive(Debug, Default)]
pub struct Router {
    routes_by_method: HashMap<Method, Vec<Arc<Route>>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route for `GET`.
    pub fn get(&mut self, pattern: &str, action: impl Handler) -> Result<&mut Route, Error> {
        self.register(Method::GET, pattern, action)
    }

    /// Register a route for `POST`.
    pub fn post(&mut self, pattern: &str, action: impl Handler) -> Result<&mut Route, Error> {
        self.register(Method::POST, pattern, action)
    }

    /// Register a route for `PUT`.
    pub fn put(&mut self, pattern: &str, action: impl Handler) -> Result<&mut Route, Error> {
        self.register(Method::PUT, pattern, action)
    }

    /// Register a route for `PATCH`.
    pub fn patch(&mut self, pattern: &str, action: impl Handler) -> Result<&mut Route, Error> {
        self.register(Method::PATCH, pattern, action)
    }

    /// Register a route for `DELETE`.
    pub fn delete(&mut self, pattern: &str, action: impl Handler) -> Result<&mut Route, Error> {
        self.register(Method::DELETE, pattern, action)
    }

    /// Register a route and return it mutably, so middlewares can be
    /// attached before the route becomes reachable:
    ///
    /// ```ignore
    /// router.get("/admin", dashboard)?.middleware(RequireAuth);
    /// ```
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        action: impl Handler,
    ) -> Result<&mut Route, Error> {
        let route = Route::new(pattern, Arc::new(action))?;
        let routes = self.routes_by_method.entry(method).or_default();
        routes.push(Arc::new(route));
        // The Arc was created on the line above and has not been cloned:
        // registration is single-threaded bootstrap, nothing shares it yet.
        let route = routes
            .last_mut()
            .and_then(Arc::get_mut)
            .expect("freshly registered route is uniquely owned");
        Ok(route)
    }

    /// Walk the method's routes in registration order and return the first
    /// match. First-registered, first-matched wins.
    pub fn resolve(&self, method: &Method, uri: &str) -> Result<Arc<Route>, Error> {
        self.routes_by_method
            .get(method)
            .into_iter()
            .flatten()
            .find(|route| route.matches(uri))
            .cloned()
            .ok_or_else(|| Error::RouteNotFound {
                method: method.clone(),
                uri: uri.to_string(),
            })
    }

    /// The routes registered for `method`, in registration order.
    pub fn routes(&self, method: &Method) -> &[Arc<Route>] {
        self.routes_by_method
            .get(method)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    fn respond(body: &'static str) -> impl Handler {
        move |_request: Request| async move { Ok::<Response, Error>(Response::text(body)) }
    }

    async fn invoke(route: &Arc<Route>) -> Response {
        route.action().call(Request::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_resolution_returns_the_registered_action() {
        let mut router = Router::new();
        router.get("/test", respond("test")).unwrap();
        router.get("/foo", respond("foo")).unwrap();
        router.get("/long/nested/route", respond("nested")).unwrap();

        let route = router.resolve(&Method::GET, "/foo").unwrap();
        assert_eq!(route.pattern(), "/foo");
        assert_eq!(
            invoke(&route).await.content(),
            Some(&bytes::Bytes::from("foo"))
        );
    }

    #[test]
    fn test_methods_are_isolated() {
        let mut router = Router::new();
        router.post("/test", respond("post")).unwrap();

        assert!(matches!(
            router.resolve(&Method::GET, "/test"),
            Err(Error::RouteNotFound { .. })
        ));
        assert!(router.resolve(&Method::POST, "/test").is_ok());
    }

    #[test]
    fn test_same_pattern_under_every_method_resolves_independently() {
        let mut router = Router::new();
        router.get("/test", respond("get")).unwrap();
        router.post("/test", respond("post")).unwrap();
        router.put("/test", respond("put")).unwrap();
        router.patch("/test", respond("patch")).unwrap();
        router.delete("/test", respond("delete")).unwrap();

        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ] {
            assert_eq!(router.resolve(&method, "/test").unwrap().pattern(), "/test");
            assert_eq!(router.routes(&method).len(), 1);
        }
    }

    #[test]
    fn test_first_registered_route_wins_over_more_specific_one() {
        let mut router = Router::new();
        router.get("/users/{id}", respond("param")).unwrap();
        router.get("/users/me", respond("literal")).unwrap();

        let route = router.resolve(&Method::GET, "/users/me").unwrap();
        assert_eq!(route.pattern(), "/users/{id}");
    }

    #[test]
    fn test_unknown_uri_is_route_not_found() {
        let mut router = Router::new();
        router.get("/test", respond("test")).unwrap();

        let err = router.resolve(&Method::GET, "/does/not/exist").unwrap_err();
        match err {
            Error::RouteNotFound { method, uri } => {
                assert_eq!(method, Method::GET);
                assert_eq!(uri, "/does/not/exist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_pattern_fails_registration() {
        let mut router = Router::new();
        let err = router.get("/users/{id", respond("broken")).unwrap_err();
        assert!(matches!(err, Error::MalformedPattern { .. }));
    }

    #[test]
    fn test_parameterized_resolution_matches_and_extracts() {
        let mut router = Router::new();
        router.get("/users/{id}/posts/{post}", respond("post")).unwrap();

        let route = router
            .resolve(&Method::GET, "/users/7/posts/hello-world")
            .unwrap();
        let params = route.parse_parameters("/users/7/posts/hello-world");
        assert_eq!(params.get("id"), Some("7"));
        assert_eq!(params.get("post"), Some("hello-world"));
    }
}

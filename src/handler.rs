//! Request handler abstraction.
//!
//! # Responsibilities
//! - Define the handler contract shared by routes, middleware, and the mux
//! - Adapt plain functions and closures into handlers
//! - Provide the built-in not-found responder
//!
//! # Design Decisions
//! - Handlers are synchronous; the mux performs no I/O of its own
//! - Handlers consume the request and return a response (bodies are opaque)
//! - Shared via `Arc` so one handler can sit behind several patterns

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};

/// A unit of request-handling logic.
///
/// The mux treats handlers as opaque: it never inspects the request or
/// response beyond routing, and it never catches anything a handler raises.
pub trait Handler: Send + Sync {
    fn call(&self, req: Request<Body>) -> Response<Body>;
}

/// A shareable, reference-counted handler.
pub type SharedHandler = Arc<dyn Handler>;

impl<F> Handler for F
where
    F: Fn(Request<Body>) -> Response<Body> + Send + Sync,
{
    fn call(&self, req: Request<Body>) -> Response<Body> {
        (self)(req)
    }
}

/// Built-in responder for requests no pattern matched.
pub fn not_found(_req: Request<Body>) -> Response<Body> {
    status_response(StatusCode::NOT_FOUND)
}

/// An empty-bodied response carrying only a status code.
pub fn status_response(status: StatusCode) -> Response<Body> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = status;
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_handler() {
        let h = |_req: Request<Body>| status_response(StatusCode::NO_CONTENT);
        let req = Request::builder().body(Body::default()).unwrap();
        assert_eq!(h.call(req).status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_not_found_responds_404() {
        let req = Request::builder()
            .uri("/missing")
            .body(Body::default())
            .unwrap();
        assert_eq!(not_found(req).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_shared_handler_dispatches_through_arc() {
        let h: SharedHandler = Arc::new(|_req: Request<Body>| status_response(StatusCode::OK));
        let req = Request::builder().body(Body::default()).unwrap();
        assert_eq!(h.call(req).status(), StatusCode::OK);
    }
}

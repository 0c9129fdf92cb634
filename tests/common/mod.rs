//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use httpmux::{Handler, Middleware, SharedHandler};

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::default())
        .unwrap()
}

/// Handler that responds 200 with an identifying header.
pub fn tagged(tag: &'static str) -> impl Handler {
    move |_req: Request<Body>| {
        Response::builder()
            .status(StatusCode::OK)
            .header("x-handler", tag)
            .body(Body::empty())
            .unwrap()
    }
}

pub fn handler_header(res: &Response<Body>) -> &str {
    res.headers()["x-handler"].to_str().unwrap()
}

/// Middleware that records entry and exit around the inner handler.
pub fn recording(name: &'static str, log: Log) -> impl Middleware {
    move |next: SharedHandler| -> SharedHandler {
        let log = Arc::clone(&log);
        Arc::new(move |req: Request<Body>| {
            log.lock().unwrap().push(format!("{name}:before"));
            let res = next.call(req);
            log.lock().unwrap().push(format!("{name}:after"));
            res
        })
    }
}

/// Middleware that stamps its name onto the response headers, appending to
/// any stamps laid down by inner layers.
pub fn stamping(name: &'static str) -> impl Middleware {
    move |next: SharedHandler| -> SharedHandler {
        Arc::new(move |req: Request<Body>| {
            let mut res = next.call(req);
            res.headers_mut()
                .append("x-middleware", name.parse().unwrap());
            res
        })
    }
}

/// The middleware names stamped on a response, innermost first.
pub fn stamps(res: &Response<Body>) -> Vec<&str> {
    res.headers()
        .get_all("x-middleware")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect()
}

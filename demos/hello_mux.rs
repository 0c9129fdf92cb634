//! Minimal mux wiring: one logging middleware, a grouped admin area, and a
//! dispatch loop over canned requests.
//!
//! Run with `RUST_LOG=debug cargo run --example hello_mux`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use httpmux::{Handler, Mux, SharedHandler};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut mux = Mux::new();

    // Request logging around every route registered from here on.
    mux.use_middleware(|next: SharedHandler| -> SharedHandler {
        Arc::new(move |req: Request<Body>| {
            tracing::info!(method = %req.method(), path = %req.uri().path(), "request");
            next.call(req)
        })
    });

    mux.get("/hello", |_req: Request<Body>| {
        Response::new(Body::from("hello\n"))
    });

    mux.group(|admin| {
        // Toy auth check, scoped to the admin routes only.
        admin.use_middleware(|next: SharedHandler| -> SharedHandler {
            Arc::new(move |req: Request<Body>| {
                if req.headers().contains_key("x-admin-token") {
                    next.call(req)
                } else {
                    httpmux::handler::status_response(StatusCode::UNAUTHORIZED)
                }
            })
        });
        admin.get("/admin/stats", |_req: Request<Body>| {
            Response::new(Body::from("uptime: forever\n"))
        });
    });

    let requests = [
        ("GET", "/hello", None),
        ("GET", "/admin/stats", None),
        ("GET", "/admin/stats", Some("s3cr3t")),
        ("GET", "/nope", None),
    ];

    for (method, path, token) in requests {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("x-admin-token", token);
        }
        let req = builder.body(Body::default()).expect("request build");
        let res = mux.dispatch(req);
        println!("{method} {path} -> {}", res.status());
    }
}

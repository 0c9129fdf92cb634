//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Wrap handlers with the accumulated middleware chain at registration
//! - Dispatch requests to the matched handler or the not-found handler
//! - Scope middleware additions to groups without forking the route table
//!
//! # Design Decisions
//! - Middleware added first runs outermost (first-and-last control)
//! - The chain is frozen into each route at the moment it is registered
//! - Groups clone the chain but share the matcher handle, so a pattern
//!   registered twice across scopes is still a conflict
//! - Registration conflicts abort setup; an ambiguous table must not serve
//! - Handler and middleware failures are never caught here

use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{Method, Request, Response};

use crate::handler::{self, Handler, SharedHandler};
use crate::routing::matcher::{MethodPathMatcher, PatternMatcher};

/// A transform from one handler to another.
///
/// A middleware may run code before delegating to the wrapped handler,
/// after it, or skip it entirely to short-circuit the request.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: SharedHandler) -> SharedHandler;
}

impl<F> Middleware for F
where
    F: Fn(SharedHandler) -> SharedHandler + Send + Sync,
{
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        (self)(next)
    }
}

/// Request multiplexer with middleware composition and scoped groups.
///
/// A `Mux` is configured during a single-threaded setup phase (middleware,
/// routes, groups) and then serves as a read-only dispatcher; it is
/// `Send + Sync` and supports unlimited concurrent [`Mux::dispatch`] calls.
pub struct Mux {
    matcher: Arc<RwLock<dyn PatternMatcher>>,
    not_found: SharedHandler,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Mux {
    /// Create a mux over the default [`MethodPathMatcher`].
    pub fn new() -> Self {
        Self::with_matcher(MethodPathMatcher::new())
    }

    /// Create a mux over a caller-supplied matcher.
    pub fn with_matcher<M: PatternMatcher + 'static>(matcher: M) -> Self {
        Self {
            matcher: Arc::new(RwLock::new(matcher)),
            not_found: Arc::new(handler::not_found),
            middlewares: Vec::new(),
        }
    }

    /// Append middleware to the chain.
    ///
    /// Order is significant: middleware added earlier wraps outside
    /// middleware added later. Only routes registered after this call see
    /// the new middleware; already-registered routes keep the chain they
    /// were wrapped with.
    pub fn use_middleware<M: Middleware + 'static>(&mut self, mw: M) {
        self.middlewares.push(Arc::new(mw));
    }

    /// Replace the handler run when no pattern matches.
    pub fn set_not_found<H: Handler + 'static>(&mut self, handler: H) {
        self.not_found = Arc::new(handler);
    }

    /// Apply the current chain to a handler, last-added innermost.
    fn compose(&self, handler: SharedHandler) -> SharedHandler {
        self.middlewares
            .iter()
            .rev()
            .fold(handler, |inner, mw| mw.wrap(inner))
    }

    /// Register a handler for a pattern, with the current chain baked in.
    ///
    /// The pattern string is forwarded to the matcher verbatim; its grammar
    /// and conflict rules live there.
    ///
    /// # Panics
    ///
    /// Panics when the matcher rejects the pattern. A conflicting route
    /// table is a setup bug, and serving from it would be ambiguous.
    pub fn register<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        let wrapped = self.compose(Arc::new(handler));
        tracing::debug!(
            pattern,
            middleware = self.middlewares.len(),
            "registering route"
        );
        if let Err(err) = self
            .matcher
            .write()
            .expect("matcher lock poisoned")
            .register(pattern, wrapped)
        {
            panic!("route registration failed: {err}");
        }
    }

    /// Register under an explicit method using the matcher's
    /// `"METHOD /path"` form.
    pub fn method<H: Handler + 'static>(&self, method: Method, pattern: &str, handler: H) {
        self.register(&format!("{method} {pattern}"), handler);
    }

    pub fn get<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::GET, pattern, handler);
    }

    pub fn post<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::POST, pattern, handler);
    }

    pub fn put<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::PUT, pattern, handler);
    }

    pub fn delete<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::DELETE, pattern, handler);
    }

    pub fn patch<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::PATCH, pattern, handler);
    }

    pub fn head<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::HEAD, pattern, handler);
    }

    pub fn options<H: Handler + 'static>(&self, pattern: &str, handler: H) {
        self.method(Method::OPTIONS, pattern, handler);
    }

    /// Run `f` against a scoped copy of this mux.
    ///
    /// The copy shares the route table and keeps the current not-found
    /// handler, but extends a private copy of the middleware chain.
    /// Middleware added inside the scope applies only to routes registered
    /// there (and in nested groups created from it); the outer mux is
    /// untouched. Groups nest without bound.
    pub fn group(&self, f: impl FnOnce(&mut Mux)) {
        let mut scope = Mux {
            matcher: Arc::clone(&self.matcher),
            not_found: Arc::clone(&self.not_found),
            middlewares: self.middlewares.clone(),
        };
        f(&mut scope);
    }

    /// Route a request to its registered handler, or to the not-found
    /// handler when nothing matches.
    pub fn dispatch(&self, req: Request<Body>) -> Response<Body> {
        let matched = self
            .matcher
            .read()
            .expect("matcher lock poisoned")
            .resolve(&req);
        match matched {
            Some(m) => {
                tracing::trace!(pattern = %m.pattern, "request matched");
                m.handler.call(req)
            }
            None => {
                tracing::trace!(path = %req.uri().path(), "no route matched");
                self.not_found.call(req)
            }
        }
    }
}

impl Default for Mux {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Mux {
    fn call(&self, req: Request<Body>) -> Response<Body> {
        self.dispatch(req)
    }
}

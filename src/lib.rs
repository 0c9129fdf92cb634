//! Composable HTTP request multiplexer.
//!
//! A thin layer over a pattern-matching primitive: handlers are registered
//! through a [`Mux`], middleware wraps each handler at registration time,
//! and requests no pattern matches fall through to a configurable
//! not-found handler. The mux owns middleware composition, route grouping,
//! and the match-or-fallback decision; the pattern grammar belongs to the
//! [`PatternMatcher`] it delegates to.

pub mod handler;
pub mod routing;

pub use handler::{Handler, SharedHandler};
pub use routing::matcher::{MethodPathMatcher, PatternMatcher, RegisterError, RouteMatch};
pub use routing::mux::{Middleware, Mux};

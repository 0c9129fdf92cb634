//! Pattern registration and lookup.
//!
//! # Responsibilities
//! - Define the matcher contract the mux dispatches through
//! - Map method-qualified patterns onto per-method route tables
//! - Report registration conflicts instead of silently overwriting
//!
//! # Design Decisions
//! - Matching itself is delegated to matchit's radix tree
//! - "GET /items" registers under GET only; "/items" serves every method
//! - A method-specific route wins over a method-agnostic one
//! - Explicit no-match (`None`) rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use thiserror::Error;

use crate::handler::SharedHandler;

/// Error returned when a pattern cannot be registered.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The pattern conflicts with an existing registration.
    #[error("pattern {pattern:?} conflicts with an existing route: {source}")]
    Conflict {
        pattern: String,
        source: matchit::InsertError,
    },
    /// The pattern is neither `"/path"` nor `"METHOD /path"`.
    #[error("pattern {0:?} must be \"/path\" or \"METHOD /path\"")]
    BadPattern(String),
}

/// A successful lookup: the handler to run and the pattern that matched.
pub struct RouteMatch {
    pub handler: SharedHandler,
    pub pattern: String,
}

/// The routing primitive the mux builds on.
///
/// The pattern grammar is owned by the implementation; the mux forwards
/// pattern strings verbatim and never interprets them.
pub trait PatternMatcher: Send + Sync {
    /// Associate a handler with a pattern.
    fn register(&mut self, pattern: &str, handler: SharedHandler) -> Result<(), RegisterError>;

    /// Find the best handler for a request, or `None` when nothing matches.
    fn resolve(&self, req: &Request<Body>) -> Option<RouteMatch>;
}

struct Entry {
    pattern: String,
    handler: SharedHandler,
}

/// Default matcher: method-qualified patterns over matchit route tables.
///
/// Patterns take the form `"/path"` (any method) or `"METHOD /path"`.
/// Path segments follow matchit's grammar, including `{param}` and
/// `{*wildcard}` captures.
pub struct MethodPathMatcher {
    by_method: HashMap<Method, matchit::Router<Entry>>,
    any_method: matchit::Router<Entry>,
}

impl Default for MethodPathMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodPathMatcher {
    pub fn new() -> Self {
        Self {
            by_method: HashMap::new(),
            any_method: matchit::Router::new(),
        }
    }

    /// Split a pattern into its optional method qualifier and path.
    fn split_pattern(pattern: &str) -> Result<(Option<Method>, &str), RegisterError> {
        if pattern.starts_with('/') {
            return Ok((None, pattern));
        }
        let (method, path) = pattern
            .split_once(' ')
            .ok_or_else(|| RegisterError::BadPattern(pattern.to_string()))?;
        let method = method
            .parse::<Method>()
            .map_err(|_| RegisterError::BadPattern(pattern.to_string()))?;
        let path = path.trim_start();
        if !path.starts_with('/') {
            return Err(RegisterError::BadPattern(pattern.to_string()));
        }
        Ok((Some(method), path))
    }
}

impl PatternMatcher for MethodPathMatcher {
    fn register(&mut self, pattern: &str, handler: SharedHandler) -> Result<(), RegisterError> {
        let (method, path) = Self::split_pattern(pattern)?;
        let table = match method {
            Some(m) => self.by_method.entry(m).or_insert_with(matchit::Router::new),
            None => &mut self.any_method,
        };
        let entry = Entry {
            pattern: pattern.to_string(),
            handler,
        };
        table
            .insert(path, entry)
            .map_err(|source| RegisterError::Conflict {
                pattern: pattern.to_string(),
                source,
            })
    }

    fn resolve(&self, req: &Request<Body>) -> Option<RouteMatch> {
        let path = req.uri().path();
        let entry = self
            .by_method
            .get(req.method())
            .and_then(|table| table.at(path).ok())
            .or_else(|| self.any_method.at(path).ok())?;
        Some(RouteMatch {
            handler: Arc::clone(&entry.value.handler),
            pattern: entry.value.pattern.clone(),
        })
    }
}

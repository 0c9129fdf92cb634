//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Setup (single-threaded):
//!     use_middleware() → register() (current chain baked into the route)
//!     group() → scoped copy: shared route table, private middleware chain
//!
//! Dispatch (concurrent, read-only):
//!     Incoming request (method, path)
//!         → matcher.rs (resolve against registered patterns)
//!         → matched: run the pre-wrapped handler
//!         → no match: run the not-found handler
//! ```
//!
//! # Design Decisions
//! - Middleware is composed at registration time, not per request
//! - The pattern grammar belongs to the matcher, not the mux
//! - Groups share one route table, so conflicts stay fatal across scopes
//! - Immutable after setup (thread-safe dispatch without contention)

pub mod matcher;
pub mod mux;

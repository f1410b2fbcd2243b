//! # Router Module
//!
//! The router module provides path matching and route resolution for routebench.
//! Routes are registered with a method, a path template and a [`Handler`], and
//! incoming requests are resolved against them segment by segment.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Parsing path templates such as `/user/:id` into [`RoutePattern`]s
//! - Holding the ordered, immutable-after-startup route table
//! - Matching an incoming method + path to the first registered route that fits
//! - Binding the values of parameter segments for the matched route
//!
//! ## Matching rules
//!
//! - A path is split on `/`; one leading and one trailing empty segment are ignored,
//!   so `/user/42` and `/user/42/` both yield `["user", "42"]`.
//! - A route is a candidate only if its method equals the request method and its
//!   pattern has the same number of segments as the path.
//! - Literal segments compare exactly (case-sensitive). Parameter segments match any
//!   single non-empty segment and capture it verbatim as a string.
//! - Candidates are tried in registration order; the first full match wins. Two
//!   patterns with the same shape are never reordered, so the earlier one always wins.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routebench::router::Router;
//! use routebench::server::{RequestContext, ResponseBuilder};
//! use routebench::dispatcher::HandlerResult;
//!
//! fn show_user(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
//!     res.write_string(ctx.param("id"))?;
//!     Ok(())
//! }
//!
//! let mut router = Router::new();
//! router.get("/user/:id", show_user);
//!
//! let matched = router.route(&Method::GET, "/user/42").unwrap();
//! assert_eq!(matched.get_path_param("id"), Some("42"));
//! assert!(router.route(&Method::POST, "/user/42").is_none());
//! ```
//!
//! ## Concurrency
//!
//! Once built, a [`Router`] is shared behind an `Arc` and only read. Matching takes
//! `&self`, allocates its bindings per call, and needs no locking.
//!
//! [`Handler`]: crate::dispatcher::Handler

mod core;

pub use core::{
    split_path, ParamBindings, Route, RouteMatch, RoutePattern, Router, Segment,
    MAX_INLINE_PARAMS, PARAM_MARKER,
};

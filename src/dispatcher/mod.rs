//! # Dispatcher Module
//!
//! The dispatcher drives one request from parsed input to a finalized
//! [`ResponsePayload`](crate::server::ResponsePayload).
//!
//! ## Request Flow
//!
//! 1. The transport adapter parses method, path, query and body into a
//!    [`ParsedRequest`](crate::server::ParsedRequest) (`Idle -> Matching`)
//! 2. The router resolves the method + path; no match answers `404`
//!    (`Matching -> Responded`)
//! 3. A [`RequestContext`](crate::server::RequestContext) is built from the
//!    bindings and the handler runs against a fresh
//!    [`ResponseBuilder`](crate::server::ResponseBuilder) (`Matching -> Handling`)
//! 4. The builder's single write becomes the response (`Handling -> Responded`)
//!
//! ## Error Handling
//!
//! - Handler errors and panics are caught and answered with `500`
//! - A handler that returns without writing is answered with `500`
//! - Nothing escapes `dispatch`; a failing request never affects the route
//!   table or other requests running on other coroutines
//!
//! Validation failures (bad path parameter, malformed JSON) are not dispatcher
//! concerns: handlers serialize those as `400` themselves.

mod core;

pub use core::{DispatchState, Dispatcher, Handler, HandlerResult};

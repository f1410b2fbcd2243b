//! # routebench
//!
//! **routebench** is a small, coroutine-powered HTTP routing core used as a
//! throughput benchmark target. It serves a fixed table of demo routes over the
//! `may` runtime.
//!
//! ## Architecture
//!
//! - **[`router`]** - Path templates (`/user/:id`) and first-match route resolution
//! - **[`server`]** - Request parsing, the per-request [`RequestContext`](server::RequestContext),
//!   the single-write [`ResponseBuilder`](server::ResponseBuilder), and the `may_minihttp` adapter
//! - **[`dispatcher`]** - The per-request state machine that turns a parsed request into
//!   exactly one response, isolating handler errors and panics
//! - **[`controllers`]** - The six demo route handlers
//! - **[`registry`]** - Registration of the demo routes in precedence order
//! - **[`logging`]** / **[`runtime_config`]** - Environment-driven startup configuration
//! - **[`cli`]** - Argument parsing and server startup shared by both binaries
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as AppService
//!     participant Dispatcher
//!     participant Router
//!     participant Handler
//!
//!     Client->>Server: HTTP Request
//!     Server->>Server: parse method, path, query, body
//!     Server->>Dispatcher: dispatch(request)
//!     Dispatcher->>Router: route(method, path)
//!     alt No Route Match
//!         Dispatcher-->>Client: 404 {"error":"Not Found",...}
//!     end
//!     Dispatcher->>Handler: handle(ctx, builder)
//!     alt Handler errors, panics, or never writes
//!         Dispatcher-->>Client: 500 Internal Server Error
//!     end
//!     Handler-->>Dispatcher: single terminal write
//!     Dispatcher-->>Server: ResponsePayload
//!     Server-->>Client: HTTP Response
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use routebench::dispatcher::Dispatcher;
//! use routebench::registry::build_router;
//! use routebench::server::{AppService, HttpServer};
//!
//! let router = Arc::new(build_router());
//! let service = AppService::new(Arc::new(Dispatcher::new(router)));
//! let handle = HttpServer(service).start("0.0.0.0:3001").unwrap();
//! handle.join().unwrap();
//! ```
//!
//! ## Runtime Considerations
//!
//! routebench runs on the `may` coroutine runtime, not tokio. Connection
//! coroutine stack size is set through `ROUTEBENCH_STACK_SIZE`; handlers run on
//! those stacks and should stay shallow.

pub mod cli;
pub mod controllers;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{Dispatcher, Handler, HandlerResult};
pub use error::{DecodeError, RequestError, ResponseError};
pub use router::Router;
pub use server::{AppService, RequestContext, ResponseBuilder, ResponsePayload};

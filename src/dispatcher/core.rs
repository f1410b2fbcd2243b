//! Dispatcher core module - hot path for request dispatch.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::ids::RequestId;
use crate::router::Router;
use crate::server::{ParsedRequest, RequestContext, ResponseBuilder, ResponsePayload};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Outcome of a handler invocation. Any `Err` becomes a `500`.
pub type HandlerResult = anyhow::Result<()>;

/// The single shape every route handler takes.
///
/// A handler reads from the [`RequestContext`] and finalizes the
/// [`ResponseBuilder`] with exactly one terminal write. Plain functions and
/// closures with the matching signature implement it automatically.
pub trait Handler: Send + Sync {
    /// Process one request
    ///
    /// # Errors
    ///
    /// Any error is logged and answered with `500 Internal Server Error`.
    fn handle(&self, ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&RequestContext<'_>, &mut ResponseBuilder) -> HandlerResult + Send + Sync,
{
    fn handle(&self, ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
        self(ctx, res)
    }
}

/// Per-request control states.
///
/// `Idle -> Matching -> Handling -> Responded`, with `Matching -> Responded`
/// as the not-found short circuit. `Responded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Matching,
    Handling,
    Responded,
}

impl DispatchState {
    #[must_use]
    pub fn can_advance_to(self, next: DispatchState) -> bool {
        matches!(
            (self, next),
            (DispatchState::Idle, DispatchState::Matching)
                | (DispatchState::Matching, DispatchState::Handling)
                | (DispatchState::Matching, DispatchState::Responded)
                | (DispatchState::Handling, DispatchState::Responded)
        )
    }

    fn advance(&mut self, next: DispatchState, request_id: RequestId) {
        debug_assert!(
            self.can_advance_to(next),
            "invalid dispatch transition {self:?} -> {next:?}"
        );
        debug!(request_id = %request_id, from = ?self, to = ?next, "Dispatch state");
        *self = next;
    }
}

/// Per-request control loop: match, build the context, run the handler, and
/// turn whatever happened into exactly one [`ResponsePayload`].
///
/// Holds the route table by `Arc` and never mutates it, so one dispatcher can be
/// shared by every connection.
pub struct Dispatcher {
    router: Arc<Router>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Run one request to completion.
    ///
    /// Never panics and never fails: an unmatched route yields `404`, and a
    /// handler that errors, panics, or returns without writing yields `500`.
    #[must_use]
    pub fn dispatch(&self, request: &ParsedRequest) -> ResponsePayload {
        let request_id = RequestId::new();
        let mut state = DispatchState::Idle;
        state.advance(DispatchState::Matching, request_id);

        let Some(route_match) = self.router.route(&request.method, &request.path) else {
            state.advance(DispatchState::Responded, request_id);
            warn!(
                request_id = %request_id,
                method = %request.method,
                path = %request.path,
                "No route matched"
            );
            return ResponsePayload::not_found(request.method.as_str(), &request.path);
        };

        state.advance(DispatchState::Handling, request_id);
        let route_pattern = route_match.route.pattern().as_str();
        let handler = route_match.handler();
        let ctx = RequestContext::new(request, route_match.path_params);
        let mut builder = ResponseBuilder::new();
        let start = Instant::now();

        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| handler.handle(&ctx, &mut builder)));
        let elapsed_us = start.elapsed().as_micros();
        state.advance(DispatchState::Responded, request_id);

        let payload = match outcome {
            Ok(Ok(())) => match builder.finish() {
                Some(payload) => payload,
                None => {
                    error!(
                        request_id = %request_id,
                        route_pattern = %route_pattern,
                        "Handler returned without writing a response"
                    );
                    ResponsePayload::internal_error()
                }
            },
            Ok(Err(e)) => {
                error!(
                    request_id = %request_id,
                    route_pattern = %route_pattern,
                    error = %e,
                    "Handler failed"
                );
                ResponsePayload::internal_error()
            }
            Err(panic) => {
                error!(
                    request_id = %request_id,
                    route_pattern = %route_pattern,
                    panic_message = %panic_message(panic.as_ref()),
                    "Handler panicked"
                );
                ResponsePayload::internal_error()
            }
        };

        info!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            route_pattern = %route_pattern,
            status = payload.status,
            duration_us = elapsed_us,
            "Request handled"
        );
        payload
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::{json, Value};

    fn dispatcher(build: impl FnOnce(&mut Router)) -> Dispatcher {
        let mut router = Router::new();
        build(&mut router);
        Dispatcher::new(Arc::new(router))
    }

    fn get(path: &str) -> ParsedRequest {
        ParsedRequest::from_parts("GET", path, Vec::new()).unwrap()
    }

    fn failing(_ctx: &RequestContext<'_>, _res: &mut ResponseBuilder) -> HandlerResult {
        anyhow::bail!("database unavailable")
    }

    fn panicking(_ctx: &RequestContext<'_>, _res: &mut ResponseBuilder) -> HandlerResult {
        panic!("boom")
    }

    fn silent(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
        res.set_status(201)?;
        Ok(())
    }

    fn writes_twice(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
        res.write_string("one")?;
        res.write_string("two")?;
        Ok(())
    }

    fn echo_word(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
        res.write_string(ctx.param("word"))?;
        Ok(())
    }

    #[test]
    fn test_state_transitions() {
        use DispatchState::*;
        assert!(Idle.can_advance_to(Matching));
        assert!(Matching.can_advance_to(Handling));
        assert!(Matching.can_advance_to(Responded));
        assert!(Handling.can_advance_to(Responded));
        assert!(!Idle.can_advance_to(Handling));
        assert!(!Responded.can_advance_to(Idle));
        assert!(!Handling.can_advance_to(Matching));
    }

    #[test]
    fn test_unmatched_is_404() {
        let d = dispatcher(|_| {});
        let payload = d.dispatch(&get("/missing"));
        assert_eq!(payload.status, 404);
        let body: Value = serde_json::from_slice(&payload.body).unwrap();
        assert_eq!(body, json!({"error": "Not Found", "method": "GET", "path": "/missing"}));
    }

    #[test]
    fn test_handler_error_is_500() {
        let d = dispatcher(|r| {
            r.get("/fail", failing);
        });
        let payload = d.dispatch(&get("/fail"));
        assert_eq!(payload.status, 500);
        assert!(!payload.body_text().contains("database"));
    }

    #[test]
    fn test_handler_panic_is_500() {
        let d = dispatcher(|r| {
            r.get("/boom", panicking);
        });
        assert_eq!(d.dispatch(&get("/boom")).status, 500);
        // still serving
        assert_eq!(d.dispatch(&get("/missing")).status, 404);
    }

    #[test]
    fn test_handler_without_write_is_500() {
        let d = dispatcher(|r| {
            r.get("/silent", silent);
        });
        assert_eq!(d.dispatch(&get("/silent")).status, 500);
    }

    #[test]
    fn test_double_write_is_500() {
        let d = dispatcher(|r| {
            r.get("/twice", writes_twice);
        });
        assert_eq!(d.dispatch(&get("/twice")).status, 500);
    }

    #[test]
    fn test_params_reach_handler() {
        let d = dispatcher(|r| {
            r.get("/echo/:word", echo_word);
        });
        let payload = d.dispatch(&get("/echo/hi"));
        assert_eq!(payload.status, 200);
        assert_eq!(payload.body_text(), "hi");
    }

    #[test]
    fn test_method_mismatch_is_404() {
        let d = dispatcher(|r| {
            r.get("/echo/:word", echo_word);
        });
        let post = ParsedRequest::from_parts("POST", "/echo/hi", Vec::new()).unwrap();
        assert_eq!(post.method, Method::POST);
        assert_eq!(d.dispatch(&post).status, 404);
    }
}

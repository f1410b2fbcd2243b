// Handler for `GET /search`.
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};
use serde::Serialize;

pub const RESULTS: [&str; 3] = ["result1", "result2", "result3"];

/// `limit` is echoed exactly as received; it is never parsed.
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub query: &'a str,
    pub limit: &'a str,
    pub results: &'static [&'static str],
}

pub fn handle(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_json(&Response {
        query: ctx.query("q", "default"),
        limit: ctx.query("limit", "10"),
        results: &RESULTS,
    })?;
    Ok(())
}

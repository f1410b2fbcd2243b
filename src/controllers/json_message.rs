// Handler for `GET /json`.
use super::hello::GREETING;
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response {
    pub message: &'static str,
    pub status: &'static str,
}

pub fn handle(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_json(&Response {
        message: GREETING,
        status: "success",
    })?;
    Ok(())
}

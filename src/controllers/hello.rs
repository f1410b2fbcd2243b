// Handler for `GET /`.
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};

pub const GREETING: &str = "Hello, World!";

pub fn handle(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_string(GREETING)?;
    Ok(())
}

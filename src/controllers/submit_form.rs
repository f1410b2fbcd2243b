// Handler for `POST /form`.
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'static str,
}

pub fn handle(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_json(&Response {
        name: ctx.form_value("name"),
        email: ctx.form_value("email"),
        message: "Form received",
    })?;
    Ok(())
}

// Handler for `GET /user/:id`.
use super::types::{ErrorBody, User};
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};

pub fn handle(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    let Ok(id) = ctx.param("id").parse::<i64>() else {
        res.set_status(400)?.write_json(&ErrorBody {
            error: "Invalid ID",
        })?;
        return Ok(());
    };

    res.write_json(&User {
        id,
        name: "John Doe".to_owned(),
        email: "john@example.com".to_owned(),
    })?;
    Ok(())
}

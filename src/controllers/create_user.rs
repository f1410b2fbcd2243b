// Handler for `POST /user`.
use super::types::{ErrorBody, User};
use crate::dispatcher::HandlerResult;
use crate::server::{RequestContext, ResponseBuilder};

/// Id assigned to every created user, whatever the body says.
pub const ASSIGNED_ID: i64 = 123;

pub fn handle(ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    // a bare `null` body decodes to an all-default user
    let mut user = match ctx.decode_json_body::<Option<User>>() {
        Ok(user) => user.unwrap_or_default(),
        Err(e) => {
            res.set_status(400)?.write_json(&ErrorBody { error: &e.message })?;
            return Ok(());
        }
    };

    user.id = ASSIGNED_ID;
    res.set_status(201)?.write_json(&user)?;
    Ok(())
}

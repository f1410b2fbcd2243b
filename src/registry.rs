// Route table for the demo benchmark server.

use crate::controllers::{create_user, get_user, hello, json_message, search, submit_form};
use crate::router::Router;

/// Register every demo route, in precedence order.
pub fn register_all(router: &mut Router) {
    router
        .get("/", hello::handle)
        .get("/json", json_message::handle)
        .get("/user/:id", get_user::handle)
        .get("/search", search::handle)
        .post("/user", create_user::handle)
        .post("/form", submit_form::handle);
}

/// Build the finalized demo route table.
#[must_use]
pub fn build_router() -> Router {
    let mut router = Router::new();
    register_all(&mut router);
    router
}

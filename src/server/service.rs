use super::request::parse_request;
use super::response::{write_payload, ResponsePayload};
use crate::dispatcher::Dispatcher;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use tracing::warn;

/// `may_minihttp` service that feeds every request through the [`Dispatcher`].
///
/// Cloned once per connection by the transport; clones share the same
/// read-only dispatcher and route table.
#[derive(Clone)]
pub struct AppService {
    dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let payload = match parse_request(req) {
            Ok(parsed) => self.dispatcher.dispatch(&parsed),
            Err(e) => {
                warn!(error = %e, "Rejected unparseable request");
                ResponsePayload::json_error(400, &e.to_string())
            }
        };
        write_payload(res, payload);
        Ok(())
    }
}

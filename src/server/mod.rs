pub mod context;
pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use context::RequestContext;
pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use response::{write_payload, ContentType, ResponseBuilder, ResponsePayload};
pub use service::AppService;

use crate::error::RequestError;
use http::Method;
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Parsed HTTP request data handed from the transport to the dispatcher.
///
/// Owned by exactly one in-flight request and dropped once its response is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Decoded query string parameters; the first value wins on duplicate keys
    pub query: HashMap<String, String>,
    /// Raw body bytes, fully buffered by the transport
    pub body: Vec<u8>,
}

impl ParsedRequest {
    /// Build a request from a method token, a request target (path plus optional
    /// query string) and the buffered body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidMethod`] if `method` is not a valid HTTP token.
    pub fn from_parts(method: &str, target: &str, body: Vec<u8>) -> Result<Self, RequestError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| RequestError::InvalidMethod(method.to_owned()))?;
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query_params(query)),
            None => (target, HashMap::new()),
        };
        Ok(Self {
            method,
            path: if path.is_empty() { "/".to_owned() } else { path.to_owned() },
            query,
            body,
        })
    }
}

/// Parse a query string (without the leading `?`) using
/// `application/x-www-form-urlencoded` rules.
///
/// Duplicate keys keep the first value.
#[must_use]
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()).into_owned() {
        params.entry(key).or_insert(value);
    }
    params
}

/// Parse an incoming `may_minihttp` request into a [`ParsedRequest`].
///
/// Reads the whole body from the connection buffer before returning.
///
/// # Errors
///
/// Returns an error if the method is invalid or the body cannot be read.
pub fn parse_request(req: Request) -> Result<ParsedRequest, RequestError> {
    let method = req.method().to_owned();
    let target = req.path().to_owned();

    let mut body = Vec::new();
    let size = req.body().read_to_end(&mut body)?;

    let parsed = ParsedRequest::from_parts(&method, &target, body)?;
    debug!(
        method = %parsed.method,
        path = %parsed.path,
        query_params = ?parsed.query,
        body_size_bytes = size,
        "HTTP request parsed"
    );
    Ok(parsed)
}

use crate::error::ResponseError;
use may_minihttp::Response;
use serde::Serialize;
use serde_json::json;

/// Content types the core can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    PlainText,
    Json,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::PlainText => "text/plain; charset=utf-8",
            ContentType::Json => "application/json",
        }
    }

    fn header_line(self) -> &'static str {
        match self {
            ContentType::PlainText => "Content-Type: text/plain; charset=utf-8",
            ContentType::Json => "Content-Type: application/json",
        }
    }
}

/// Finalized status, content type and body for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    pub status: u16,
    pub content_type: ContentType,
    pub body: Vec<u8>,
}

impl ResponsePayload {
    /// JSON `{"error": message}` with the given status
    #[must_use]
    pub fn json_error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: ContentType::Json,
            body: json!({ "error": message }).to_string().into_bytes(),
        }
    }

    #[must_use]
    pub fn not_found(method: &str, path: &str) -> Self {
        Self {
            status: 404,
            content_type: ContentType::Json,
            body: json!({ "error": "Not Found", "method": method, "path": path })
                .to_string()
                .into_bytes(),
        }
    }

    #[must_use]
    pub fn internal_error() -> Self {
        Self::json_error(500, "Internal Server Error")
    }

    /// Body as UTF-8, lossily
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Accumulates the status and the single terminal write for one request.
///
/// The status defaults to `200`. Exactly one of [`write_string`](Self::write_string)
/// or [`write_json`](Self::write_json) may succeed; any later write or status change
/// fails with [`ResponseError::AlreadyWritten`] instead of overwriting.
#[derive(Debug)]
pub struct ResponseBuilder {
    status: u16,
    payload: Option<ResponsePayload>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            payload: None,
        }
    }

    /// Record the status code for the upcoming write.
    ///
    /// # Errors
    ///
    /// Fails if the response has already been written.
    pub fn set_status(&mut self, code: u16) -> Result<&mut Self, ResponseError> {
        if self.payload.is_some() {
            return Err(ResponseError::AlreadyWritten);
        }
        self.status = code;
        Ok(self)
    }

    /// Finalize with a plain-text body.
    ///
    /// # Errors
    ///
    /// Fails if the response has already been written.
    pub fn write_string(&mut self, body: impl Into<String>) -> Result<(), ResponseError> {
        self.finalize(ContentType::PlainText, body.into().into_bytes())
    }

    /// Finalize with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the response has already been written or `value` cannot be
    /// serialized. A serialization failure leaves the builder unwritten.
    pub fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ResponseError> {
        if self.payload.is_some() {
            return Err(ResponseError::AlreadyWritten);
        }
        let body = serde_json::to_vec(value)?;
        self.finalize(ContentType::Json, body)
    }

    fn finalize(&mut self, content_type: ContentType, body: Vec<u8>) -> Result<(), ResponseError> {
        if self.payload.is_some() {
            return Err(ResponseError::AlreadyWritten);
        }
        self.payload = Some(ResponsePayload {
            status: self.status,
            content_type,
            body,
        });
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn is_written(&self) -> bool {
        self.payload.is_some()
    }

    /// Take the finalized payload, or `None` if nothing was written.
    #[must_use]
    pub fn finish(self) -> Option<ResponsePayload> {
        self.payload
    }
}

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Copy a finalized payload onto the transport response.
pub fn write_payload(res: &mut Response, payload: ResponsePayload) {
    res.status_code(usize::from(payload.status), status_reason(payload.status));
    res.header(payload.content_type.header_line());
    res.body_vec(payload.body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(201), "Created");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(422), "Unprocessable Entity");
        assert_eq!(status_reason(299), "Unknown");
        assert_eq!(status_reason(418), "Unknown");
    }

    #[test]
    fn test_default_status_is_200() {
        let mut res = ResponseBuilder::new();
        res.write_string("Hello, World!").unwrap();
        let payload = res.finish().unwrap();
        assert_eq!(payload.status, 200);
        assert_eq!(payload.content_type, ContentType::PlainText);
        assert_eq!(payload.body, b"Hello, World!");
    }

    #[test]
    fn test_status_then_json() {
        let mut res = ResponseBuilder::new();
        res.set_status(201)
            .unwrap()
            .write_json(&json!({"id": 123}))
            .unwrap();
        let payload = res.finish().unwrap();
        assert_eq!(payload.status, 201);
        assert_eq!(payload.content_type, ContentType::Json);
        let body: Value = serde_json::from_slice(&payload.body).unwrap();
        assert_eq!(body, json!({"id": 123}));
    }

    #[test]
    fn test_second_write_fails_and_keeps_first() {
        let mut res = ResponseBuilder::new();
        res.write_string("first").unwrap();
        assert!(matches!(
            res.write_json(&json!({"x": 1})),
            Err(ResponseError::AlreadyWritten)
        ));
        assert!(matches!(
            res.write_string("second"),
            Err(ResponseError::AlreadyWritten)
        ));
        assert!(res.set_status(500).is_err());
        let payload = res.finish().unwrap();
        assert_eq!(payload.status, 200);
        assert_eq!(payload.body_text(), "first");
    }

    #[test]
    fn test_unwritten_builder_finishes_empty() {
        let mut res = ResponseBuilder::new();
        assert_eq!(res.status(), 200);
        res.set_status(204).unwrap();
        assert_eq!(res.status(), 204);
        assert!(!res.is_written());
        assert!(res.finish().is_none());
    }

    #[test]
    fn test_not_found_payload() {
        let payload = ResponsePayload::not_found("GET", "/nope");
        let body: Value = serde_json::from_slice(&payload.body).unwrap();
        assert_eq!(payload.status, 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/nope");
    }
}

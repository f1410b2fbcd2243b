use super::request::ParsedRequest;
use crate::error::DecodeError;
use crate::router::ParamBindings;
use http::Method;
use once_cell::unsync::OnceCell;
use serde::de::DeserializeOwned;

/// Read-only view over one incoming request, handed to every [`Handler`].
///
/// Path parameters come from the router; query, JSON and form accessors read
/// from the already buffered [`ParsedRequest`]. None of the lookups fail on a
/// missing key.
///
/// [`Handler`]: crate::dispatcher::Handler
#[derive(Debug)]
pub struct RequestContext<'r> {
    request: &'r ParsedRequest,
    params: ParamBindings,
    form: OnceCell<Vec<(String, String)>>,
}

impl<'r> RequestContext<'r> {
    #[must_use]
    pub fn new(request: &'r ParsedRequest, params: ParamBindings) -> Self {
        Self {
            request,
            params,
            form: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.request.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.request.path
    }

    /// Raw body bytes
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.request.body
    }

    /// Bound value of a path parameter, or `""` if the matched route declares no
    /// parameter by that name.
    #[must_use]
    pub fn param(&self, name: &str) -> &str {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Query parameter `name`, or `default` when absent.
    #[must_use]
    pub fn query<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.request
            .query
            .get(name)
            .map_or(default, String::as_str)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// Unknown fields are ignored. Fields absent from the body keep their default
    /// only if `T` opts in with `#[serde(default)]`; otherwise absence is an error.
    /// Nothing is returned unless decoding succeeds completely.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for malformed JSON or a body whose structure does not
    /// fit `T`.
    pub fn decode_json_body<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_slice(&self.request.body).map_err(DecodeError::from)
    }

    /// First value of form field `name` in an `application/x-www-form-urlencoded`
    /// body, or `""` if absent.
    ///
    /// The body is decoded on first use and cached for the rest of the request.
    #[must_use]
    pub fn form_value(&self, name: &str) -> &str {
        self.form
            .get_or_init(|| {
                url::form_urlencoded::parse(&self.request.body)
                    .into_owned()
                    .collect()
            })
            .iter()
            .find(|(k, _)| k == name)
            .map_or("", |(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Shape {
        id: i64,
        name: String,
    }

    fn request(target: &str, body: &[u8]) -> ParsedRequest {
        ParsedRequest::from_parts("POST", target, body.to_vec()).unwrap()
    }

    #[test]
    fn test_param_present_and_absent() {
        let req = request("/user/42", b"");
        let mut params = ParamBindings::new();
        params.push((Arc::from("id"), "42".to_string()));
        let ctx = RequestContext::new(&req, params);
        assert_eq!(ctx.param("id"), "42");
        assert_eq!(ctx.param("missing"), "");
    }

    #[test]
    fn test_query_with_default() {
        let req = request("/search?q=foo", b"");
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert_eq!(ctx.query("q", "default"), "foo");
        assert_eq!(ctx.query("limit", "10"), "10");
    }

    #[test]
    fn test_query_present_but_empty_is_not_defaulted() {
        let req = request("/search?q=", b"");
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert_eq!(ctx.query("q", "default"), "");
    }

    #[test]
    fn test_decode_json_ignores_unknown_and_defaults_missing() {
        let req = request("/user", br#"{"name":"Jane","extra":true}"#);
        let ctx = RequestContext::new(&req, ParamBindings::new());
        let shape: Shape = ctx.decode_json_body().unwrap();
        assert_eq!(
            shape,
            Shape {
                id: 0,
                name: "Jane".into()
            }
        );
    }

    #[test]
    fn test_decode_json_malformed() {
        let req = request("/user", br#"{"name":"Ja"#);
        let ctx = RequestContext::new(&req, ParamBindings::new());
        let err = ctx.decode_json_body::<Shape>().unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_decode_json_wrong_type_is_an_error() {
        let req = request("/user", br#"{"id":"abc"}"#);
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert!(ctx.decode_json_body::<Shape>().is_err());
    }

    #[test]
    fn test_decode_json_empty_body_is_an_error() {
        let req = request("/user", b"");
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert!(ctx.decode_json_body::<Shape>().is_err());
    }

    #[test]
    fn test_form_value_decodes_and_takes_first() {
        let req = request("/form", b"name=Bob&email=b%40x.com&name=Alice");
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert_eq!(ctx.form_value("name"), "Bob");
        assert_eq!(ctx.form_value("email"), "b@x.com");
        assert_eq!(ctx.form_value("missing"), "");
    }

    #[test]
    fn test_form_value_on_non_form_body() {
        let req = request("/form", b"");
        let ctx = RequestContext::new(&req, ParamBindings::new());
        assert_eq!(ctx.form_value("name"), "");
    }
}

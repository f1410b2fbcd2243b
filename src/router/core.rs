//! Router core module - hot path for request routing.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::dispatcher::Handler;
use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Character that marks a pattern segment as a named parameter (`/user/:id`).
pub const PARAM_MARKER: char = ':';

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter values bound by a successful match, in pattern order.
///
/// Param names use `Arc<str>` because they come from the route table and are
/// cloned into every match; values are per-request data from the URL.
pub type ParamBindings = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Split a request path or a pattern string into its segments.
///
/// One leading and one trailing `/` are ignored; every other `/` separates
/// segments, so interior empty segments (`/a//b`) are preserved and can never
/// satisfy a parameter.
#[must_use]
pub fn split_path(path: &str) -> SmallVec<[&str; MAX_INLINE_PARAMS]> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return SmallVec::new();
    }
    trimmed.split('/').collect()
}

/// One segment of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// Matches any single non-empty request segment and binds it under this name
    Param(Arc<str>),
}

impl Segment {
    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == value,
            Segment::Param(_) => !value.is_empty(),
        }
    }
}

/// A path template compiled once at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a template such as `/user/:id/posts`.
    ///
    /// A segment beginning with [`PARAM_MARKER`] is a parameter named by the rest
    /// of the segment; every other segment is a literal.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .into_iter()
            .map(|seg| match seg.strip_prefix(PARAM_MARKER) {
                Some(name) => Segment::Param(Arc::from(name)),
                None => Segment::Literal(seg.to_owned()),
            })
            .collect();
        Self {
            raw: pattern.to_owned(),
            segments,
        }
    }

    /// The template as it was registered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_ref()),
            Segment::Literal(_) => None,
        })
    }

    /// Compare against already split request segments, capturing parameters.
    ///
    /// Returns `None` as soon as a segment fails; nothing is bound in that case.
    #[must_use]
    pub fn bind(&self, path_segments: &[&str]) -> Option<ParamBindings> {
        if path_segments.len() != self.segments.len() {
            return None;
        }
        let mut params = ParamBindings::new();
        for (segment, value) in self.segments.iter().zip(path_segments) {
            if !segment.matches(value) {
                return None;
            }
            if let Segment::Param(name) = segment {
                params.push((Arc::clone(name), (*value).to_owned()));
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A registered route. Immutable once it is in the table.
pub struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: Arc<dyn Handler>,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.raw)
            .finish_non_exhaustive()
    }
}

/// Result of successfully matching a request to a route
#[derive(Debug)]
pub struct RouteMatch<'r> {
    /// The winning route
    pub route: &'r Route,
    /// Values captured by the route's parameter segments
    pub path_params: ParamBindings,
}

impl<'r> RouteMatch<'r> {
    #[must_use]
    pub fn handler(&self) -> &'r dyn Handler {
        self.route.handler()
    }

    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics if a pattern repeats a parameter name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered route table and matcher.
///
/// Built with `&mut self` registration calls during startup, then shared as
/// `Arc<Router>` and only read for the rest of the process.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route to the table.
    ///
    /// No check is made for duplicate or overlapping patterns; the first
    /// registered route wins at match time.
    pub fn register<H>(&mut self, method: Method, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        let pattern = RoutePattern::parse(pattern);
        debug!(
            method = %method,
            pattern = %pattern,
            params = ?pattern.param_names().collect::<Vec<_>>(),
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(Route {
            method,
            pattern,
            handler: Arc::new(handler),
        });
        self
    }

    pub fn get<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.register(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.register(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.register(Method::PUT, pattern, handler)
    }

    pub fn delete<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.register(Method::DELETE, pattern, handler)
    }

    /// Match an HTTP request to a route
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - The first registered route whose method and every
    ///   segment fit, with its parameter bindings
    /// * `None` - If no route matches (results in 404)
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let segments = split_path(path);
        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(path_params) = route.pattern.bind(&segments) {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    path_params = ?path_params,
                    "Route matched"
                );
                return Some(RouteMatch { route, path_params });
            }
        }
        debug!(method = %method, path = %path, "No route matched");
        None
    }

    /// Registered routes in precedence order
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Log the routing table, one line per route.
    pub fn dump_routes(&self) {
        info!(routes_count = self.routes.len(), "Routing table loaded");
        for route in &self.routes {
            info!(method = %route.method, pattern = %route.pattern, "Route");
        }
    }
}

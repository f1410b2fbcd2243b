//! Demo route handlers.
//!
//! One module per route. Each handler has the uniform [`Handler`] shape and
//! serializes an explicit response record rather than an ad hoc JSON map.
//!
//! [`Handler`]: crate::dispatcher::Handler

pub mod create_user;
pub mod get_user;
pub mod hello;
pub mod json_message;
pub mod search;
pub mod submit_form;
pub mod types;

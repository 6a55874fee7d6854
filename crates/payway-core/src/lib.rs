#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Error taxonomy and response classification for the PayWay REST API
//!
//! Turns one completed HTTP exchange into exactly one of: a success the
//! caller parses, a list of documented field-level validation errors
//! returned as data, or a terminal [`PaywayError`]. The taxonomy resolves
//! the gateway's documented response codes to their canonical messages.

pub mod classify;
pub mod error;
pub mod taxonomy;

pub use classify::{Classification, FieldError, RawResponse, ServerFault, classify};
pub use error::{PaywayError, Result, UnknownCode};
pub use taxonomy::{ErrorCategory, GatewayError};

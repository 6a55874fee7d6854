#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed async HTTP client for Westpac's PayWay REST API
//!
//! Covers tokenization of card and bank-account details, customer
//! management, transaction processing, refunds and voids, and scheduled
//! billing. The client marshals requests, classifies responses (see
//! `payway-core`) and unmarshals payloads; retries, persistence and
//! business rules stay with the caller.

pub mod client;
pub mod config;
pub mod types;

pub use client::{ApiOutcome, Client};
pub use config::Endpoints;
pub use payway_core::{
    Classification, ErrorCategory, FieldError, GatewayError, PaywayError, RawResponse, ServerFault,
    classify,
};
pub use types::*;

//! Core signing components for the awslite clients.
//!
//! This crate implements AWS Signature Version 4 for plain HTTP requests:
//!
//! - [`EndpointBuilder`]: computes the absolute URL (and therefore the signed
//!   `host` value) from a base endpoint, an optional virtual-host subdomain
//!   and a resource path
//! - [`RequestSigner`]: canonicalizes a request, derives the scoped signing
//!   key and produces the `Authorization` header value
//! - [`Client`]: attaches the mandatory AWS headers, signs, and hands the
//!   request to the configured transport
//! - [`Context`] / [`HttpSend`]: the transport seam; signing itself performs
//!   no I/O
//!
//! Service adapters (`awslite-s3`, `awslite-sqs`) are thin layers over
//! [`Client`] that assemble paths and bodies and decode responses.
//!
//! ## Example
//!
//! ```no_run
//! use awslite_core::{Client, Context, Credential};
//! use bytes::Bytes;
//! use http::{HeaderMap, Method};
//!
//! # async fn example() -> awslite_core::Result<()> {
//! let client = Client::new(
//!     Context::new(),
//!     "https://s3.us-east-1.amazonaws.com",
//!     "us-east-1",
//!     "s3",
//!     Credential::new("access_key_id", "secret_access_key"),
//!     "awslite",
//! )?;
//!
//! // A signed request, ready for any transport.
//! let req = client.build_request(
//!     Method::GET,
//!     "my-bucket",
//!     "my-object",
//!     HeaderMap::new(),
//!     Bytes::new(),
//! )?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod constants;
pub use constants::EMPTY_STRING_SHA256;

mod error;
pub use error::{Error, ErrorKind, Result};

mod credential;
pub use credential::Credential;

mod request;
pub use request::SigningRequest;

mod endpoint;
pub use endpoint::EndpointBuilder;

mod sign;
pub use sign::RequestSigner;

mod context;
pub use context::{Context, HttpSend, NoopHttpSend};

mod client;
pub use client::{Client, ErrorResponse};

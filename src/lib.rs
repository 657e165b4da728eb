//! Typed Rust client for the Infobip SMS and Numbers HTTP API.
//!
//! Each endpoint is described by a small declarative table (verb, path template,
//! parameter schema, defaults). A call validates the caller's [`Params`] against
//! that table, fills in path placeholders, serializes the values and sends exactly
//! one HTTP request.
//!
//! ```rust,no_run
//! use infobip::{AuthConfig, InfobipClient, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), infobip::InfobipError> {
//!     let client = InfobipClient::new("api-key", false, &AuthConfig::default());
//!     let params = Params::new()
//!         .with("to", vec!["447700000000", "447700000001"])
//!         .with("text", "hello");
//!     let response = client.send(&params).await?;
//!     println!("{}", response.body);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Auth, AuthConfig, AuthType, Environment, HttpRequest, HttpResponse, InfobipClient,
    InfobipClientBuilder, InfobipError,
};
pub use domain::{
    BodyEncoding, Emptiness, Endpoint, EndpointConfig, Method, ParamSpec, ParamType, Params,
    RequestError, Value,
};
pub use transport::{
    Payload, RequestBody, basic_auth, build_path, build_payload, custom_auth, serialize,
};

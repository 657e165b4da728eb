//! Transport layer: wire-format details (auth headers, serialization, paths, payloads).

mod auth;
mod path;
mod payload;
mod serialize;

pub use auth::{basic_auth, custom_auth};
pub use path::build_path;
pub use payload::{Payload, RequestBody, build_payload};
pub use serialize::serialize;

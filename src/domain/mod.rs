//! Domain layer: input values, endpoint descriptions and validation errors (no I/O).

mod params;
mod request;
mod validation;
mod value;

pub(crate) use value::{format_number, iso_timestamp};

pub use params::Params;
pub use request::{
    BodyEncoding, Endpoint, EndpointConfig, Method, ParamSpec, Placement, REQUIRED_MARKER,
    RouteSchema, RouteStrategy,
};
pub use validation::RequestError;
pub use value::{Emptiness, ParamType, Value};

use crate::domain::value::ParamType;

/// Input problems detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The endpoint takes parameters but none were provided.
    #[error("route/input parameter(s) required")]
    MissingParameters,

    #[error("param: \"{param}\" is required but not provided")]
    RequiredParameterMissing { param: String },

    #[error("param: \"{param}\" is not of type {expected}")]
    ParameterTypeMismatch { param: String, expected: ParamType },
}

use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A numeric field was set to a value outside its allowed range.
    #[error("invalid value for `{field}`: {constraint}")]
    InvalidFieldValue {
        field: &'static str,
        constraint: &'static str,
    },
    /// An endpoint URL is empty or not an absolute http(s) URL.
    #[error("invalid endpoint url for `{0}`: must be an absolute http(s) url")]
    InvalidEndpointUrl(&'static str),
    /// A required filesystem path is empty.
    #[error("`{0}` must not be empty")]
    EmptyPath(&'static str),
}

use thiserror::Error;

pub type GalaxyResult<T> = Result<T, GalaxyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalaxyError {
    /// A parameter lies outside the domain the generator accepts.
    /// Nothing is generated when this is returned.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// The caller withdrew the request before every particle was placed.
    #[error("generation cancelled")]
    Cancelled,
}

impl GalaxyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GalaxyError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

use thiserror::Error;

/// Errors that can occur when constructing filter or comparator values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Text payload is not valid UTF-8: {0}")]
    EncodingFailure(#[from] std::str::Utf8Error),
}

impl FilterError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FilterError::InvalidArgument(message.into())
    }
}

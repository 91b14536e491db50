use thiserror::Error;

/// Shown when the assistant is invoked with a blank description.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a description for the assistant to analyze.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

/// Failure of a single extraction call. None of these leave partial results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("Failed to generate prompt parts: {0}")]
    Transport(String),

    #[error("Failed to generate prompt parts: service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Failed to generate prompt parts: the assistant returned no text")]
    EmptyResponse,

    #[error("Failed to generate prompt parts: {0}")]
    MalformedResponse(String),

    #[error("Unknown error contacting the assistant.")]
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),

    #[error("The assistant is already working on a request.")]
    Busy,
}

use thiserror::Error;

/// Failures of a single tool call. These are shown to the model as tool
/// results and never abort a run.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures talking to the model service. Any of these ends the run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Model service unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Context length exceeded. Message: {0}")]
    ContextLengthExceeded(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::ModelUnavailable(format!("request timed out: {}", err))
        } else {
            ProviderError::ModelUnavailable(err.to_string())
        }
    }
}

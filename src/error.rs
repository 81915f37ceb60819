use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{operation}: upstream responded with HTTP {status}")]
    UpstreamStatus {
        operation: &'static str,
        status: StatusCode,
    },

    #[error("{operation}: failed to reach upstream: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: malformed upstream response: {details}")]
    MalformedResponse {
        operation: &'static str,
        details: String,
    },

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Failures of the upstream call itself, reported back as tool results.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamStatus { .. }
                | AppError::Transport { .. }
                | AppError::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

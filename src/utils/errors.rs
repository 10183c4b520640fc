use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Get token failed: {0}")]
    AuthFailure(#[source] ApiError),

    #[error("Get bitable records failed: {0}")]
    FetchFailure(#[source] ApiError),

    #[error("Write failed for {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a failed call against the open platform.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    StatusError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("API error code {code}: {msg}")]
    CodeError { code: i64, msg: String },

    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Page limit of {0} exceeded, the table keeps returning a continuation cursor")]
    PageLimitExceeded(usize),
}

impl I18nError {
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Process exit status reported for this failure kind. Starts at 3,
    /// clap already exits with 2 on usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            I18nError::ConfigError(_) => 3,
            I18nError::AuthFailure(_) => 4,
            I18nError::FetchFailure(_) => 5,
            I18nError::WriteFailure { .. } => 6,
        }
    }

    /// The message followed by every cause in the source chain that the
    /// message does not already spell out.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = std::error::Error::source(cause);
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, I18nError>;

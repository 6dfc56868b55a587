use std::fmt;

/// Custom error type for probe operations
#[derive(Debug)]
pub enum TfeError {
    /// Required input missing or invalid (env var, flag, prompt, CA bundle)
    Config(String),
    /// Network or TLS failure reaching the API
    Transport(reqwest::Error),
    /// API returned an error response
    Api {
        status: u16,
        message: String,
        /// Decoded response body, echoed for diagnosis
        body: String,
    },
    /// Data read from two endpoints disagrees
    Consistency(String),
    /// Expected JSON attribute absent or malformed
    MissingField { resource: String, detail: String },
    /// JSON parsing error
    Json(String),
    /// Filesystem or archive error
    Io(String),
    /// Server kept returning `links.next` past the page budget
    Pagination(String),
}

impl TfeError {
    /// Process exit code for this error
    ///
    /// API errors exit with the HTTP status, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TfeError::Api { status, .. } => i32::from(*status),
            _ => 1,
        }
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::Transport(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api {
                status, message, ..
            } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::Consistency(msg) => write!(f, "Consistency error: {}", msg),
            TfeError::MissingField { resource, detail } => {
                write!(f, "Missing or invalid field in {}: {}", resource, detail)
            }
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Io(msg) => write!(f, "I/O error: {}", msg),
            TfeError::Pagination(msg) => write!(f, "Pagination error: {}", msg),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Transport(err)
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Io(err.to_string())
    }
}

impl From<dialoguer::Error> for TfeError {
    fn from(err: dialoguer::Error) -> Self {
        TfeError::Config(format!("could not read input: {}", err))
    }
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, TfeError>;

/// Simplified error system - no over-engineering!
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Transport never reached the server (connection refused, CORS, ...).
    Network(String),
    /// Server answered with a non-2xx status.
    Http { status: u16, message: String },
    /// Response body could not be decoded into the expected shape.
    Decode(String),
    /// Chart surface call failed (usually a teardown race).
    Surface(String),
    Validation(String),
}

impl AppError {
    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 404 means "the resource does not exist" - callers decide whether that
    /// is absence (note lookup, delete-all on an empty symbol) or an error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            AppError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            AppError::Surface(msg) => write!(f, "Surface Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Simple convenience type aliases
pub type ApiResult<T> = Result<T, AppError>;
pub type SurfaceResult<T> = Result<T, AppError>;

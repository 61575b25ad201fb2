use std::fmt;

#[derive(Debug)]
pub enum GeminiError {
    ConfigError(String),
    RequestError(String),
    ResponseError(String),
    SerializationError(String),
    IoError(String),
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GeminiError::RequestError(msg) => write!(f, "Request error: {}", msg),
            GeminiError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GeminiError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            GeminiError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for GeminiError {}

impl From<std::io::Error> for GeminiError {
    fn from(err: std::io::Error) -> Self {
        GeminiError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeminiError>;

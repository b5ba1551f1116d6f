use std::fmt;

/// Errors raised while setting up a gateway (call failures are `RemoteError`s)
#[derive(Debug)]
pub enum Error {
    InvalidBaseUrl { url: String, reason: String },
    Client(reqwest::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBaseUrl { url, reason } => {
                write!(f, "Invalid base URL '{}': {}", url, reason)
            }
            Error::Client(err) => write!(f, "HTTP client error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(err) => Some(err),
            Error::InvalidBaseUrl { .. } => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Client(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

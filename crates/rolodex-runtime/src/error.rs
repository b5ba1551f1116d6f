use rolodex_engine::{Outcome, Rejection};
use rolodex_types::RemoteError;
use std::fmt;

/// Result type for rolodex-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// The contact store or the transport failed
    Remote(RemoteError),

    /// The book refused the operation in its current state
    Rejected(Rejection),

    /// Gateway could not be set up
    Gateway(rolodex_gateway::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// A settled request ended in something other than what was waited for
    Unexpected(Outcome),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Remote(err) => write!(f, "{}", err),
            Error::Rejected(rejection) => write!(f, "{}", rejection),
            Error::Gateway(err) => write!(f, "Gateway error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Unexpected(outcome) => write!(f, "Unexpected outcome: {:?}", outcome),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Remote(err) => Some(err),
            Error::Rejected(rejection) => Some(rejection),
            Error::Gateway(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::Unexpected(_) => None,
        }
    }
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        Error::Remote(err)
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Error::Rejected(rejection)
    }
}

impl From<rolodex_gateway::Error> for Error {
    fn from(err: rolodex_gateway::Error) -> Self {
        Error::Gateway(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub mod contact;
pub mod error;

pub use contact::*;
pub use error::{ErrorBody, RemoteError};

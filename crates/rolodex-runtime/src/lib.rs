//! rolodex-runtime: runs a [`ContactBook`](rolodex_engine::ContactBook)
//! against a live gateway.
//!
//! - [`config`]: data directory resolution and `config.toml`
//! - [`session`]: concurrent request execution on the caller's task
//! - [`driver`]: mpsc command loop publishing views over a watch channel

pub mod config;
pub mod driver;
pub mod error;
pub mod session;

pub use config::{Config, GatewayConfig, PagingConfig, resolve_data_path};
pub use driver::{Command, Driver, run};
pub use error::{Error, Result};
pub use session::{HttpSession, Session, execute};

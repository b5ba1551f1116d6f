//! Testing infrastructure for rolodex tests.
//!
//! - `ContactStore`: the contact store's behaviour, in memory
//! - `MemoryGateway`: a `ContactGateway` over a `ContactStore` with scripted
//!   failures and gates that hold calls back to force answer orderings
//! - `StubServer`: the contact store's HTTP API on an ephemeral local port
//! - `TestWorld`: isolated data directory plus stub server for CLI runs
//! - `fixtures`: sample contacts

pub mod fixtures;
pub mod memory;
pub mod store;
pub mod stub;
pub mod world;

pub use memory::{Call, CallKind, MemoryGateway};
pub use store::ContactStore;
pub use stub::StubServer;
pub use world::{CliResult, TestWorld};

//! Ticketed hand-off between the engine and whatever drives the gateway.
//!
//! The engine never awaits. An operation that needs the contact store returns
//! a [`Request`]; the driver performs the call and later feeds the matching
//! [`Completion`] back. Completions whose ticket is no longer expected are
//! dropped without touching any state.

use rolodex_types::{Contact, ContactId, ContactPage, RemoteError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// A call the engine needs made against the contact store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchPage { page: u32, items_per_page: u32 },
    FetchOne { id: ContactId },
    Create { payload: Contact },
    Update { id: ContactId, payload: Contact },
    Delete { id: ContactId },
}

impl GatewayCall {
    pub fn name(&self) -> &'static str {
        match self {
            GatewayCall::FetchPage { .. } => "fetch_page",
            GatewayCall::FetchOne { .. } => "fetch_one",
            GatewayCall::Create { .. } => "create",
            GatewayCall::Update { .. } => "update",
            GatewayCall::Delete { .. } => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub ticket: Ticket,
    pub call: GatewayCall,
}

/// Successful answer from the contact store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Page(ContactPage),
    Contact(Contact),
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: Result<Reply, RemoteError>,
}

impl Completion {
    pub fn new(ticket: Ticket, result: Result<Reply, RemoteError>) -> Self {
        Self { ticket, result }
    }

    pub fn ok(ticket: Ticket, reply: Reply) -> Self {
        Self::new(ticket, Ok(reply))
    }

    pub fn err(ticket: Ticket, error: RemoteError) -> Self {
        Self::new(ticket, Err(error))
    }
}

pub(crate) fn unexpected_reply(expected: &str) -> RemoteError {
    RemoteError::new(format!(
        "Unexpected response from contact store (expected {})",
        expected
    ))
}

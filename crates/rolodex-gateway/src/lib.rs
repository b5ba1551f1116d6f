//! Access to the remote contact store.
//!
//! [`ContactGateway`] is the seam the runtime drives; [`HttpGateway`] speaks
//! the contact store's JSON-over-HTTP API. Every failure, whether the store
//! refused the call or the transport broke, surfaces as one
//! [`RemoteError`](rolodex_types::RemoteError).

pub mod error;
pub mod http;

pub use error::{Error, Result};
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpGateway};

use async_trait::async_trait;
use rolodex_types::{Contact, ContactId, ContactPage, RemoteError};
use std::sync::Arc;

/// CRUD operations against the contact store.
///
/// `create` and `update` receive the payload with its id already stripped;
/// the id of an update travels separately.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn fetch_page(
        &self,
        page: u32,
        items_per_page: u32,
    ) -> std::result::Result<ContactPage, RemoteError>;

    async fn fetch_one(&self, id: ContactId) -> std::result::Result<Contact, RemoteError>;

    async fn create(&self, payload: &Contact) -> std::result::Result<Contact, RemoteError>;

    async fn update(
        &self,
        id: ContactId,
        payload: &Contact,
    ) -> std::result::Result<Contact, RemoteError>;

    async fn delete(&self, id: ContactId) -> std::result::Result<(), RemoteError>;
}

#[async_trait]
impl<G: ContactGateway + ?Sized> ContactGateway for Arc<G> {
    async fn fetch_page(
        &self,
        page: u32,
        items_per_page: u32,
    ) -> std::result::Result<ContactPage, RemoteError> {
        (**self).fetch_page(page, items_per_page).await
    }

    async fn fetch_one(&self, id: ContactId) -> std::result::Result<Contact, RemoteError> {
        (**self).fetch_one(id).await
    }

    async fn create(&self, payload: &Contact) -> std::result::Result<Contact, RemoteError> {
        (**self).create(payload).await
    }

    async fn update(
        &self,
        id: ContactId,
        payload: &Contact,
    ) -> std::result::Result<Contact, RemoteError> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: ContactId) -> std::result::Result<(), RemoteError> {
        (**self).delete(id).await
    }
}

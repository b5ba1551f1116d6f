//! Async driver: performs the book's requests on a gateway and feeds the
//! answers back.

use crate::config::Config;
use crate::{Error, Result};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use rolodex_engine::{
    Completion, ContactBook, GatewayCall, NoticeKind, Outcome, Rejection, Reply, Request,
};
use rolodex_gateway::{ContactGateway, HttpGateway};
use rolodex_types::ContactId;
use std::sync::Arc;
use tracing::debug;

/// Perform one request and wrap the answer for [`ContactBook::apply`]
pub async fn execute<G>(gateway: &G, request: Request) -> Completion
where
    G: ContactGateway + ?Sized,
{
    let Request { ticket, call } = request;
    let result = match call {
        GatewayCall::FetchPage {
            page,
            items_per_page,
        } => gateway
            .fetch_page(page, items_per_page)
            .await
            .map(Reply::Page),
        GatewayCall::FetchOne { id } => gateway.fetch_one(id).await.map(Reply::Contact),
        GatewayCall::Create { payload } => gateway.create(&payload).await.map(Reply::Contact),
        GatewayCall::Update { id, payload } => {
            gateway.update(id, &payload).await.map(Reply::Contact)
        }
        GatewayCall::Delete { id } => gateway.delete(id).await.map(|()| Reply::Deleted),
    };
    Completion::new(ticket, result)
}

/// A [`ContactBook`] wired to a gateway.
///
/// Requests run concurrently; completions are applied in the order they
/// arrive, all on the task that polls the session.
pub struct Session<G: ContactGateway + 'static> {
    book: ContactBook,
    gateway: Arc<G>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

pub type HttpSession = Session<HttpGateway>;

impl HttpSession {
    /// Session over HTTP as described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(config.http_gateway()?),
            config.paging.items_per_page,
        ))
    }
}

impl<G: ContactGateway + 'static> Session<G> {
    pub fn new(gateway: Arc<G>, items_per_page: u32) -> Self {
        Self {
            book: ContactBook::new(items_per_page),
            gateway,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn book(&self) -> &ContactBook {
        &self.book
    }

    /// Direct access for the synchronous draft edits
    pub fn book_mut(&mut self) -> &mut ContactBook {
        &mut self.book
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn dispatch(&mut self, request: Request) {
        debug!(ticket = %request.ticket, call = request.call.name(), "dispatching");
        let gateway = Arc::clone(&self.gateway);
        self.in_flight
            .push(async move { execute(gateway.as_ref(), request).await }.boxed());
    }

    pub fn load_next_page(&mut self) -> std::result::Result<(), Rejection> {
        let request = self.book.load_next_page()?;
        self.dispatch(request);
        Ok(())
    }

    pub fn refresh(&mut self) -> std::result::Result<(), Rejection> {
        let request = self.book.refresh()?;
        self.dispatch(request);
        Ok(())
    }

    pub fn select(&mut self, id: Option<ContactId>) -> std::result::Result<(), Rejection> {
        if let Some(request) = self.book.select(id)? {
            self.dispatch(request);
        }
        Ok(())
    }

    pub fn save(&mut self) -> std::result::Result<(), Rejection> {
        let request = self.book.save()?;
        self.dispatch(request);
        Ok(())
    }

    pub fn delete(&mut self) -> std::result::Result<(), Rejection> {
        let request = self.book.delete()?;
        self.dispatch(request);
        Ok(())
    }

    /// Wait for the next request to finish and apply it; `None` when
    /// nothing is in flight
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        let completion = self.in_flight.next().await?;
        Some(self.book.apply(completion))
    }

    /// Drive every in-flight request to completion
    pub async fn settle(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_outcome().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Settle and report the last applied outcome, turning a failure into
    /// an error
    async fn settle_one(&mut self) -> Result<Outcome> {
        let outcome = self
            .settle()
            .await
            .into_iter()
            .rfind(|o| *o != Outcome::Discarded)
            .unwrap_or(Outcome::Discarded);
        match outcome {
            Outcome::Failed(err) => Err(Error::Remote(err)),
            other => Ok(other),
        }
    }

    /// Load up to `limit` further pages (all remaining for `None`); returns
    /// how many pages were applied
    pub async fn load_pages(&mut self, limit: Option<u32>) -> Result<u32> {
        let mut loaded = 0;
        while limit.is_none_or(|n| loaded < n) && self.book.list().can_load_more() {
            self.load_next_page()?;
            self.settle_one().await?;
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Select `id` and wait for it to load
    pub async fn open(&mut self, id: ContactId) -> Result<()> {
        self.select(Some(id))?;
        self.settle_one().await?;
        Ok(())
    }

    /// Save the draft and wait for the store to confirm
    pub async fn commit(&mut self) -> Result<NoticeKind> {
        self.save()?;
        match self.settle_one().await? {
            Outcome::Saved(kind) => Ok(kind),
            other => Err(Error::Unexpected(other)),
        }
    }

    /// Delete the selected contact and wait for the store to confirm
    pub async fn remove(&mut self) -> Result<ContactId> {
        self.delete()?;
        match self.settle_one().await? {
            Outcome::Deleted(id) => Ok(id),
            other => Err(Error::Unexpected(other)),
        }
    }
}

use crate::store::ContactStore;
use async_trait::async_trait;
use rolodex_gateway::ContactGateway;
use rolodex_types::{Contact, ContactId, ContactPage, RemoteError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A gateway call as the store received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPage { page: u32, items_per_page: u32 },
    FetchOne(ContactId),
    Create(Contact),
    Update(ContactId, Contact),
    Delete(ContactId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    FetchPage,
    FetchOne,
    Create,
    Update,
    Delete,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::FetchPage { .. } => CallKind::FetchPage,
            Call::FetchOne(_) => CallKind::FetchOne,
            Call::Create(_) => CallKind::Create,
            Call::Update(..) => CallKind::Update,
            Call::Delete(_) => CallKind::Delete,
        }
    }

    /// Page number for page loads, contact id otherwise (0 for creates)
    fn target(&self) -> i64 {
        match self {
            Call::FetchPage { page, .. } => i64::from(*page),
            Call::FetchOne(id) | Call::Update(id, _) | Call::Delete(id) => *id,
            Call::Create(_) => 0,
        }
    }
}

/// In-process [`ContactGateway`] for driving the runtime without a network.
///
/// Besides answering from a [`ContactStore`] it can fail the next call of a
/// kind, answer deletes with a non-200 status, and hold a call until the
/// test releases it.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    store: Mutex<ContactStore>,
    failures: Mutex<HashMap<CallKind, VecDeque<RemoteError>>>,
    delete_status: Mutex<Option<u16>>,
    calls: Mutex<Vec<Call>>,
    gates: Mutex<HashMap<(CallKind, i64), Arc<Notify>>>,
}

impl MemoryGateway {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            store: Mutex::new(ContactStore::new(contacts)),
            ..Self::default()
        }
    }

    /// Fail the next call of `kind` with `error`; queued failures are used in order
    pub fn fail_next(&self, kind: CallKind, error: RemoteError) {
        self.failures
            .lock()
            .expect("failures poisoned")
            .entry(kind)
            .or_default()
            .push_back(error);
    }

    /// Deletes still remove the contact but report `status` instead of 200
    pub fn answer_delete_with(&self, status: u16) {
        *self.delete_status.lock().expect("delete status poisoned") = Some(status);
    }

    /// Hold the next call of `kind` on `target` (page number or contact id)
    /// until the returned handle is notified
    pub fn hold(&self, kind: CallKind, target: i64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .expect("gates poisoned")
            .insert((kind, target), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls poisoned").clone()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.store.lock().expect("store poisoned").contacts().to_vec()
    }

    fn store(&self) -> std::sync::MutexGuard<'_, ContactStore> {
        self.store.lock().expect("store poisoned")
    }

    /// Log the call, wait on its gate, then pop any scripted failure
    async fn enter(&self, call: Call) -> Result<(), RemoteError> {
        let kind = call.kind();
        let gate = self
            .gates
            .lock()
            .expect("gates poisoned")
            .remove(&(kind, call.target()));
        self.calls.lock().expect("calls poisoned").push(call);

        if let Some(gate) = gate {
            gate.notified().await;
        }

        let scripted = self
            .failures
            .lock()
            .expect("failures poisoned")
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContactGateway for MemoryGateway {
    async fn fetch_page(
        &self,
        page: u32,
        items_per_page: u32,
    ) -> Result<ContactPage, RemoteError> {
        self.enter(Call::FetchPage {
            page,
            items_per_page,
        })
        .await?;
        self.store().page(page, items_per_page)
    }

    async fn fetch_one(&self, id: ContactId) -> Result<Contact, RemoteError> {
        self.enter(Call::FetchOne(id)).await?;
        self.store().get(id)
    }

    async fn create(&self, payload: &Contact) -> Result<Contact, RemoteError> {
        self.enter(Call::Create(payload.clone())).await?;
        self.store().create(payload)
    }

    async fn update(&self, id: ContactId, payload: &Contact) -> Result<Contact, RemoteError> {
        self.enter(Call::Update(id, payload.clone())).await?;
        self.store().update(id, payload)
    }

    async fn delete(&self, id: ContactId) -> Result<(), RemoteError> {
        self.enter(Call::Delete(id)).await?;
        self.store().delete(id)?;
        match *self.delete_status.lock().expect("delete status poisoned") {
            Some(status) if status != 200 => Err(RemoteError::from_status(status)),
            _ => Ok(()),
        }
    }
}

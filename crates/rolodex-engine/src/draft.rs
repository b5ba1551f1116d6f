//! The draft editor: one contact under edit plus the snapshot it reverts to.

use crate::rejection::Rejection;
use crate::request::{GatewayCall, Reply, Ticket, unexpected_reply};
use crate::validator::{Field, Reason, ValidationError, validate_email, validate_name};
use rolodex_types::{Contact, ContactId, RemoteError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Clean new-contact template
    Empty,
    /// Fetch for the current selection in flight
    Loading,
    /// Persisted contact, draft equal to snapshot
    Viewing,
    /// Draft differs from snapshot
    Editing,
    Saving,
    Deleting,
}

impl Phase {
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Empty | Phase::Viewing | Phase::Editing)
    }
}

/// Per-field error record shown next to the inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub first_name: Option<Reason>,
    pub last_name: Option<Reason>,
    pub email: Option<Reason>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    pub fn get(&self, field: Field) -> Option<Reason> {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Email => self.email,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<Reason> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
        }
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        [Field::FirstName, Field::LastName, Field::Email]
            .into_iter()
            .filter_map(|field| self.get(field).map(|r| ValidationError::new(field, r)))
            .collect()
    }
}

/// State of the "add email" input under the email list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailInput {
    pub open: bool,
    pub value: String,
}

#[derive(Debug, Clone)]
enum InFlight {
    Fetch { ticket: Ticket, id: ContactId },
    Save { ticket: Ticket, creating: bool },
    Delete { ticket: Ticket, id: ContactId },
}

impl InFlight {
    fn ticket(&self) -> Ticket {
        match self {
            InFlight::Fetch { ticket, .. }
            | InFlight::Save { ticket, .. }
            | InFlight::Delete { ticket, .. } => *ticket,
        }
    }
}

/// What an applied completion did to the draft; the root book turns these
/// into list, selection and notification updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DraftEvent {
    Fetched { id: ContactId, contact: Contact },
    FetchFailed(RemoteError),
    Created(Contact),
    Updated(Contact),
    SaveFailed(RemoteError),
    Deleted(ContactId),
    DeleteFailed(RemoteError),
}

#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    draft: Contact,
    snapshot: Contact,
    errors: FieldErrors,
    email_input: EmailInput,
    in_flight: Option<InFlight>,
}

impl DraftEditor {
    pub fn draft(&self) -> &Contact {
        &self.draft
    }

    pub fn snapshot(&self) -> &Contact {
        &self.snapshot
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn email_input(&self) -> &EmailInput {
        &self.email_input
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }

    pub fn phase(&self) -> Phase {
        match self.in_flight {
            Some(InFlight::Fetch { .. }) => Phase::Loading,
            Some(InFlight::Save { .. }) => Phase::Saving,
            Some(InFlight::Delete { .. }) => Phase::Deleting,
            None if self.is_dirty() => Phase::Editing,
            None if self.snapshot.id.is_none() => Phase::Empty,
            None => Phase::Viewing,
        }
    }

    /// Id the pending fetch was issued for
    pub fn loading_id(&self) -> Option<ContactId> {
        match self.in_flight {
            Some(InFlight::Fetch { id, .. }) => Some(id),
            _ => None,
        }
    }

    pub fn can_save(&self) -> bool {
        self.phase().is_idle() && self.is_dirty()
    }

    pub fn can_cancel(&self) -> bool {
        self.can_save()
    }

    pub fn can_delete(&self) -> bool {
        self.phase().is_idle() && self.draft.id.is_some()
    }

    fn ensure_idle(&self) -> Result<(), Rejection> {
        if self.in_flight.is_some() {
            return Err(Rejection::Busy);
        }
        Ok(())
    }

    fn ensure_not_mutating(&self) -> Result<(), Rejection> {
        match self.in_flight {
            Some(InFlight::Save { .. } | InFlight::Delete { .. }) => Err(Rejection::Busy),
            _ => Ok(()),
        }
    }

    fn reset_to(&mut self, contact: Contact) {
        self.snapshot = contact.clone();
        self.draft = contact;
        self.errors = FieldErrors::default();
        self.email_input = EmailInput::default();
    }

    /// Start loading `id`; a fetch already pending is superseded
    pub(crate) fn begin_fetch(
        &mut self,
        ticket: Ticket,
        id: ContactId,
    ) -> Result<GatewayCall, Rejection> {
        self.ensure_not_mutating()?;
        self.in_flight = Some(InFlight::Fetch { ticket, id });
        Ok(GatewayCall::FetchOne { id })
    }

    /// Drop back to the blank template, superseding any pending fetch
    pub(crate) fn clear(&mut self) -> Result<(), Rejection> {
        self.ensure_not_mutating()?;
        self.in_flight = None;
        self.reset_to(Contact::template());
        Ok(())
    }

    pub(crate) fn set_name(&mut self, field: Field, value: String) -> Result<(), Rejection> {
        self.ensure_idle()?;
        match field {
            Field::FirstName => self.draft.first_name = value,
            Field::LastName => self.draft.last_name = value,
            Field::Email => return Ok(()),
        }
        *self.errors.slot(field) = None;
        Ok(())
    }

    pub(crate) fn open_email_input(&mut self) {
        self.email_input.open = true;
    }

    pub(crate) fn set_email_input(&mut self, value: String) {
        self.email_input.open = true;
        self.email_input.value = value;
        self.errors.email = None;
    }

    pub(crate) fn add_email(&mut self, candidate: &str) -> Result<(), Rejection> {
        self.ensure_idle()?;
        if let Err(reason) = validate_email(candidate, &self.draft.emails) {
            self.errors.email = Some(reason);
            return Err(ValidationError::new(Field::Email, reason).into());
        }

        self.draft.emails.push(candidate.to_lowercase());
        self.errors.email = None;
        self.email_input = EmailInput::default();
        Ok(())
    }

    pub(crate) fn submit_email_input(&mut self) -> Result<(), Rejection> {
        let candidate = self.email_input.value.clone();
        self.add_email(&candidate)
    }

    pub(crate) fn remove_email(&mut self, value: &str) -> Result<bool, Rejection> {
        self.ensure_idle()?;
        match self.draft.emails.iter().position(|e| e == value) {
            Some(index) => {
                self.draft.emails.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn cancel(&mut self) -> Result<(), Rejection> {
        self.ensure_idle()?;
        if !self.is_dirty() {
            return Err(Rejection::Unchanged);
        }
        self.draft = self.snapshot.clone();
        self.errors = FieldErrors::default();
        self.email_input = EmailInput::default();
        Ok(())
    }

    pub(crate) fn begin_save(&mut self, ticket: Ticket) -> Result<GatewayCall, Rejection> {
        self.ensure_idle()?;
        if !self.is_dirty() {
            return Err(Rejection::Unchanged);
        }

        let first = validate_name(&self.draft.first_name).err();
        let last = validate_name(&self.draft.last_name).err();
        if first.is_some() || last.is_some() {
            self.errors.first_name = first;
            self.errors.last_name = last;
            let invalid = [(Field::FirstName, first), (Field::LastName, last)]
                .into_iter()
                .filter_map(|(field, reason)| reason.map(|r| ValidationError::new(field, r)))
                .collect();
            return Err(Rejection::Invalid(invalid));
        }

        let payload = self.draft.payload();
        let call = match self.draft.id {
            Some(id) => GatewayCall::Update { id, payload },
            None => GatewayCall::Create { payload },
        };
        self.in_flight = Some(InFlight::Save {
            ticket,
            creating: self.draft.id.is_none(),
        });
        Ok(call)
    }

    pub(crate) fn begin_delete(&mut self, ticket: Ticket) -> Result<GatewayCall, Rejection> {
        self.ensure_idle()?;
        let Some(id) = self.draft.id else {
            return Err(Rejection::NotPersisted);
        };
        self.in_flight = Some(InFlight::Delete { ticket, id });
        Ok(GatewayCall::Delete { id })
    }

    /// Apply a completion if it answers the request this editor is waiting
    /// on. Returns `None` for anything else, leaving the editor untouched.
    pub(crate) fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Reply, RemoteError>,
    ) -> Option<DraftEvent> {
        let in_flight = self.in_flight.take_if(|f| f.ticket() == ticket)?;

        let event = match in_flight {
            InFlight::Fetch { id, .. } => match expect_contact(result) {
                Ok(contact) => {
                    self.reset_to(contact.clone());
                    DraftEvent::Fetched { id, contact }
                }
                Err(err) => DraftEvent::FetchFailed(err),
            },
            InFlight::Save { creating, .. } => match expect_contact(result) {
                Ok(contact) => {
                    self.reset_to(contact.clone());
                    if creating {
                        DraftEvent::Created(contact)
                    } else {
                        DraftEvent::Updated(contact)
                    }
                }
                Err(err) => DraftEvent::SaveFailed(err),
            },
            InFlight::Delete { id, .. } => match result {
                Ok(Reply::Deleted) => {
                    self.reset_to(Contact::template());
                    DraftEvent::Deleted(id)
                }
                Ok(_) => DraftEvent::DeleteFailed(unexpected_reply("deletion")),
                Err(err) => DraftEvent::DeleteFailed(err),
            },
        };
        Some(event)
    }
}

fn expect_contact(result: Result<Reply, RemoteError>) -> Result<Contact, RemoteError> {
    match result? {
        Reply::Contact(contact) => Ok(contact),
        _ => Err(unexpected_reply("a contact")),
    }
}

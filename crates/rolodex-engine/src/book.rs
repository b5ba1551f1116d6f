use crate::accumulator::ContactList;
use crate::draft::{DraftEditor, DraftEvent, Phase};
use crate::notifications::{NoticeKind, Notifications};
use crate::reconciler;
use crate::rejection::Rejection;
use crate::request::{
    Completion, GatewayCall, Reply, Request, Ticket, TicketCounter, unexpected_reply,
};
use crate::validator::Field;
use crate::view::BookView;
use rolodex_types::{ContactId, RemoteError};
use tracing::{debug, info, warn};

/// What applying a completion changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PageLoaded { added: usize },
    ContactLoaded(ContactId),
    Saved(NoticeKind),
    Deleted(ContactId),
    Failed(RemoteError),
    /// The completion answered a request that is no longer wanted
    Discarded,
}

/// Root state holder: the cached list, the selection, the draft editor and
/// the message slots.
///
/// Every operation borrows the book mutably, so there is exactly one writer.
/// Operations that need the contact store hand back a [`Request`]; feed its
/// answer to [`ContactBook::apply`].
#[derive(Debug, Clone)]
pub struct ContactBook {
    list: ContactList,
    selection: Option<ContactId>,
    editor: DraftEditor,
    notifications: Notifications,
    tickets: TicketCounter,
}

impl ContactBook {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            list: ContactList::new(items_per_page),
            selection: None,
            editor: DraftEditor::default(),
            notifications: Notifications::default(),
            tickets: TicketCounter::default(),
        }
    }

    pub fn list(&self) -> &ContactList {
        &self.list
    }

    pub fn selection(&self) -> Option<ContactId> {
        self.selection
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn phase(&self) -> Phase {
        self.editor.phase()
    }

    pub fn view(&self) -> BookView {
        BookView::capture(self)
    }

    fn issue(&self, call: GatewayCall, ticket: Ticket) -> Request {
        debug!(ticket = %ticket, call = call.name(), "issuing gateway request");
        Request { ticket, call }
    }

    pub fn load_next_page(&mut self) -> Result<Request, Rejection> {
        let ticket = self.tickets.issue();
        let call = self.list.begin_next_page(ticket)?;
        Ok(self.issue(call, ticket))
    }

    /// Drop every cached entry and load the first page again
    pub fn refresh(&mut self) -> Result<Request, Rejection> {
        self.list.reset();
        self.load_next_page()
    }

    /// Point the editor at `id`, or back at the blank template for `None`.
    ///
    /// Selecting while a previous fetch is pending supersedes it; its answer
    /// will be discarded.
    pub fn select(&mut self, id: Option<ContactId>) -> Result<Option<Request>, Rejection> {
        let Some(id) = id else {
            self.editor.clear()?;
            self.selection = None;
            return Ok(None);
        };

        let ticket = self.tickets.issue();
        let call = self.editor.begin_fetch(ticket, id)?;
        self.selection = Some(id);
        Ok(Some(self.issue(call, ticket)))
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> Result<(), Rejection> {
        self.editor.set_name(Field::FirstName, value.into())
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) -> Result<(), Rejection> {
        self.editor.set_name(Field::LastName, value.into())
    }

    pub fn open_email_input(&mut self) {
        self.editor.open_email_input();
    }

    pub fn set_email_input(&mut self, value: impl Into<String>) {
        self.editor.set_email_input(value.into());
    }

    pub fn add_email(&mut self, candidate: &str) -> Result<(), Rejection> {
        self.editor.add_email(candidate)
    }

    pub fn submit_email_input(&mut self) -> Result<(), Rejection> {
        self.editor.submit_email_input()
    }

    pub fn remove_email(&mut self, value: &str) -> Result<bool, Rejection> {
        self.editor.remove_email(value)
    }

    pub fn cancel(&mut self) -> Result<(), Rejection> {
        self.editor.cancel()
    }

    pub fn save(&mut self) -> Result<Request, Rejection> {
        let ticket = self.tickets.issue();
        let call = self.editor.begin_save(ticket)?;
        Ok(self.issue(call, ticket))
    }

    pub fn delete(&mut self) -> Result<Request, Rejection> {
        let ticket = self.tickets.issue();
        let call = self.editor.begin_delete(ticket)?;
        Ok(self.issue(call, ticket))
    }

    pub fn dismiss_notice(&mut self) {
        self.notifications.dismiss();
    }

    /// Fold a gateway answer into the book
    pub fn apply(&mut self, completion: Completion) -> Outcome {
        let Completion { ticket, result } = completion;

        if self.list.owns(ticket) {
            let result = result.and_then(|reply| match reply {
                Reply::Page(page) => Ok(page),
                _ => Err(unexpected_reply("a page")),
            });
            return match self.list.finish_page(result) {
                Ok(added) => {
                    self.notifications.succeed();
                    info!(
                        page = self.list.page(),
                        added,
                        total = self.list.total_items(),
                        "page loaded"
                    );
                    Outcome::PageLoaded { added }
                }
                Err(err) => self.fail(err),
            };
        }

        match self.editor.complete(ticket, result) {
            Some(event) => self.settle(event),
            None => {
                debug!(ticket = %ticket, "discarding response for superseded request");
                Outcome::Discarded
            }
        }
    }

    fn fail(&mut self, err: RemoteError) -> Outcome {
        warn!(error = %err, "gateway request failed");
        self.notifications.fail(err.clone());
        Outcome::Failed(err)
    }

    fn settle(&mut self, event: DraftEvent) -> Outcome {
        match event {
            DraftEvent::Fetched { id, contact } => {
                self.notifications.succeed();
                // Keep the cached row in step with the fresher copy
                reconciler::apply_update(&mut self.list, contact);
                Outcome::ContactLoaded(id)
            }
            DraftEvent::FetchFailed(err) => {
                self.selection = self.editor.draft().id;
                self.fail(err)
            }
            DraftEvent::Created(contact) => {
                self.notifications.succeed();
                self.selection = contact.id;
                info!(id = ?contact.id, "contact created");
                reconciler::apply_create(&mut self.list, contact);
                self.notifications.announce(NoticeKind::Created);
                Outcome::Saved(NoticeKind::Created)
            }
            DraftEvent::Updated(contact) => {
                self.notifications.succeed();
                info!(id = ?contact.id, "contact updated");
                reconciler::apply_update(&mut self.list, contact);
                self.notifications.announce(NoticeKind::Updated);
                Outcome::Saved(NoticeKind::Updated)
            }
            DraftEvent::Deleted(id) => {
                self.notifications.succeed();
                info!(id, "contact deleted");
                reconciler::apply_delete(&mut self.list, id);
                if self.selection == Some(id) {
                    self.selection = None;
                }
                self.notifications.announce(NoticeKind::Deleted);
                Outcome::Deleted(id)
            }
            DraftEvent::SaveFailed(err) | DraftEvent::DeleteFailed(err) => self.fail(err),
        }
    }
}

impl Default for ContactBook {
    fn default() -> Self {
        Self::new(20)
    }
}

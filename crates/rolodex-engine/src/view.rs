use crate::book::ContactBook;
use crate::draft::{EmailInput, FieldErrors, Phase};
use crate::rejection::Rejection;
use rolodex_types::{Contact, ContactId};
use serde::Serialize;

/// One row of the directory list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: Option<ContactId>,
    pub name: String,
    pub selected: bool,
}

/// Read-only copy of everything presentation needs to draw the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub entries: Vec<EntryView>,
    pub total_items: u64,
    pub can_load_more: bool,
    pub loading_page: bool,
    pub selection: Option<ContactId>,
    pub phase: Phase,
    pub draft: Contact,
    pub field_errors: FieldErrors,
    pub email_input: EmailInput,
    pub can_save: bool,
    pub can_cancel: bool,
    pub can_delete: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// Why the last command was refused, filled in by whoever runs the commands
    pub rejection: Option<String>,
}

impl BookView {
    pub(crate) fn capture(book: &ContactBook) -> Self {
        let list = book.list();
        let editor = book.editor();
        let selection = book.selection();

        Self {
            entries: list
                .entries()
                .iter()
                .map(|c| EntryView {
                    id: c.id,
                    name: c.full_name(),
                    selected: c.id.is_some() && c.id == selection,
                })
                .collect(),
            total_items: list.total_items(),
            can_load_more: list.can_load_more() && !list.is_loading(),
            loading_page: list.is_loading(),
            selection,
            phase: editor.phase(),
            draft: editor.draft().clone(),
            field_errors: editor.errors().clone(),
            email_input: editor.email_input().clone(),
            can_save: editor.can_save(),
            can_cancel: editor.can_cancel(),
            can_delete: editor.can_delete(),
            notice: book.notifications().notice_message().map(str::to_string),
            error: book.notifications().error().map(|e| e.message.clone()),
            rejection: None,
        }
    }

    pub fn with_rejection(mut self, rejection: Option<&Rejection>) -> Self {
        self.rejection = rejection.map(Rejection::to_string);
        self
    }

    pub fn title(&self) -> &'static str {
        if self.draft.id.is_some() {
            "Update Existing User"
        } else {
            "Create New User"
        }
    }
}

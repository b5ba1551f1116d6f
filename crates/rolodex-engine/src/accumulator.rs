use crate::rejection::Rejection;
use crate::request::{GatewayCall, Ticket};
use rolodex_types::{Contact, ContactId, ContactPage, RemoteError};

#[derive(Debug, Clone, Copy)]
struct PendingPage {
    ticket: Ticket,
    previous_page: u32,
}

/// Client-side cache of the directory pages fetched so far.
///
/// The cursor advances as soon as a page is requested and rolls back if that
/// request fails, so a retry asks for the same page again. Entries whose id is
/// already cached are skipped on append; entries without an id are always kept.
#[derive(Debug, Clone)]
pub struct ContactList {
    entries: Vec<Contact>,
    page: u32,
    items_per_page: u32,
    total_items: u64,
    loaded: bool,
    pending: Option<PendingPage>,
}

impl ContactList {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            entries: Vec::new(),
            page: 0,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            loaded: false,
            pending: None,
        }
    }

    pub fn entries(&self) -> &[Contact] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last page requested (0 before the first request)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Whether at least one page has been applied
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_load_more(&self) -> bool {
        if !self.loaded {
            return true;
        }
        u64::from(self.page) * u64::from(self.items_per_page) < self.total_items
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.entries.iter().find(|c| c.id == Some(id))
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn owns(&self, ticket: Ticket) -> bool {
        self.pending.is_some_and(|p| p.ticket == ticket)
    }

    pub(crate) fn begin_next_page(&mut self, ticket: Ticket) -> Result<GatewayCall, Rejection> {
        if self.pending.is_some() {
            return Err(Rejection::Busy);
        }
        if !self.can_load_more() {
            return Err(Rejection::NothingToLoad);
        }

        let previous_page = self.page;
        self.page += 1;
        self.pending = Some(PendingPage {
            ticket,
            previous_page,
        });

        Ok(GatewayCall::FetchPage {
            page: self.page,
            items_per_page: self.items_per_page,
        })
    }

    /// Forget every cached entry and any in-flight page
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.page = 0;
        self.total_items = 0;
        self.loaded = false;
        self.pending = None;
    }

    /// Drop the in-flight page request and roll the cursor back; its answer
    /// will no longer be owned
    pub(crate) fn abandon_page(&mut self) -> Option<Ticket> {
        let pending = self.pending.take()?;
        self.page = pending.previous_page;
        Some(pending.ticket)
    }

    /// Apply the outcome of the in-flight page request; returns how many
    /// entries were appended. Callers check [`ContactList::owns`] first.
    pub(crate) fn finish_page(
        &mut self,
        result: Result<ContactPage, RemoteError>,
    ) -> Result<usize, RemoteError> {
        let Some(pending) = self.pending.take() else {
            return Ok(0);
        };

        match result {
            Ok(page) => {
                self.loaded = true;
                self.total_items = page.total_items;
                let before = self.entries.len();
                for contact in page.contacts {
                    self.push_unique(contact);
                }
                Ok(self.entries.len() - before)
            }
            Err(err) => {
                self.page = pending.previous_page;
                Err(err)
            }
        }
    }

    /// Append unless an entry with the same id is already cached
    pub(crate) fn push_unique(&mut self, contact: Contact) -> bool {
        if let Some(id) = contact.id
            && self.contains(id)
        {
            return false;
        }
        self.entries.push(contact);
        true
    }

    pub(crate) fn replace(&mut self, contact: Contact) -> bool {
        let Some(id) = contact.id else {
            return false;
        };
        match self.entries.iter_mut().find(|c| c.id == Some(id)) {
            Some(slot) => {
                *slot = contact;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: ContactId) -> bool {
        match self.entries.iter().position(|c| c.id == Some(id)) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn grow_total(&mut self) {
        self.total_items += 1;
    }

    pub(crate) fn shrink_total(&mut self) {
        self.total_items = self.total_items.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TicketCounter;

    fn contact(id: ContactId) -> Contact {
        Contact::new("Test", "Person").with_id(id)
    }

    fn page_of(page: u32, items_per_page: u32, total_items: u64) -> ContactPage {
        let start = u64::from(page - 1) * u64::from(items_per_page);
        let end = (start + u64::from(items_per_page)).min(total_items);
        ContactPage {
            page,
            items_per_page,
            total_items,
            contacts: (start..end).map(|i| contact(i as ContactId + 1)).collect(),
        }
    }

    #[test]
    fn test_can_load_more_before_first_page() {
        let list = ContactList::new(20);
        assert!(list.can_load_more());
        assert!(!list.is_loaded());
    }

    #[test]
    fn test_exact_single_page_cannot_load_more() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(20);

        list.begin_next_page(tickets.issue()).unwrap();
        list.finish_page(Ok(page_of(1, 20, 20))).unwrap();

        assert_eq!(list.page(), 1);
        assert_eq!(list.len(), 20);
        assert!(!list.can_load_more());
        assert_eq!(
            list.begin_next_page(tickets.issue()),
            Err(Rejection::NothingToLoad)
        );
    }

    #[test]
    fn test_entries_accumulate_up_to_total() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(20);

        for n in 1..=3u32 {
            let call = list.begin_next_page(tickets.issue()).unwrap();
            assert_eq!(
                call,
                GatewayCall::FetchPage {
                    page: n,
                    items_per_page: 20
                }
            );
            list.finish_page(Ok(page_of(n, 20, 45))).unwrap();
            assert_eq!(list.len() as u64, (u64::from(n) * 20).min(45));
        }

        assert!(!list.can_load_more());
    }

    #[test]
    fn test_second_request_while_in_flight_is_rejected() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(20);

        let first = tickets.issue();
        list.begin_next_page(first).unwrap();
        assert!(list.is_loading());
        assert!(list.owns(first));

        assert_eq!(list.begin_next_page(tickets.issue()), Err(Rejection::Busy));
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_failure_rolls_cursor_back_and_retry_does_not_duplicate() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(2);

        list.begin_next_page(tickets.issue()).unwrap();
        list.finish_page(Ok(page_of(1, 2, 5))).unwrap();

        list.begin_next_page(tickets.issue()).unwrap();
        assert_eq!(list.page(), 2);
        let err = list
            .finish_page(Err(RemoteError::new("boom")))
            .unwrap_err();
        assert_eq!(err.message, "boom");
        assert_eq!(list.page(), 1);
        assert_eq!(list.len(), 2);
        assert!(!list.is_loading());

        let call = list.begin_next_page(tickets.issue()).unwrap();
        assert_eq!(
            call,
            GatewayCall::FetchPage {
                page: 2,
                items_per_page: 2
            }
        );
        list.finish_page(Ok(page_of(2, 2, 5))).unwrap();
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_refetched_ids_are_not_duplicated() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(2);

        list.begin_next_page(tickets.issue()).unwrap();
        list.finish_page(Ok(page_of(1, 2, 4))).unwrap();

        // The server shifted by one: page 2 now starts with an entry we already hold
        list.begin_next_page(tickets.issue()).unwrap();
        let shifted = ContactPage {
            page: 2,
            items_per_page: 2,
            total_items: 4,
            contacts: vec![contact(2), contact(3)],
        };
        let added = list.finish_page(Ok(shifted)).unwrap();

        assert_eq!(added, 1);
        let ids: Vec<_> = list.entries().iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_reset_forgets_pending_page() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(20);

        let stale = tickets.issue();
        list.begin_next_page(stale).unwrap();
        list.reset();

        assert!(!list.owns(stale));
        assert_eq!(list.page(), 0);
        assert!(list.can_load_more());
    }

    #[test]
    fn test_abandoned_page_rolls_cursor_back() {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(2);

        list.begin_next_page(tickets.issue()).unwrap();
        list.finish_page(Ok(page_of(1, 2, 4))).unwrap();

        let second = tickets.issue();
        list.begin_next_page(second).unwrap();
        assert_eq!(list.abandon_page(), Some(second));

        assert!(!list.owns(second));
        assert!(!list.is_loading());
        assert_eq!(list.page(), 1);
        assert_eq!(list.abandon_page(), None);
    }
}

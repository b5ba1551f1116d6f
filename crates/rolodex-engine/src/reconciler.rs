//! Folds successful mutations back into the cached list without a reload.

use crate::accumulator::ContactList;
use rolodex_types::{Contact, ContactId};

/// Append a newly created contact and count it towards the total.
///
/// A contact whose id is already cached is left alone, so a create that races
/// with a page load containing the same record is not doubled. A page still in
/// flight was counted before the create and is abandoned.
pub fn apply_create(list: &mut ContactList, contact: Contact) -> bool {
    let inserted = list.push_unique(contact);
    if inserted {
        list.grow_total();
        list.abandon_page();
    }
    inserted
}

/// Replace the cached entry with the same id; no-op when it is not cached
pub fn apply_update(list: &mut ContactList, contact: Contact) -> bool {
    list.replace(contact)
}

/// Drop the cached entry and shrink the total.
///
/// The total shrinks even when the entry sits on a page not fetched yet: the
/// remote count dropped either way and `can_load_more` must follow it. A page
/// still in flight may hold the deleted entry and the old total, so it is
/// abandoned; the cursor rolls back and the page can be requested again.
pub fn apply_delete(list: &mut ContactList, id: ContactId) -> bool {
    let removed = list.remove(id);
    list.shrink_total();
    list.abandon_page();
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TicketCounter;
    use rolodex_types::ContactPage;

    fn loaded_list(ids: &[ContactId], items_per_page: u32, total_items: u64) -> ContactList {
        let mut tickets = TicketCounter::default();
        let mut list = ContactList::new(items_per_page);
        list.begin_next_page(tickets.issue()).unwrap();
        list.finish_page(Ok(ContactPage {
            page: 1,
            items_per_page,
            total_items,
            contacts: ids
                .iter()
                .map(|id| Contact::new("Jane", "Doe").with_id(*id))
                .collect(),
        }))
        .unwrap();
        list
    }

    #[test]
    fn test_apply_create_appends_and_counts() {
        let mut list = loaded_list(&[1, 2], 20, 2);

        assert!(apply_create(&mut list, Contact::new("Ann", "Lee").with_id(9)));

        assert_eq!(list.len(), 3);
        assert_eq!(list.entries()[2].first_name, "Ann");
        assert_eq!(list.total_items(), 3);
    }

    #[test]
    fn test_apply_create_skips_known_id() {
        let mut list = loaded_list(&[1, 2], 20, 2);

        assert!(!apply_create(&mut list, Contact::new("Ann", "Lee").with_id(2)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.total_items(), 2);
    }

    #[test]
    fn test_apply_update_replaces_in_place() {
        let mut list = loaded_list(&[1, 5, 7], 20, 3);

        let updated = Contact::new("Jane", "Smith").with_id(5);
        assert!(apply_update(&mut list, updated.clone()));

        assert_eq!(list.entries()[1], updated);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_apply_update_unknown_id_is_noop() {
        let mut list = loaded_list(&[1], 20, 1);
        let before = list.entries().to_vec();

        assert!(!apply_update(&mut list, Contact::new("X", "Y").with_id(42)));
        assert!(!apply_update(&mut list, Contact::new("X", "Y")));
        assert_eq!(list.entries(), before.as_slice());
    }

    #[test]
    fn test_apply_delete_removes_once_and_shrinks_total() {
        let mut list = loaded_list(&[1, 5, 7], 3, 4);
        assert!(list.can_load_more());

        assert!(apply_delete(&mut list, 5));
        assert!(!list.contains(5));
        assert_eq!(list.len(), 2);
        assert_eq!(list.total_items(), 3);

        // One page of three requested, three remain remotely: nothing left to load
        assert!(!list.can_load_more());

        assert!(!apply_delete(&mut list, 5));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_apply_delete_abandons_pending_page() {
        let mut list = loaded_list(&[1, 2], 2, 4);
        let mut tickets = TicketCounter::default();
        tickets.issue();
        let pending = tickets.issue();
        list.begin_next_page(pending).unwrap();

        apply_delete(&mut list, 3);

        assert!(!list.owns(pending));
        assert_eq!(list.page(), 1);
        assert_eq!(list.total_items(), 3);
        assert!(list.can_load_more());
    }

    #[test]
    fn test_apply_delete_never_underflows() {
        let mut list = ContactList::new(20);
        apply_delete(&mut list, 1);
        assert_eq!(list.total_items(), 0);
    }
}

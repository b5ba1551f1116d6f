use rolodex_types::{Contact, ContactId, ContactPage, RemoteError};

/// In-memory model of the remote contact store.
///
/// Ids are assigned in increasing order and never reused. Payload ids are
/// ignored; the id comes from the URL or the store.
#[derive(Debug, Clone)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn not_found(id: ContactId) -> RemoteError {
    RemoteError::with_status(404, format!("Contact with id {} not found", id))
}

impl ContactStore {
    /// Seed the store; contacts without an id get one
    pub fn new(seed: Vec<Contact>) -> Self {
        let mut next_id = seed.iter().filter_map(|c| c.id).max().unwrap_or(0) + 1;
        let contacts = seed
            .into_iter()
            .map(|mut contact| {
                if contact.id.is_none() {
                    contact.id = Some(next_id);
                    next_id += 1;
                }
                contact
            })
            .collect();
        Self { contacts, next_id }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn page(&self, page: u32, items_per_page: u32) -> Result<ContactPage, RemoteError> {
        if page == 0 || items_per_page == 0 {
            return Err(RemoteError::with_status(
                400,
                "page and itemsPerPage must be positive",
            ));
        }
        let start = (page as usize - 1).saturating_mul(items_per_page as usize);
        Ok(ContactPage {
            page,
            items_per_page,
            total_items: self.contacts.len() as u64,
            contacts: self
                .contacts
                .iter()
                .skip(start)
                .take(items_per_page as usize)
                .cloned()
                .collect(),
        })
    }

    pub fn get(&self, id: ContactId) -> Result<Contact, RemoteError> {
        self.contacts
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn create(&mut self, payload: &Contact) -> Result<Contact, RemoteError> {
        check_names(payload)?;
        let contact = Contact {
            id: Some(self.next_id),
            ..payload.clone()
        };
        self.next_id += 1;
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    pub fn update(&mut self, id: ContactId, payload: &Contact) -> Result<Contact, RemoteError> {
        check_names(payload)?;
        let slot = self
            .contacts
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or_else(|| not_found(id))?;
        *slot = Contact {
            id: Some(id),
            ..payload.clone()
        };
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: ContactId) -> Result<(), RemoteError> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or_else(|| not_found(id))?;
        self.contacts.remove(index);
        Ok(())
    }
}

fn check_names(payload: &Contact) -> Result<(), RemoteError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(RemoteError::with_status(
            400,
            "firstName and lastName are required",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_seed_assigns_missing_ids_after_highest() {
        let store = ContactStore::new(vec![fixtures::jane_doe(), fixtures::ann_lee()]);
        let ids: Vec<_> = store.contacts().iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let store = ContactStore::new(fixtures::directory(45));
        let page = store.page(3, 20).unwrap();
        assert_eq!(page.contacts.len(), 5);
        assert_eq!(page.total_items, 45);
        assert!(store.page(4, 20).unwrap().contacts.is_empty());
        assert_eq!(store.page(0, 20).unwrap_err().status, Some(400));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = ContactStore::new(fixtures::directory(2));
        store.delete(2).unwrap();
        let created = store.create(&fixtures::ann_lee()).unwrap();
        assert_eq!(created.id, Some(3));
        assert!(store.delete(2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_keeps_url_id() {
        let mut store = ContactStore::new(vec![fixtures::jane_doe()]);
        let payload = Contact::new("Jane", "Smith").with_id(99);
        let updated = store.update(5, &payload).unwrap();
        assert_eq!(updated.id, Some(5));
        assert_eq!(store.get(5).unwrap().last_name, "Smith");
    }
}

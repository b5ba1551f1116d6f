//! Sample contacts.

use rolodex_types::{Contact, ContactId};

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances",
];
const LAST_NAMES: [&str; 6] = ["Lovelace", "Hopper", "Torvalds", "Liskov", "Thompson", "Hamilton"];

/// The contact most scenarios revolve around
pub fn jane_doe() -> Contact {
    Contact::new("Jane", "Doe").with_id(5).with_email("jane@x.com")
}

/// A contact that has not been saved yet
pub fn ann_lee() -> Contact {
    Contact::new("Ann", "Lee").with_email("ann@lee.io")
}

/// `count` persisted contacts with ids `1..=count`; every name passes validation
pub fn directory(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|i| {
            let id = i as ContactId + 1;
            Contact::new(FIRST_NAMES[i % FIRST_NAMES.len()], LAST_NAMES[i % LAST_NAMES.len()])
                .with_id(id)
                .with_email(format!("person{}@example.com", id))
        })
        .collect()
}

/// Like [`directory`], with [`jane_doe`] in slot 5 when it exists
pub fn directory_with_jane(count: usize) -> Vec<Contact> {
    let mut contacts = directory(count);
    if let Some(slot) = contacts.get_mut(4) {
        *slot = jane_doe();
    }
    contacts
}

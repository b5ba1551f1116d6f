use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identity of a persisted contact
pub type ContactId = i64;

/// A single directory record.
///
/// `id` is absent until the contact store has persisted the record. The wire
/// form uses camelCase keys; a `null` id decodes the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub emails: Vec<String>,
}

impl Contact {
    /// Blank, not-yet-persisted contact used as the new-contact form
    pub fn template() -> Self {
        Self::default()
    }

    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            emails: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Request body for create/update: the identity travels in the URL, never in the body
    pub fn payload(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (false, false) => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {}", id, self.full_name()),
            None if self.full_name().is_empty() => write!(f, "(new)"),
            None => write!(f, "(new) {}", self.full_name()),
        }
    }
}

/// One page of the directory as returned by `GET /contacts/paginated`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_null_id_as_absent() {
        let json = r#"{"id":null,"firstName":"Ann","lastName":"Lee","emails":[]}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, None);
        assert_eq!(contact.first_name, "Ann");
    }

    #[test]
    fn test_decode_missing_emails_defaults_to_empty() {
        let json = r#"{"id":3,"firstName":"Ann","lastName":"Lee"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, Some(3));
        assert!(contact.emails.is_empty());
    }

    #[test]
    fn test_payload_strips_id() {
        let contact = Contact::new("Jane", "Doe").with_id(5).with_email("jane@x.com");
        let payload = contact.payload();

        assert_eq!(payload.id, None);
        assert_eq!(payload.emails, contact.emails);
        insta::assert_snapshot!(
            serde_json::to_string(&payload).unwrap(),
            @r#"{"firstName":"Jane","lastName":"Doe","emails":["jane@x.com"]}"#
        );
    }

    #[test]
    fn test_page_uses_camel_case_keys() {
        let json = r#"{"page":2,"itemsPerPage":20,"totalItems":41,"contacts":[]}"#;
        let page: ContactPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.items_per_page, 20);
        assert_eq!(page.total_items, 41);
    }

    #[test]
    fn test_display() {
        assert_eq!(Contact::new("Jane", "Doe").with_id(5).to_string(), "#5 Jane Doe");
        assert_eq!(Contact::template().to_string(), "(new)");
    }
}

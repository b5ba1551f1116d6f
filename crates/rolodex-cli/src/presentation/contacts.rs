use super::Style;
use rolodex_types::Contact;
use serde::Serialize;
use std::fmt::Write;

const LABEL_WIDTH: usize = 12;

/// What `list` reports: the accumulated entries plus paging state
#[derive(Debug, Clone, Serialize)]
pub struct ContactListing {
    pub contacts: Vec<Contact>,
    pub total_items: u64,
    pub pages_loaded: u32,
    pub can_load_more: bool,
}

pub fn render_listing(listing: &ContactListing, style: Style) -> String {
    let mut out = String::new();

    if listing.contacts.is_empty() {
        out.push_str("No contacts found.\n");
        return out;
    }

    let _ = writeln!(out, "{}", style.heading(&format!("{:<6}{:<24}EMAILS", "ID", "NAME")));
    for contact in &listing.contacts {
        let id = contact.id.map(|id| id.to_string()).unwrap_or_default();
        let emails = contact.emails.join(", ");
        let line = format!("{:<6}{:<24}{}", id, contact.full_name(), emails);
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Showing {} of {} contacts",
        listing.contacts.len(),
        listing.total_items
    );
    if listing.can_load_more {
        let _ = writeln!(
            out,
            "{}",
            style.dim(&format!(
                "More available: rolodex list --pages {} (or --all)",
                listing.pages_loaded + 1
            ))
        );
    }
    out
}

fn field(out: &mut String, label: &str, value: &str, style: Style) {
    let label = format!("{:<width$}", label, width = LABEL_WIDTH);
    let _ = writeln!(out, "  {}{}", style.dim(&label), value);
}

pub fn render_card(contact: &Contact, style: Style) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style.heading(&contact.to_string()));
    field(&mut out, "first name", &contact.first_name, style);
    field(&mut out, "last name", &contact.last_name, style);

    match contact.emails.split_first() {
        None => field(&mut out, "emails", "(none)", style),
        Some((first, rest)) => {
            field(&mut out, "emails", first, style);
            for email in rest {
                field(&mut out, "", email, style);
            }
        }
    }
    out
}

pub fn render_notice(notice: &str, style: Style) -> String {
    format!("{}\n", style.success(notice))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(contacts: Vec<Contact>, total_items: u64, can_load_more: bool) -> ContactListing {
        ContactListing {
            contacts,
            total_items,
            pages_loaded: 1,
            can_load_more,
        }
    }

    #[test]
    fn test_render_listing_plain() {
        let contacts = vec![
            Contact::new("Ada", "Lovelace").with_id(1).with_email("ada@example.com"),
            Contact::new("Jane", "Doe")
                .with_id(5)
                .with_email("jane@x.com")
                .with_email("jd@x.com"),
            Contact::new("Ken", "Thompson").with_id(12),
        ];

        let out = render_listing(&listing(contacts, 30, true), Style::plain());

        insta::assert_snapshot!(out, @r"
        ID    NAME                    EMAILS
        1     Ada Lovelace            ada@example.com
        5     Jane Doe                jane@x.com, jd@x.com
        12    Ken Thompson

        Showing 3 of 30 contacts
        More available: rolodex list --pages 2 (or --all)
        ");
    }

    #[test]
    fn test_render_empty_listing() {
        let out = render_listing(&listing(Vec::new(), 0, false), Style::plain());
        assert_eq!(out, "No contacts found.\n");
    }

    #[test]
    fn test_render_card_plain() {
        let contact = Contact::new("Jane", "Doe")
            .with_id(5)
            .with_email("jane@x.com")
            .with_email("jd@x.com");

        insta::assert_snapshot!(render_card(&contact, Style::plain()), @r"
        #5 Jane Doe
          first name  Jane
          last name   Doe
          emails      jane@x.com
                      jd@x.com
        ");
    }

    #[test]
    fn test_render_card_without_emails() {
        let out = render_card(&Contact::new("Ann", "Lee"), Style::plain());
        assert!(out.starts_with("(new) Ann Lee\n"));
        assert!(out.contains("emails      (none)"));
    }
}

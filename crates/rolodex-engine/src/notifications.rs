use rolodex_types::RemoteError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Created,
    Updated,
    Deleted,
}

impl NoticeKind {
    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::Created => "New contact created",
            NoticeKind::Updated => "Contact updated",
            NoticeKind::Deleted => "Contact deleted",
        }
    }
}

/// The two user-facing message slots.
///
/// The error slot follows the last applied gateway outcome: a failure fills
/// it, the next success empties it. The notice slot is only emptied by the
/// user dismissing it.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    error: Option<RemoteError>,
    notice: Option<NoticeKind>,
}

impl Notifications {
    pub fn error(&self) -> Option<&RemoteError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<NoticeKind> {
        self.notice
    }

    pub fn notice_message(&self) -> Option<&'static str> {
        self.notice.map(NoticeKind::message)
    }

    pub(crate) fn fail(&mut self, error: RemoteError) {
        self.error = Some(error);
    }

    pub(crate) fn succeed(&mut self) {
        self.error = None;
    }

    pub(crate) fn announce(&mut self, kind: NoticeKind) {
        self.notice = Some(kind);
    }

    pub(crate) fn dismiss(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_slot_cleared_by_success_only() {
        let mut slots = Notifications::default();
        slots.fail(RemoteError::new("Contact not found"));
        slots.announce(NoticeKind::Updated);

        slots.dismiss();
        assert_eq!(slots.error().map(|e| e.message.as_str()), Some("Contact not found"));

        slots.succeed();
        assert!(slots.error().is_none());
    }

    #[test]
    fn test_notice_survives_until_dismissed() {
        let mut slots = Notifications::default();
        slots.announce(NoticeKind::Deleted);
        slots.fail(RemoteError::new("later failure"));
        slots.succeed();

        assert_eq!(slots.notice_message(), Some("Contact deleted"));
        slots.dismiss();
        assert_eq!(slots.notice(), None);
    }
}

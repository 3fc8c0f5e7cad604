//! Transient banners shown in the top-right corner.

pub const NOTIFICATION_TTL_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification success",
            NotificationKind::Warning => "notification warning",
            NotificationKind::Error => "notification error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub text: String,
}

/// Currently visible banners, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    /// Append a banner and return its id for later dismissal.
    pub fn push(&mut self, kind: NotificationKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    /// Remove a banner; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_order_is_kept() {
        let mut notifications = Notifications::default();
        let first = notifications.push(NotificationKind::Success, "Saved");
        let second = notifications.push(NotificationKind::Error, "Failed");

        assert_ne!(first, second);
        let texts: Vec<_> = notifications.items().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Saved", "Failed"]);
    }

    #[test]
    fn dismiss_removes_only_that_banner() {
        let mut notifications = Notifications::default();
        let first = notifications.push(NotificationKind::Warning, "Select a student");
        let second = notifications.push(NotificationKind::Success, "Done");

        notifications.dismiss(first);
        notifications.dismiss(first);
        assert_eq!(notifications.items().len(), 1);
        assert_eq!(notifications.items()[0].id, second);
    }
}

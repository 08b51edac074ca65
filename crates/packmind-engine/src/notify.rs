//! Notification payloads and the sink they are dispatched to.

/// A fire-and-forget reminder notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The standard reminder payload: comma-joined item names.
    pub fn dont_forget(names: &[&str]) -> Self {
        Self {
            title: "Don't Forget!".to_string(),
            body: format!("Remember to take: {}", names.join(", ")),
        }
    }
}

/// Sink for reminder notifications. The engine's contract stops here;
/// delivery (terminal, desktop, ...) is the implementation's concern.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Notifier that records every payload, for assertions.
#[cfg(test)]
pub(crate) struct RecordingNotifier {
    pub log: std::sync::Arc<parking_lot::Mutex<Vec<Notification>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> (Self, std::sync::Arc<parking_lot::Mutex<Vec<Notification>>>) {
        let log = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.log.lock().push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dont_forget_payload() {
        let n = Notification::dont_forget(&["Umbrella", "Keys"]);
        assert_eq!(n.title, "Don't Forget!");
        assert_eq!(n.body, "Remember to take: Umbrella, Keys");
    }

    #[test]
    fn test_single_name_has_no_separator() {
        let n = Notification::dont_forget(&["Umbrella"]);
        assert_eq!(n.body, "Remember to take: Umbrella");
    }
}

use dashboard_core::{DashboardState, Notification, NotificationKind, Notifier};

/// Prints notifications to stderr, keeping stdout for the dashboard itself.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Failure => "✖",
        };
        eprintln!("{marker} {}: {}", notification.title, notification.description);
    }

    fn state_changed(&self, state: DashboardState) {
        if state == DashboardState::Loading {
            eprintln!("Searching...");
        }
    }
}

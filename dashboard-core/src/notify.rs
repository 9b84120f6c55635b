use crate::controller::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Short, transient message for the user (a "toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// `location` is the name the upstream resolved, not the text that was searched.
    pub fn updated(location: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Weather Updated".to_string(),
            description: format!("Showing weather for {location}"),
        }
    }

    pub fn fetch_failed() -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: "Error".to_string(),
            description: "Failed to fetch weather data. Please check your API key and city name."
                .to_string(),
        }
    }

    pub fn credential_required() -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: "API Key Required".to_string(),
            description: "Please set your OpenWeatherMap API key first.".to_string(),
        }
    }
}

/// Host-side sink for notifications and state changes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);

    fn state_changed(&self, _state: DashboardState) {}
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: &Notification) {}
}

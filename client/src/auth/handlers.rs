//! Handlers turning session events into user-visible notices.
//!
//! Every login, registration and logout outcome is surfaced to the user as a
//! short toast-style notice; failures use the destructive variant.

use serde::Serialize;

use super::service::SessionEvent;
use crate::config::Branding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// The notice to show for `event`, if any. A silent restore shows nothing.
pub fn notice_for(event: &SessionEvent, branding: &Branding) -> Option<Notice> {
    let notice = match event {
        SessionEvent::Restored(_) => return None,
        SessionEvent::LoggedIn(_) => {
            Notice::info("Welcome back!", "You have successfully logged in.")
        }
        SessionEvent::LoginFailed { .. } => {
            Notice::error("Login failed", "Invalid email or password.")
        }
        SessionEvent::Registered(_) => Notice::info(
            &format!("Welcome to {}!", branding.display_name()),
            "Your account has been created successfully.",
        ),
        SessionEvent::RegistrationFailed { reason, .. } => {
            Notice::error("Registration failed", reason.clone())
        }
        SessionEvent::LoggedOut => {
            Notice::info("Logged out", "You have been successfully logged out.")
        }
        SessionEvent::Expired => Notice::error("Session expired", "Please sign in again."),
    };
    Some(notice)
}

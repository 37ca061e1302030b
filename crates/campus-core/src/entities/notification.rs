//! Notification intents emitted by the economy services
//!
//! The engine only produces these; delivery, storage, and read tracking
//! belong to an external notification subsystem behind `NotificationPort`.

use crate::value_objects::Snowflake;

/// Kind of event a notification intent describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A question received a new answer
    Answer,
    /// An answer received a vote
    Vote,
    /// An answer was accepted
    Accepted,
}

impl NotificationKind {
    /// Stable string form for the delivery subsystem
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Answer => "ANSWER",
            Self::Vote => "VOTE",
            Self::Accepted => "ACCEPTED",
        }
    }
}

/// A request to notify one user about one referenced object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub target_user_id: Snowflake,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub reference_id: Snowflake,
}

impl NotificationIntent {
    /// Create a new NotificationIntent
    pub fn new(
        target_user_id: Snowflake,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        reference_id: Snowflake,
    ) -> Self {
        Self {
            target_user_id,
            kind,
            title: title.into(),
            message: message.into(),
            reference_id,
        }
    }
}

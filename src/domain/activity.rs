use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Activity ID (unique within an event)
pub type ActivityId = Uuid;

/// ID of the event a program belongs to
pub type EventId = Uuid;

/// A festival activity: the unit that gets placed and reordered on a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    /// Unique ID
    pub id: ActivityId,

    /// Display title
    pub title: String,

    /// Longer display text (suppressed while a drag is in progress)
    #[serde(default)]
    pub description: String,
}

impl Activity {
    /// Create a new activity with a random ID
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Create with a specific ID (for loading persisted records)
    pub fn with_id(
        id: ActivityId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

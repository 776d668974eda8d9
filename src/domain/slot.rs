use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two disjoint groups an activity can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Pending placement
    Unscheduled,
    /// Part of the running program
    Scheduled,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Unscheduled => write!(f, "unscheduled"),
            Bucket::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Where an activity currently sits: exactly one bucket, one dense position.
///
/// The persisted shape carries both legacy index fields side by side; this
/// variant makes the inactive one unrepresentable, so readers can never pick
/// up a stale index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "bucket", content = "position", rename_all = "lowercase")]
pub enum Slot {
    Unscheduled(usize),
    Scheduled(usize),
}

impl Slot {
    /// The bucket this slot lives in
    pub fn bucket(&self) -> Bucket {
        match self {
            Slot::Unscheduled(_) => Bucket::Unscheduled,
            Slot::Scheduled(_) => Bucket::Scheduled,
        }
    }

    /// 0-based position within the bucket
    pub fn position(&self) -> usize {
        match self {
            Slot::Unscheduled(position) | Slot::Scheduled(position) => *position,
        }
    }

    /// 1-based position as shown to users
    pub fn displayed_position(&self) -> usize {
        self.position() + 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.bucket(), self.position())
    }
}

use crate::domain::{Activity, ActivityId, EventId, SlotChange};
use serde::{Deserialize, Serialize};

/// Events emitted by the engine after command execution.
///
/// Successful mutations carry the full set of slot changes; the calling
/// layer turns those into persistence updates and re-renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgramEvent {
    /// Positions changed; `changes` lists every activity whose slot moved
    OrderChanged {
        event_id: EventId,
        changes: Vec<SlotChange>,
    },

    /// An activity was created into the unscheduled bucket
    ActivityAdded {
        event_id: EventId,
        activity: Activity,
        changes: Vec<SlotChange>,
    },

    /// An activity was deleted; `changes` holds the compacted bucket
    ActivityRemoved {
        event_id: EventId,
        activity_id: ActivityId,
        changes: Vec<SlotChange>,
    },

    /// Display text changed; no positions moved
    DetailsUpdated {
        event_id: EventId,
        activity_id: ActivityId,
    },

    /// Command failed
    CommandFailed { command: String, reason: String },
}

impl ProgramEvent {
    /// The slot changes to persist (empty for failures and text edits)
    pub fn changes(&self) -> &[SlotChange] {
        match self {
            ProgramEvent::OrderChanged { changes, .. }
            | ProgramEvent::ActivityAdded { changes, .. }
            | ProgramEvent::ActivityRemoved { changes, .. } => changes,
            ProgramEvent::DetailsUpdated { .. } | ProgramEvent::CommandFailed { .. } => &[],
        }
    }

    /// True when the command did not apply
    pub fn is_failure(&self) -> bool {
        matches!(self, ProgramEvent::CommandFailed { .. })
    }
}

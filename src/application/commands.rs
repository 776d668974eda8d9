use crate::application::drop::DropTarget;
use crate::domain::{Activity, ActivityId};
use serde::{Deserialize, Serialize};

/// Commands that can be executed against a program.
///
/// Reorder targets arrive in UI terms: `MoveTo` carries the 1-based position
/// shown to users, `Drop` carries the raw drop target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgramCommand {
    /// Swap with the previous item in the same bucket
    MoveUp { activity_id: ActivityId },

    /// Swap with the next item in the same bucket
    MoveDown { activity_id: ActivityId },

    /// Move to the top of the current bucket
    MoveToTop { activity_id: ActivityId },

    /// Move to the bottom of the current bucket
    MoveToBottom { activity_id: ActivityId },

    /// Move to a 1-based displayed position within the current bucket
    MoveTo {
        activity_id: ActivityId,
        displayed_position: u32,
    },

    /// Append to the running program
    Schedule { activity_id: ActivityId },

    /// Return to the unscheduled bucket
    Unschedule { activity_id: ActivityId },

    /// A drag gesture ended on a drop target
    Drop {
        activity_id: ActivityId,
        target: DropTarget,
    },

    /// Create an activity at the end of the unscheduled bucket
    AddActivity { activity: Activity },

    /// Delete an activity, compacting the bucket that held it
    RemoveActivity { activity_id: ActivityId },

    /// Replace an activity's display text
    UpdateDetails {
        activity_id: ActivityId,
        title: String,
        description: String,
    },
}

impl ProgramCommand {
    /// Command name, used when reporting failures
    pub fn name(&self) -> &'static str {
        match self {
            ProgramCommand::MoveUp { .. } => "MoveUp",
            ProgramCommand::MoveDown { .. } => "MoveDown",
            ProgramCommand::MoveToTop { .. } => "MoveToTop",
            ProgramCommand::MoveToBottom { .. } => "MoveToBottom",
            ProgramCommand::MoveTo { .. } => "MoveTo",
            ProgramCommand::Schedule { .. } => "Schedule",
            ProgramCommand::Unschedule { .. } => "Unschedule",
            ProgramCommand::Drop { .. } => "Drop",
            ProgramCommand::AddActivity { .. } => "AddActivity",
            ProgramCommand::RemoveActivity { .. } => "RemoveActivity",
            ProgramCommand::UpdateDetails { .. } => "UpdateDetails",
        }
    }

    /// The activity this command mutates
    pub fn activity_id(&self) -> ActivityId {
        match self {
            ProgramCommand::MoveUp { activity_id }
            | ProgramCommand::MoveDown { activity_id }
            | ProgramCommand::MoveToTop { activity_id }
            | ProgramCommand::MoveToBottom { activity_id }
            | ProgramCommand::MoveTo { activity_id, .. }
            | ProgramCommand::Schedule { activity_id }
            | ProgramCommand::Unschedule { activity_id }
            | ProgramCommand::Drop { activity_id, .. }
            | ProgramCommand::RemoveActivity { activity_id }
            | ProgramCommand::UpdateDetails { activity_id, .. } => *activity_id,
            ProgramCommand::AddActivity { activity } => activity.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_command_name() {
        let command = ProgramCommand::MoveUp {
            activity_id: Uuid::new_v4(),
        };

        assert_eq!(command.name(), "MoveUp");
    }

    #[test]
    fn test_activity_id_of_add() {
        let activity = Activity::new("Opening", "");
        let command = ProgramCommand::AddActivity {
            activity: activity.clone(),
        };

        assert_eq!(command.activity_id(), activity.id);
    }

    #[test]
    fn test_command_serialization() {
        let activity_id = Uuid::new_v4();
        let command = ProgramCommand::MoveTo {
            activity_id,
            displayed_position: 3,
        };

        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["type"], "MoveTo");
        assert_eq!(json["displayed_position"], 3);

        let back: ProgramCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, command);
    }
}

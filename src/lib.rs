pub mod application;
pub mod domain;
pub mod persistence;

pub mod prelude {
    pub use crate::application::DragState;
    pub use crate::application::DropTarget;
    pub use crate::application::PendingWrites;
    pub use crate::application::PositionEditor;
    pub use crate::application::ProgramCommand;
    pub use crate::application::ProgramEngine;
    pub use crate::application::ProgramEvent;
    pub use crate::domain::Activity;
    pub use crate::domain::ActivityId;
    pub use crate::domain::Bucket;
    pub use crate::domain::EventId;
    pub use crate::domain::Program;
    pub use crate::domain::ProgramError;
    pub use crate::domain::Slot;
    pub use crate::domain::SlotChange;
    pub use crate::persistence::ActivityPatch;
    pub use crate::persistence::ActivityRecord;
}

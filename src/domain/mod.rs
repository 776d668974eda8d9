pub mod activity;
pub mod position;
pub mod program;
pub mod slot;

pub use activity::{Activity, ActivityId, EventId};
pub use position::PositionIndex;
pub use program::{Program, ProgramError, SlotChange};
pub use slot::{Bucket, Slot};

pub mod record;

pub use record::{load_program, patches_for, snapshot_records, ActivityPatch, ActivityRecord};

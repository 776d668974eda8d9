pub mod commands;
pub mod drop;
pub mod editor;
pub mod engine;
pub mod events;
pub mod pending;

pub use commands::ProgramCommand;
pub use drop::{resolve_drop, DragState, DropTarget};
pub use editor::PositionEditor;
pub use engine::ProgramEngine;
pub use events::ProgramEvent;
pub use pending::{PendingWrites, Timestamp};

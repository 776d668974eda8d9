use crate::domain::{ActivityId, Bucket, Program, ProgramError, SlotChange};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A drop destination carried by the UI.
///
/// Slot targets sit between two items (or at a list boundary) and name the
/// exact gap; zone targets ("drop here to add to the program") name only a
/// bucket and imply append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DropTarget {
    /// Destination bucket
    pub bucket: Bucket,
    /// 0-based gap in the pre-move order; `None` for zone targets
    pub index: Option<usize>,
}

impl DropTarget {
    /// A slot target: the gap before position `index`
    pub fn slot(bucket: Bucket, index: usize) -> Self {
        Self {
            bucket,
            index: Some(index),
        }
    }

    /// A zone target: the bucket itself, appending at the end
    pub fn zone(bucket: Bucket) -> Self {
        Self {
            bucket,
            index: None,
        }
    }
}

/// Resolve a drop gesture into the single engine operation it stands for:
/// a reorder when the target bucket matches the dragged activity's bucket,
/// a transfer otherwise.
pub fn resolve_drop(
    program: &mut Program,
    activity_id: ActivityId,
    target: DropTarget,
) -> Result<Vec<SlotChange>, ProgramError> {
    program.transfer_and_move(activity_id, target.bucket, target.index)
}

/// Tracks the one drag that can be live at a time.
///
/// Purely presentational: while a drag is in progress every activity's
/// description is suppressed so row heights stay put under the pointer.
/// The ordering engine never reads this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<ActivityId>,
}

impl DragState {
    /// No drag in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag started on `activity_id`
    pub fn begin(&mut self, activity_id: ActivityId) {
        self.source = Some(activity_id);
    }

    /// The drag ended (dropped or cancelled)
    pub fn end(&mut self) {
        self.source = None;
    }

    /// True while any activity is being dragged
    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    /// The activity under the pointer, if a drag is live
    pub fn source(&self) -> Option<ActivityId> {
        self.source
    }

    /// Whether renderers should hide description text right now
    pub fn suppress_descriptions(&self) -> bool {
        self.is_dragging()
    }
}

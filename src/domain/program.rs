use crate::domain::{Activity, ActivityId, Bucket, EventId, PositionIndex, Slot};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One activity whose slot changed as a result of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SlotChange {
    /// The activity that moved
    pub activity_id: ActivityId,
    /// Where it sits now
    pub slot: Slot,
}

/// Errors that can occur in program operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("Activity already exists: {0}")]
    ActivityAlreadyExists(ActivityId),

    #[error("Activity {activity_id} is not in the {expected} bucket")]
    BucketMismatch {
        activity_id: ActivityId,
        expected: Bucket,
    },
}

/// Program aggregate root: one event's activities and their two orderings.
///
/// The unscheduled and scheduled buckets each keep a dense 0-based order.
/// Every operation recomputes whole-bucket positions and reports only the
/// activities whose slot actually changed, so a partially persisted reorder
/// can never leave duplicate or skipped positions behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Owning event
    event_id: EventId,

    /// All activities (key: activity ID)
    activities: HashMap<ActivityId, Activity>,

    /// Order of the activities pending placement
    unscheduled: PositionIndex,

    /// Order of the activities on the running program
    scheduled: PositionIndex,
}

impl Program {
    /// Create an empty program for an event
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            activities: HashMap::new(),
            unscheduled: PositionIndex::new(),
            scheduled: PositionIndex::new(),
        }
    }

    /// Build from already ordered bucket contents (the load path)
    pub fn from_ordered(
        event_id: EventId,
        unscheduled: Vec<Activity>,
        scheduled: Vec<Activity>,
    ) -> Self {
        let mut program = Self::new(event_id);

        for activity in unscheduled {
            program.unscheduled.push(activity.id);
            program.activities.insert(activity.id, activity);
        }
        for activity in scheduled {
            program.scheduled.push(activity.id);
            program.activities.insert(activity.id, activity);
        }

        program
    }

    // ===== Getters =====

    /// Get the owning event ID
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Total number of activities across both buckets
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// True when the program holds no activities
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Get an activity by ID
    pub fn get(&self, activity_id: ActivityId) -> Option<&Activity> {
        self.activities.get(&activity_id)
    }

    /// Current slot of an activity, or `None` if it is unknown
    pub fn slot_of(&self, activity_id: ActivityId) -> Option<Slot> {
        if let Some(position) = self.unscheduled.index_of(activity_id) {
            return Some(Slot::Unscheduled(position));
        }
        self.scheduled
            .index_of(activity_id)
            .map(Slot::Scheduled)
    }

    /// Ids of the unscheduled bucket in position order
    pub fn unscheduled_ids(&self) -> &[ActivityId] {
        self.unscheduled.as_slice()
    }

    /// Ids of the scheduled bucket in position order
    pub fn scheduled_ids(&self) -> &[ActivityId] {
        self.scheduled.as_slice()
    }

    /// Activities of one bucket in position order
    pub fn bucket(&self, bucket: Bucket) -> Vec<&Activity> {
        self.index(bucket)
            .iter()
            .filter_map(|id| self.activities.get(id))
            .collect()
    }

    fn index(&self, bucket: Bucket) -> &PositionIndex {
        match bucket {
            Bucket::Unscheduled => &self.unscheduled,
            Bucket::Scheduled => &self.scheduled,
        }
    }

    fn index_mut(&mut self, bucket: Bucket) -> &mut PositionIndex {
        match bucket {
            Bucket::Unscheduled => &mut self.unscheduled,
            Bucket::Scheduled => &mut self.scheduled,
        }
    }

    // ===== Reordering =====

    /// Swap with the previous item in the same bucket; no-op at the top
    pub fn move_up(&mut self, activity_id: ActivityId) -> Result<Vec<SlotChange>, ProgramError> {
        let slot = self.require_slot(activity_id)?;
        if slot.position() == 0 {
            tracing::debug!(%activity_id, "already at the top, nothing to move");
            return Ok(Vec::new());
        }
        self.move_to(activity_id, slot.position() - 1)
    }

    /// Swap with the next item in the same bucket; no-op at the bottom
    pub fn move_down(&mut self, activity_id: ActivityId) -> Result<Vec<SlotChange>, ProgramError> {
        let slot = self.require_slot(activity_id)?;
        if slot.position() + 1 >= self.index(slot.bucket()).len() {
            tracing::debug!(%activity_id, "already at the bottom, nothing to move");
            return Ok(Vec::new());
        }
        // the slot just past the next item; the vacated position closes the gap
        self.move_to(activity_id, slot.position() + 2)
    }

    /// Move to the top of the current bucket
    pub fn move_to_top(&mut self, activity_id: ActivityId) -> Result<Vec<SlotChange>, ProgramError> {
        self.move_to(activity_id, 0)
    }

    /// Move to the bottom of the current bucket
    pub fn move_to_bottom(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        let slot = self.require_slot(activity_id)?;
        let end = self.index(slot.bucket()).len();
        self.move_to(activity_id, end)
    }

    /// Move within the current bucket to a 0-based slot (clamped).
    ///
    /// Moving to the current slot is a true no-op and returns no changes.
    pub fn move_to(
        &mut self,
        activity_id: ActivityId,
        slot: usize,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        let current = self.require_slot(activity_id)?;
        let before = self.snapshot();

        self.index_mut(current.bucket())
            .move_to(activity_id, slot)
            .ok_or(ProgramError::ActivityNotFound(activity_id))?;

        Ok(self.changes_since(&before))
    }

    // ===== Bucket transfer =====

    /// Move an activity from the unscheduled bucket onto the program.
    ///
    /// The vacated unscheduled range compacts; the activity lands at `at`
    /// in the scheduled bucket (clamped), or at the end by default.
    pub fn schedule(
        &mut self,
        activity_id: ActivityId,
        at: Option<usize>,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        self.transfer(activity_id, Bucket::Scheduled, at)
    }

    /// Take an activity off the program, back into the unscheduled bucket
    pub fn unschedule(
        &mut self,
        activity_id: ActivityId,
        at: Option<usize>,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        self.transfer(activity_id, Bucket::Unscheduled, at)
    }

    /// General drag-and-drop primitive: same-bucket drops reorder, cross-bucket
    /// drops transfer, landing at `at` or appended when no slot was given.
    pub fn transfer_and_move(
        &mut self,
        activity_id: ActivityId,
        target: Bucket,
        at: Option<usize>,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        let current = self.require_slot(activity_id)?;

        if current.bucket() == target {
            let slot = at.unwrap_or_else(|| self.index(target).len());
            return self.move_to(activity_id, slot);
        }

        let before = self.snapshot();
        if self.index_mut(current.bucket()).remove(activity_id).is_none() {
            return Err(ProgramError::ActivityNotFound(activity_id));
        }
        let position = at.unwrap_or(usize::MAX);
        self.index_mut(target).insert_at(activity_id, position);

        tracing::debug!(%activity_id, %target, "transferred between buckets");
        Ok(self.changes_since(&before))
    }

    fn transfer(
        &mut self,
        activity_id: ActivityId,
        target: Bucket,
        at: Option<usize>,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        let current = self.require_slot(activity_id)?;

        if current.bucket() == target {
            let expected = match target {
                Bucket::Scheduled => Bucket::Unscheduled,
                Bucket::Unscheduled => Bucket::Scheduled,
            };
            return Err(ProgramError::BucketMismatch {
                activity_id,
                expected,
            });
        }

        self.transfer_and_move(activity_id, target, at)
    }

    // ===== Lifecycle =====

    /// Add a new activity at the end of the unscheduled bucket
    pub fn add_activity(&mut self, activity: Activity) -> Result<Vec<SlotChange>, ProgramError> {
        if self.activities.contains_key(&activity.id) {
            return Err(ProgramError::ActivityAlreadyExists(activity.id));
        }

        let activity_id = activity.id;
        self.activities.insert(activity_id, activity);
        self.unscheduled.push(activity_id);

        Ok(vec![SlotChange {
            activity_id,
            slot: Slot::Unscheduled(self.unscheduled.len() - 1),
        }])
    }

    /// Delete an activity and compact whichever bucket held it
    pub fn remove_activity(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<Vec<SlotChange>, ProgramError> {
        let slot = self.require_slot(activity_id)?;
        let before = self.snapshot();

        self.index_mut(slot.bucket()).remove(activity_id);
        self.activities.remove(&activity_id);

        Ok(self.changes_since(&before))
    }

    /// Replace an activity's display text
    pub fn update_details(
        &mut self,
        activity_id: ActivityId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ProgramError> {
        let activity = self
            .activities
            .get_mut(&activity_id)
            .ok_or(ProgramError::ActivityNotFound(activity_id))?;

        activity.title = title.into();
        activity.description = description.into();
        Ok(())
    }

    // ===== Change derivation =====

    fn require_slot(&self, activity_id: ActivityId) -> Result<Slot, ProgramError> {
        self.slot_of(activity_id)
            .ok_or(ProgramError::ActivityNotFound(activity_id))
    }

    fn snapshot(&self) -> HashMap<ActivityId, Slot> {
        let mut slots = HashMap::with_capacity(self.activities.len());
        for (position, id) in self.unscheduled.iter().enumerate() {
            slots.insert(*id, Slot::Unscheduled(position));
        }
        for (position, id) in self.scheduled.iter().enumerate() {
            slots.insert(*id, Slot::Scheduled(position));
        }
        slots
    }

    /// Diff current slots against a snapshot: only activities whose bucket or
    /// position differs are reported, in bucket-then-position order.
    fn changes_since(&self, before: &HashMap<ActivityId, Slot>) -> Vec<SlotChange> {
        let mut changes = Vec::new();

        for (position, id) in self.unscheduled.iter().enumerate() {
            let slot = Slot::Unscheduled(position);
            if before.get(id) != Some(&slot) {
                changes.push(SlotChange {
                    activity_id: *id,
                    slot,
                });
            }
        }
        for (position, id) in self.scheduled.iter().enumerate() {
            let slot = Slot::Scheduled(position);
            if before.get(id) != Some(&slot) {
                changes.push(SlotChange {
                    activity_id: *id,
                    slot,
                });
            }
        }

        changes
    }
}

use crate::domain::ActivityId;
use instant::Instant;
use std::collections::HashMap;
use std::fmt;

/// Milliseconds since application start (monotonic).
///
/// Backed by `instant::Instant` so it behaves on WASM targets too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The current moment
    pub fn now() -> Self {
        static ANCHOR: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);

        let elapsed = Instant::now().duration_since(*anchor);
        Timestamp(elapsed.as_millis() as u64)
    }

    /// Raw milliseconds value
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Cooperative per-activity write serialization.
///
/// An activity with an outstanding persistence write stays marked here until
/// the write settles, and the UI keeps its mutating controls disabled in the
/// meantime. This serializes operations per item without blocking anything:
/// edits to different activities proceed in parallel, and nothing stops two
/// clients from racing each other (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingWrites {
    pending: HashMap<ActivityId, Timestamp>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a write as in flight; returns false if one already is
    pub fn mark(&mut self, activity_id: ActivityId) -> bool {
        if self.pending.contains_key(&activity_id) {
            tracing::debug!(%activity_id, "write already pending");
            return false;
        }
        self.pending.insert(activity_id, Timestamp::now());
        true
    }

    /// The write finished (accepted or rejected); returns false if none was marked
    pub fn settle(&mut self, activity_id: ActivityId) -> bool {
        self.pending.remove(&activity_id).is_some()
    }

    /// True while the activity's controls should stay disabled
    pub fn is_pending(&self, activity_id: ActivityId) -> bool {
        self.pending.contains_key(&activity_id)
    }

    /// When the in-flight write was issued
    pub fn pending_since(&self, activity_id: ActivityId) -> Option<Timestamp> {
        self.pending.get(&activity_id).copied()
    }

    /// Number of writes currently in flight
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when no write is in flight
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

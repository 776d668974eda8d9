use crate::domain::{Activity, ActivityId, EventId, Program, Slot, SlotChange};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Persisted shape of an activity.
///
/// Storage keeps both legacy index fields side by side and `scheduleIndex`
/// doubles as the bucket discriminator: non-null means the activity is on the
/// program. The field left behind by the other bucket may hold any stale
/// value; readers must never interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub event_id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub sort_index: u32,
    #[serde(default)]
    pub schedule_index: Option<u32>,
}

/// Body of one per-activity PATCH, produced from a [`SlotChange`].
///
/// A scheduled move touches only `scheduleIndex`. An unscheduled move writes
/// `sortIndex` and explicitly nulls `scheduleIndex`, so no stale schedule
/// value survives an unschedule in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    pub activity_id: ActivityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<u32>,
    pub schedule_index: Option<u32>,
}

impl From<SlotChange> for ActivityPatch {
    fn from(change: SlotChange) -> Self {
        match change.slot {
            Slot::Unscheduled(position) => Self {
                activity_id: change.activity_id,
                sort_index: Some(position as u32),
                schedule_index: None,
            },
            Slot::Scheduled(position) => Self {
                activity_id: change.activity_id,
                sort_index: None,
                schedule_index: Some(position as u32),
            },
        }
    }
}

/// Translate an operation's change set into PATCH bodies, one per activity
pub fn patches_for(changes: &[SlotChange]) -> Vec<ActivityPatch> {
    changes.iter().copied().map(ActivityPatch::from).collect()
}

/// Rebuild a program from the raw records of one event.
///
/// Records of other events are ignored. Stored index values only provide the
/// sort order within each bucket; positions are re-derived densely, so gaps
/// or duplicates in storage heal on load.
pub fn load_program(event_id: EventId, records: &[ActivityRecord]) -> Program {
    let mut unscheduled: Vec<&ActivityRecord> = Vec::new();
    let mut scheduled: Vec<&ActivityRecord> = Vec::new();

    for record in records {
        if record.event_id != event_id {
            continue;
        }
        match record.schedule_index {
            Some(_) => scheduled.push(record),
            None => unscheduled.push(record),
        }
    }

    unscheduled.sort_by_key(|record| record.sort_index);
    scheduled.sort_by_key(|record| record.schedule_index);

    Program::from_ordered(
        event_id,
        unscheduled.into_iter().map(to_activity).collect(),
        scheduled.into_iter().map(to_activity).collect(),
    )
}

/// Serialize a program back into full records, one per activity.
///
/// Unscheduled records get `sortIndex` and a null `scheduleIndex`; scheduled
/// records get `scheduleIndex` and a `sortIndex` of zero, which is stale by
/// contract and ignored by readers.
pub fn snapshot_records(program: &Program) -> Vec<ActivityRecord> {
    let event_id = program.event_id();
    let mut records = Vec::with_capacity(program.len());

    for (position, id) in program.unscheduled_ids().iter().enumerate() {
        if let Some(activity) = program.get(*id) {
            records.push(ActivityRecord {
                id: activity.id,
                event_id,
                title: activity.title.clone(),
                description: activity.description.clone(),
                sort_index: position as u32,
                schedule_index: None,
            });
        }
    }
    for (position, id) in program.scheduled_ids().iter().enumerate() {
        if let Some(activity) = program.get(*id) {
            records.push(ActivityRecord {
                id: activity.id,
                event_id,
                title: activity.title.clone(),
                description: activity.description.clone(),
                sort_index: 0,
                schedule_index: Some(position as u32),
            });
        }
    }

    records
}

fn to_activity(record: &ActivityRecord) -> Activity {
    Activity::with_id(record.id, record.title.clone(), record.description.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bucket;
    use uuid::Uuid;

    fn record(event_id: EventId, title: &str, sort: u32, schedule: Option<u32>) -> ActivityRecord {
        ActivityRecord {
            id: Uuid::new_v4(),
            event_id,
            title: title.to_string(),
            description: String::new(),
            sort_index: sort,
            schedule_index: schedule,
        }
    }

    #[test]
    fn test_load_partitions_on_schedule_index() {
        let event_id = Uuid::new_v4();
        let records = vec![
            record(event_id, "B", 1, None),
            record(event_id, "A", 0, None),
            record(event_id, "X", 7, Some(0)),
        ];

        let program = load_program(event_id, &records);

        let unscheduled = program.bucket(Bucket::Unscheduled);
        assert_eq!(unscheduled.len(), 2);
        assert_eq!(unscheduled[0].title, "A");
        assert_eq!(unscheduled[1].title, "B");

        // a non-null scheduleIndex wins over whatever sortIndex says
        let scheduled = program.bucket(Bucket::Scheduled);
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].title, "X");
    }

    #[test]
    fn test_load_heals_gaps_in_stored_positions() {
        let event_id = Uuid::new_v4();
        let records = vec![
            record(event_id, "C", 40, None),
            record(event_id, "A", 3, None),
            record(event_id, "B", 11, None),
        ];

        let program = load_program(event_id, &records);

        let titles: Vec<&str> = program
            .bucket(Bucket::Unscheduled)
            .iter()
            .map(|activity| activity.title.as_str())
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);

        for (position, id) in program.unscheduled_ids().iter().enumerate() {
            assert_eq!(program.slot_of(*id).unwrap().position(), position);
        }
    }

    #[test]
    fn test_load_ignores_other_events() {
        let event_id = Uuid::new_v4();
        let records = vec![
            record(event_id, "Ours", 0, None),
            record(Uuid::new_v4(), "Theirs", 0, None),
        ];

        let program = load_program(event_id, &records);

        assert_eq!(program.len(), 1);
        assert_eq!(program.bucket(Bucket::Unscheduled)[0].title, "Ours");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let event_id = Uuid::new_v4();
        let records = vec![
            record(event_id, "A", 0, None),
            record(event_id, "B", 1, None),
            record(event_id, "X", 0, Some(0)),
            record(event_id, "Y", 0, Some(1)),
        ];
        let program = load_program(event_id, &records);

        let reloaded = load_program(event_id, &snapshot_records(&program));

        assert_eq!(reloaded, program);
    }

    #[test]
    fn test_unscheduled_patch_clears_schedule_index() {
        let change = SlotChange {
            activity_id: Uuid::new_v4(),
            slot: Slot::Unscheduled(2),
        };

        let json = serde_json::to_value(ActivityPatch::from(change)).unwrap();

        assert_eq!(json["sortIndex"], 2);
        assert!(json.as_object().unwrap().contains_key("scheduleIndex"));
        assert_eq!(json["scheduleIndex"], serde_json::Value::Null);
    }

    #[test]
    fn test_scheduled_patch_leaves_sort_index_alone() {
        let change = SlotChange {
            activity_id: Uuid::new_v4(),
            slot: Slot::Scheduled(1),
        };

        let json = serde_json::to_value(ActivityPatch::from(change)).unwrap();

        assert_eq!(json["scheduleIndex"], 1);
        assert!(!json.as_object().unwrap().contains_key("sortIndex"));
    }

    #[test]
    fn test_patches_for_a_schedule_operation() {
        let event_id = Uuid::new_v4();
        let records = vec![
            record(event_id, "A", 0, None),
            record(event_id, "B", 1, None),
            record(event_id, "C", 2, None),
        ];
        let mut program = load_program(event_id, &records);
        let scheduled_id = program.unscheduled_ids()[1];

        let changes = program.schedule(scheduled_id, None).unwrap();
        let patches = patches_for(&changes);

        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].sort_index, Some(1));
        assert_eq!(patches[0].schedule_index, None);
        assert_eq!(patches[1].activity_id, scheduled_id);
        assert_eq!(patches[1].schedule_index, Some(0));
        assert_eq!(patches[1].sort_index, None);
    }

    #[test]
    fn test_record_serialization_uses_legacy_field_names() {
        let record = record(Uuid::new_v4(), "Opening", 0, Some(3));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["sortIndex"], 0);
        assert_eq!(json["scheduleIndex"], 3);
        assert_eq!(json["eventId"], serde_json::json!(record.event_id));
    }
}

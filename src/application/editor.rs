use crate::application::ProgramCommand;
use crate::domain::{ActivityId, Bucket, Program};

/// Free-text editor bound to one activity's displayed position.
///
/// The buffer holds whatever the user has typed so far. Input only turns into
/// a move once it parses as an in-range integer; half-typed, non-numeric, or
/// out-of-range text is kept as display text and issues nothing. The current
/// position is re-read from the program on every evaluation, so the editor
/// stays valid while the list changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionEditor {
    activity_id: ActivityId,
    buffer: String,
}

impl PositionEditor {
    /// Bind to an activity, seeding the buffer with its displayed position
    pub fn bind(program: &Program, activity_id: ActivityId) -> Option<Self> {
        let slot = program.slot_of(activity_id)?;
        Some(Self {
            activity_id,
            buffer: slot.displayed_position().to_string(),
        })
    }

    /// The activity this editor moves
    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    /// Current buffer contents, shown verbatim in the field
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer with the latest keystroke state
    pub fn input(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Reset the buffer to the activity's current displayed position
    pub fn refresh(&mut self, program: &Program) {
        if let Some(slot) = program.slot_of(self.activity_id) {
            self.buffer = slot.displayed_position().to_string();
        }
    }

    /// The move the buffer currently stands for, if it stands for one.
    ///
    /// A typed value smaller than the current displayed position targets the
    /// gap at `value - 1`; a larger or equal value targets the gap at `value`,
    /// which covers the position the item vacates on its way down. Either way
    /// the item lands on the exact row the user typed, and retyping the
    /// current position moves nothing.
    pub fn command(&self, program: &Program) -> Option<ProgramCommand> {
        let value: usize = self.buffer.trim().parse().ok()?;
        let slot = program.slot_of(self.activity_id)?;

        let length = match slot.bucket() {
            Bucket::Unscheduled => program.unscheduled_ids().len(),
            Bucket::Scheduled => program.scheduled_ids().len(),
        };
        if value < 1 || value > length {
            return None;
        }

        let target = if value < slot.displayed_position() {
            value - 1
        } else {
            value
        };

        Some(ProgramCommand::MoveTo {
            activity_id: self.activity_id,
            displayed_position: (target + 1) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ProgramEngine;
    use crate::domain::Activity;
    use uuid::Uuid;

    fn program_with_unscheduled(titles: &[&str]) -> (Program, Vec<ActivityId>) {
        let mut program = Program::new(Uuid::new_v4());
        let mut ids = Vec::new();

        for title in titles {
            let activity = Activity::new(*title, "");
            ids.push(activity.id);
            program.add_activity(activity).unwrap();
        }

        (program, ids)
    }

    fn apply(editor: &PositionEditor, program: &mut Program) {
        if let Some(command) = editor.command(program) {
            ProgramEngine::new().handle_command(program, command);
        }
    }

    #[test]
    fn test_bind_seeds_displayed_position() {
        let (program, ids) = program_with_unscheduled(&["A", "B", "C"]);

        let editor = PositionEditor::bind(&program, ids[2]).unwrap();

        assert_eq!(editor.text(), "3");
    }

    #[test]
    fn test_typing_one_moves_to_the_front() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B", "C", "D"]);
        let mut editor = PositionEditor::bind(&program, ids[3]).unwrap();

        editor.input("1");
        apply(&editor, &mut program);

        assert_eq!(program.unscheduled_ids(), &[ids[3], ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn test_typing_a_later_position_lands_on_that_row() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B", "C", "D"]);
        let mut editor = PositionEditor::bind(&program, ids[0]).unwrap();

        editor.input("3");
        apply(&editor, &mut program);

        assert_eq!(program.unscheduled_ids(), &[ids[1], ids[2], ids[0], ids[3]]);
        assert_eq!(
            program.slot_of(ids[0]).unwrap().displayed_position(),
            3
        );
    }

    #[test]
    fn test_typing_the_last_position_moves_to_the_bottom() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B", "C"]);
        let mut editor = PositionEditor::bind(&program, ids[0]).unwrap();

        editor.input("3");
        apply(&editor, &mut program);

        assert_eq!(program.unscheduled_ids(), &[ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_retyping_the_current_position_moves_nothing() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B", "C"]);
        let mut editor = PositionEditor::bind(&program, ids[1]).unwrap();

        editor.input("2");
        let command = editor.command(&program).unwrap();
        let event = ProgramEngine::new().handle_command(&mut program, command);

        assert!(event.changes().is_empty());
        assert_eq!(program.unscheduled_ids(), &ids[..]);
    }

    #[test]
    fn test_unparseable_input_is_retained_and_inert() {
        let (program, ids) = program_with_unscheduled(&["A", "B"]);
        let mut editor = PositionEditor::bind(&program, ids[0]).unwrap();

        for text in ["", "-", "2x", "one"] {
            editor.input(text);
            assert_eq!(editor.text(), text);
            assert_eq!(editor.command(&program), None);
        }
    }

    #[test]
    fn test_out_of_range_input_is_deferred() {
        let (program, ids) = program_with_unscheduled(&["A", "B"]);
        let mut editor = PositionEditor::bind(&program, ids[0]).unwrap();

        editor.input("0");
        assert_eq!(editor.command(&program), None);

        editor.input("9");
        assert_eq!(editor.command(&program), None);
    }

    #[test]
    fn test_revalidates_against_the_changed_list() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B", "C"]);
        let mut editor = PositionEditor::bind(&program, ids[2]).unwrap();
        editor.input("3");

        // two items left the bucket since the editor was bound
        program.schedule(ids[0], None).unwrap();
        program.schedule(ids[1], None).unwrap();

        // "3" is out of range for the one-item bucket now
        assert_eq!(editor.command(&program), None);

        editor.refresh(&program);
        assert_eq!(editor.text(), "1");
    }

    #[test]
    fn test_editor_for_vanished_activity_is_inert() {
        let (mut program, ids) = program_with_unscheduled(&["A", "B"]);
        let mut editor = PositionEditor::bind(&program, ids[0]).unwrap();
        editor.input("2");

        program.remove_activity(ids[0]).unwrap();

        assert_eq!(editor.command(&program), None);
    }
}

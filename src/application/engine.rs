use crate::application::drop;
use crate::application::{ProgramCommand, ProgramEvent};
use crate::domain::{EventId, Program, ProgramError, SlotChange};

/// Applies commands to a program and emits the resulting events.
///
/// The engine holds no state of its own: every command is a synchronous pure
/// computation over the program passed in, so callers can rebuild both from
/// persisted records on each render cycle. Readers of the program observe the
/// pre- or post-command order, never an intermediate state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramEngine;

impl ProgramEngine {
    pub fn new() -> Self {
        Self
    }

    /// Process a single command and return the resulting event
    pub fn handle_command(&self, program: &mut Program, command: ProgramCommand) -> ProgramEvent {
        let event_id = program.event_id();
        let name = command.name();

        match command {
            ProgramCommand::MoveUp { activity_id } => {
                let result = program.move_up(activity_id);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::MoveDown { activity_id } => {
                let result = program.move_down(activity_id);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::MoveToTop { activity_id } => {
                let result = program.move_to_top(activity_id);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::MoveToBottom { activity_id } => {
                let result = program.move_to_bottom(activity_id);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::MoveTo {
                activity_id,
                displayed_position,
            } => {
                // 1-based on the wire, 0-based inside; zero is absorbed as top
                let slot = displayed_position.saturating_sub(1) as usize;
                let result = program.move_to(activity_id, slot);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::Schedule { activity_id } => {
                let result = program.schedule(activity_id, None);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::Unschedule { activity_id } => {
                let result = program.unschedule(activity_id, None);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::Drop {
                activity_id,
                target,
            } => {
                let result = drop::resolve_drop(program, activity_id, target);
                self.order_changed(event_id, name, result)
            }

            ProgramCommand::AddActivity { activity } => {
                match program.add_activity(activity.clone()) {
                    Ok(changes) => {
                        tracing::debug!(activity_id = %activity.id, "activity added");
                        ProgramEvent::ActivityAdded {
                            event_id,
                            activity,
                            changes,
                        }
                    }
                    Err(error) => self.failed(name, error),
                }
            }

            ProgramCommand::RemoveActivity { activity_id } => {
                match program.remove_activity(activity_id) {
                    Ok(changes) => {
                        tracing::debug!(%activity_id, "activity removed");
                        ProgramEvent::ActivityRemoved {
                            event_id,
                            activity_id,
                            changes,
                        }
                    }
                    Err(error) => self.failed(name, error),
                }
            }

            ProgramCommand::UpdateDetails {
                activity_id,
                title,
                description,
            } => match program.update_details(activity_id, title, description) {
                Ok(()) => ProgramEvent::DetailsUpdated {
                    event_id,
                    activity_id,
                },
                Err(error) => self.failed(name, error),
            },
        }
    }

    /// Wrap a reorder result.
    ///
    /// A bucket mismatch means the caller acted on stale bucket state; that is
    /// a logic error upstream, logged and degraded to a no-op rather than
    /// surfaced as a failure.
    fn order_changed(
        &self,
        event_id: EventId,
        name: &str,
        result: Result<Vec<SlotChange>, ProgramError>,
    ) -> ProgramEvent {
        match result {
            Ok(changes) => {
                tracing::debug!(command = name, changed = changes.len(), "order updated");
                ProgramEvent::OrderChanged { event_id, changes }
            }
            Err(error @ ProgramError::BucketMismatch { .. }) => {
                tracing::warn!(command = name, %error, "stale bucket state, ignoring");
                ProgramEvent::OrderChanged {
                    event_id,
                    changes: Vec::new(),
                }
            }
            Err(error) => self.failed(name, error),
        }
    }

    fn failed(&self, name: &str, error: ProgramError) -> ProgramEvent {
        tracing::debug!(command = name, %error, "command failed");
        ProgramEvent::CommandFailed {
            command: name.to_string(),
            reason: error.to_string(),
        }
    }
}

use crate::models::Note;
use crate::state::request::{RequestSeq, Ticket};

/// Notes of the selected group.
///
/// Loads replace the list wholesale and are guarded by a ticket: only the
/// response to the latest load for the current group is applied. Mutations are
/// applied after the server acknowledged them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NotesState {
    pub group_id: Option<String>,
    pub notes: Vec<Note>,
    pub loading: bool,
    /// A create/update/delete is in flight.
    pub saving: bool,
    pub error: Option<String>,
    seq: RequestSeq,
}

#[derive(Clone, Debug)]
pub(crate) enum NotesAction {
    LoadStarted {
        group_id: String,
    },
    Loaded {
        ticket: Ticket,
        group_id: String,
        notes: Vec<Note>,
    },
    LoadFailed {
        ticket: Ticket,
        message: String,
    },
    Cleared,
    MutationStarted,
    Added(Note),
    Updated {
        note_id: String,
        content: String,
        updated_at: String,
    },
    Removed(String),
    MutationFailed(String),
    DismissError,
}

impl NotesState {
    pub fn reduce(&mut self, action: NotesAction) {
        match action {
            NotesAction::LoadStarted { group_id } => {
                if self.group_id.as_deref() != Some(group_id.as_str()) {
                    self.notes.clear();
                }
                self.group_id = Some(group_id);
                self.seq.issue();
                self.loading = true;
                self.error = None;
            }
            NotesAction::Loaded {
                ticket,
                group_id,
                notes,
            } => {
                if !self.accepts(ticket, &group_id) {
                    tracing::debug!(%group_id, "dropping stale notes response");
                    return;
                }
                self.notes = notes
                    .into_iter()
                    .filter(|n| n.group_id.is_empty() || n.group_id == group_id)
                    .collect();
                self.loading = false;
            }
            NotesAction::LoadFailed { ticket, message } => {
                if !self.seq.is_current(ticket) {
                    return;
                }
                self.loading = false;
                self.error = Some(message);
            }
            NotesAction::Cleared => {
                self.seq.invalidate();
                self.group_id = None;
                self.notes.clear();
                self.loading = false;
                self.saving = false;
                self.error = None;
            }
            NotesAction::MutationStarted => {
                self.saving = true;
                self.error = None;
            }
            NotesAction::Added(note) => {
                self.saving = false;
                if self.group_id.as_deref() != Some(note.group_id.as_str()) {
                    return;
                }
                if !self.notes.iter().any(|n| n.id == note.id) {
                    self.notes.push(note);
                }
            }
            NotesAction::Updated {
                note_id,
                content,
                updated_at,
            } => {
                self.saving = false;
                if let Some(n) = self.notes.iter_mut().find(|n| n.id == note_id) {
                    n.content = content;
                    if !updated_at.is_empty() {
                        n.updated_at = updated_at;
                    }
                }
            }
            NotesAction::Removed(note_id) => {
                self.saving = false;
                self.notes.retain(|n| n.id != note_id);
            }
            NotesAction::MutationFailed(message) => {
                self.saving = false;
                self.error = Some(message);
            }
            NotesAction::DismissError => {
                self.error = None;
            }
        }
    }

    /// Ticket of the load the latest `LoadStarted` asked for.
    pub fn load_ticket(&self) -> Ticket {
        self.seq.current()
    }

    fn accepts(&self, ticket: Ticket, group_id: &str) -> bool {
        self.seq.is_current(ticket) && self.group_id.as_deref() == Some(group_id)
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.saving
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(id: &str, group_id: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            group_id: group_id.to_string(),
            content: content.to_string(),
            created_at: "2024-03-09T10:10:00.000Z".to_string(),
            updated_at: "2024-03-09T10:10:00.000Z".to_string(),
        }
    }

    fn loaded_state(group_id: &str, notes: Vec<Note>) -> NotesState {
        let mut s = NotesState::default();
        s.reduce(NotesAction::LoadStarted {
            group_id: group_id.to_string(),
        });
        let ticket = s.load_ticket();
        s.reduce(NotesAction::Loaded {
            ticket,
            group_id: group_id.to_string(),
            notes,
        });
        s
    }

    #[test]
    fn test_load_replaces_list_wholesale() {
        let mut s = loaded_state("g1", vec![note("1", "g1", "a")]);
        s.reduce(NotesAction::LoadStarted {
            group_id: "g1".to_string(),
        });
        let t = s.load_ticket();
        s.reduce(NotesAction::Loaded {
            ticket: t,
            group_id: "g1".to_string(),
            notes: vec![note("2", "g1", "b"), note("3", "g1", "c")],
        });
        let ids: Vec<&str> = s.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(!s.loading);
    }

    #[test]
    fn test_response_for_previous_group_is_ignored() {
        let mut s = NotesState::default();
        s.reduce(NotesAction::LoadStarted {
            group_id: "g1".to_string(),
        });
        let t1 = s.load_ticket();
        s.reduce(NotesAction::LoadStarted {
            group_id: "g2".to_string(),
        });
        let t2 = s.load_ticket();

        s.reduce(NotesAction::Loaded {
            ticket: t2,
            group_id: "g2".to_string(),
            notes: vec![note("b", "g2", "mine")],
        });
        s.reduce(NotesAction::Loaded {
            ticket: t1,
            group_id: "g1".to_string(),
            notes: vec![note("a", "g1", "stale")],
        });

        assert_eq!(s.group_id.as_deref(), Some("g2"));
        assert_eq!(s.notes, vec![note("b", "g2", "mine")]);
    }

    #[test]
    fn test_stale_load_failure_does_not_surface_error() {
        let mut s = NotesState::default();
        s.reduce(NotesAction::LoadStarted {
            group_id: "g1".to_string(),
        });
        let t1 = s.load_ticket();
        s.reduce(NotesAction::LoadStarted {
            group_id: "g1".to_string(),
        });
        s.reduce(NotesAction::LoadFailed {
            ticket: t1,
            message: "timeout".to_string(),
        });
        assert!(s.error.is_none());
        assert!(s.loading);
    }

    #[test]
    fn test_update_keeps_id_and_sets_submitted_content() {
        let mut s = loaded_state("g1", vec![note("1", "g1", "old"), note("2", "g1", "other")]);
        s.reduce(NotesAction::MutationStarted);
        s.reduce(NotesAction::Updated {
            note_id: "1".to_string(),
            content: "new\ncontent".to_string(),
            updated_at: "2024-03-10T00:00:00.000Z".to_string(),
        });

        assert_eq!(s.notes[0].id, "1");
        assert_eq!(s.notes[0].content, "new\ncontent");
        assert_eq!(s.notes[0].updated_at, "2024-03-10T00:00:00.000Z");
        assert_eq!(s.notes[1], note("2", "g1", "other"));
        assert!(!s.saving);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let mut s = loaded_state(
            "g1",
            vec![note("1", "g1", "a"), note("2", "g1", "b"), note("3", "g1", "c")],
        );
        s.reduce(NotesAction::Removed("2".to_string()));
        assert_eq!(s.notes, vec![note("1", "g1", "a"), note("3", "g1", "c")]);
    }

    #[test]
    fn test_failed_mutation_leaves_list_unchanged() {
        let mut s = loaded_state("g1", vec![note("1", "g1", "a")]);
        let before = s.notes.clone();
        s.reduce(NotesAction::MutationStarted);
        s.reduce(NotesAction::MutationFailed("Network down".to_string()));
        assert_eq!(s.notes, before);
        assert_eq!(s.error.as_deref(), Some("Network down"));
        assert!(!s.is_busy());
    }

    #[test]
    fn test_added_note_for_other_group_is_not_shown() {
        let mut s = loaded_state("g1", vec![]);
        s.reduce(NotesAction::Added(note("x", "g2", "shared")));
        assert!(s.notes.is_empty());
        s.reduce(NotesAction::Added(note("y", "g1", "mine")));
        s.reduce(NotesAction::Added(note("y", "g1", "mine")));
        assert_eq!(s.notes.len(), 1);
    }

    #[test]
    fn test_cleared_invalidates_in_flight_load() {
        let mut s = NotesState::default();
        s.reduce(NotesAction::LoadStarted {
            group_id: "g1".to_string(),
        });
        let t = s.load_ticket();
        s.reduce(NotesAction::Cleared);
        s.reduce(NotesAction::Loaded {
            ticket: t,
            group_id: "g1".to_string(),
            notes: vec![note("1", "g1", "a")],
        });
        assert!(s.notes.is_empty());
        assert!(s.group_id.is_none());
    }
}

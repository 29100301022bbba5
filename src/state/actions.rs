use super::{AppState, GroupsAction, NotesAction};
use crate::api::{validate_note_content, ApiResult, CreateGroupRequest};
use crate::models::{Group, GroupColor, SelectedGroup, ShareOutcome};
use crate::share;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Wait out `quiet`, then run `call` only if the request is still the latest.
/// Keystrokes that were superseded during the wait never reach the server.
async fn after_quiet<T, Q, P, C, Fut>(quiet: Q, is_current: P, call: C) -> Option<T>
where
    P: Fn() -> bool,
    Q: Future<Output = ()>,
    C: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    quiet.await;
    if !is_current() {
        return None;
    }
    Some(call().await)
}

// Network-backed transitions. Each one dispatches the slice actions around a
// single API call; components only decide when to call them.
impl AppState {
    /// Fetch the next sidebar page unless one is in flight or all pages are in.
    pub fn load_next_group_page(&self) {
        if !self.groups.with_untracked(|g| g.can_request_page()) {
            return;
        }

        let page = self.groups.with_untracked(|g| g.paging.next_page);
        let limit = self.config.with_value(|c| c.page_size);
        let api = self.api_client.get_untracked();
        self.dispatch_groups(GroupsAction::PageRequested);

        let this = *self;
        spawn_local(async move {
            match api.list_groups(page, limit).await {
                Ok(res) => {
                    this.page_backoff.update_value(|b| b.reset());
                    this.dispatch_groups(GroupsAction::PageLoaded {
                        page,
                        groups: res.data,
                        total_pages: res.total_pages,
                    });
                }
                Err(e) => {
                    tracing::error!(page, error = %e, "group page fetch failed");
                    this.dispatch_groups(GroupsAction::PageFailed(e.to_string()));
                    this.schedule_page_retry();
                }
            }
        });
    }

    fn schedule_page_retry(&self) {
        let mut backoff = self.page_backoff.get_value();
        let delay = backoff.next_delay();
        self.page_backoff.set_value(backoff);

        let Some(delay) = delay else {
            tracing::warn!(
                attempts = backoff.attempts(),
                "group page retries exhausted; waiting for manual retry"
            );
            return;
        };

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            this.load_next_group_page();
        });
    }

    /// Manual retry from the sidebar error line; restarts the backoff budget.
    pub fn retry_group_pages(&self) {
        self.page_backoff.update_value(|b| b.reset());
        self.load_next_group_page();
    }

    /// Debounced server search. Only the response to the latest keystroke is shown;
    /// an empty query restores the full list immediately.
    pub fn search(&self, query: String) {
        self.dispatch_groups(GroupsAction::SearchChanged(query.clone()));
        let Some(ticket) = self.groups.with_untracked(|g| g.search_ticket()) else {
            return;
        };

        let delay = self.config.with_value(|c| c.search_debounce_ms);
        let this = *self;
        spawn_local(async move {
            let still_current =
                || this.groups.with_untracked(|g| g.search_ticket()) == Some(ticket);
            let api = this.api_client.get_untracked();
            let call = move || async move {
                api.search_groups(&query).await.map_err(|e| {
                    tracing::warn!(%query, error = %e, "group search failed");
                    e.to_string()
                })
            };

            let quiet = TimeoutFuture::new(delay);
            if let Some(result) = after_quiet(quiet, still_current, call).await {
                this.dispatch_groups(GroupsAction::SearchResolved { ticket, result });
            }
        });
    }

    pub fn select_group(&self, group: &Group) {
        self.dispatch_groups(GroupsAction::Select(Some(SelectedGroup::from(group))));
    }

    pub fn clear_selection(&self) {
        self.dispatch_groups(GroupsAction::Select(None));
        self.dispatch_notes(NotesAction::Cleared);
    }

    /// Replace the note list with the server's notes for `group_id`.
    pub fn load_notes(&self, group_id: String) {
        self.dispatch_notes(NotesAction::LoadStarted {
            group_id: group_id.clone(),
        });
        let ticket = self.notes.with_untracked(|n| n.load_ticket());
        let api = self.api_client.get_untracked();

        let this = *self;
        spawn_local(async move {
            match api.list_notes(&group_id).await {
                Ok(notes) => this.dispatch_notes(NotesAction::Loaded {
                    ticket,
                    group_id,
                    notes,
                }),
                Err(e) => {
                    tracing::error!(%group_id, error = %e, "loading notes failed");
                    this.dispatch_notes(NotesAction::LoadFailed {
                        ticket,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    fn selected_group_id(&self) -> Option<String> {
        self.groups
            .with_untracked(|g| g.selected.as_ref().map(|s| s.id.clone()))
    }

    /// Post a note to the selected group. Blank content is rejected before any
    /// request is made and leaves the note state untouched.
    pub async fn post_note(self, content: String) -> ApiResult<()> {
        validate_note_content(&content)?;
        let Some(group_id) = self.selected_group_id() else {
            return Ok(());
        };

        self.dispatch_notes(NotesAction::MutationStarted);
        let api = self.api_client.get_untracked();
        match api.create_note(&group_id, &content).await {
            Ok(note) => {
                self.dispatch_notes(NotesAction::Added(note));
                Ok(())
            }
            Err(e) => {
                tracing::error!(%group_id, error = %e, "posting note failed");
                self.dispatch_notes(NotesAction::MutationFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn update_note(self, note_id: String, content: String) -> ApiResult<()> {
        validate_note_content(&content)?;

        self.dispatch_notes(NotesAction::MutationStarted);
        let api = self.api_client.get_untracked();
        match api.update_note(&note_id, &content).await {
            Ok(note) => {
                self.dispatch_notes(NotesAction::Updated {
                    note_id,
                    content,
                    updated_at: note.updated_at,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!(%note_id, error = %e, "updating note failed");
                self.dispatch_notes(NotesAction::MutationFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn delete_note(self, note_id: String) -> ApiResult<()> {
        self.dispatch_notes(NotesAction::MutationStarted);
        let api = self.api_client.get_untracked();
        match api.delete_note(&note_id).await {
            Ok(()) => {
                self.dispatch_notes(NotesAction::Removed(note_id));
                Ok(())
            }
            Err(e) => {
                tracing::error!(%note_id, error = %e, "deleting note failed");
                self.dispatch_notes(NotesAction::MutationFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn create_group(self, name: String, color: Option<GroupColor>) -> ApiResult<Group> {
        let req = CreateGroupRequest::new(&name, color)?;
        let api = self.api_client.get_untracked();
        let group = api.create_group(&req).await.inspect_err(|e| {
            tracing::error!(name = %req.name, error = %e, "creating group failed");
        })?;
        self.dispatch_groups(GroupsAction::GroupCreated(group.clone()));
        Ok(group)
    }

    /// Every group on the server, across all pages.
    pub async fn load_share_roster(self) -> ApiResult<Vec<Group>> {
        let limit = self.config.with_value(|c| c.page_size);
        let api = self.api_client.get_untracked();
        api.list_all_groups(limit).await
    }

    pub async fn share_note(self, content: String, targets: Vec<Group>) -> Vec<ShareOutcome> {
        let api = self.api_client.get_untracked();
        let outcomes = share::fan_out(&targets, &content, |group_id, content| {
            let api = api.clone();
            async move { api.create_note(&group_id, &content).await }
        })
        .await;

        let ok = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(ok, failed = outcomes.len() - ok, "note shared");
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, EnvConfig};
    use crate::models::Note;
    use crate::state::{Backoff, GroupsState, ThemeState};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn offline_app() -> AppState {
        let config = EnvConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            page_size: 10,
            search_debounce_ms: 0,
        };
        AppState::from_parts(
            config,
            GroupsState::default(),
            ThemeState::default(),
            Backoff::default(),
        )
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            group_id: "g1".to_string(),
            content: format!("note {id}"),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_blank_post_leaves_notes_untouched() {
        let owner = Owner::new();
        owner.with(|| {
            let app = offline_app();
            app.groups.update(|g| {
                g.selected = Some(SelectedGroup {
                    id: "g1".to_string(),
                    name: "Work".to_string(),
                    color: GroupColor::Blue,
                })
            });
            app.dispatch_notes(NotesAction::LoadStarted {
                group_id: "g1".to_string(),
            });
            let ticket = app.notes.with_untracked(|n| n.load_ticket());
            app.dispatch_notes(NotesAction::Loaded {
                ticket,
                group_id: "g1".to_string(),
                notes: vec![note("n1")],
            });
            let before = app.notes.get_untracked();

            for blank in ["", "   ", "\n\t "] {
                let result = block_on(app.post_note(blank.to_string()));
                assert!(matches!(result, Err(ApiError::Validation(_))));
                assert!(!app.notes.with_untracked(|n| n.saving));
            }
            assert_eq!(app.notes.get_untracked(), before);
        });
    }

    #[test]
    fn test_blank_edit_is_rejected_before_saving() {
        let owner = Owner::new();
        owner.with(|| {
            let app = offline_app();
            let before = app.notes.get_untracked();
            let result = block_on(app.update_note("n1".to_string(), " ".to_string()));
            assert!(matches!(result, Err(ApiError::Validation(_))));
            assert_eq!(app.notes.get_untracked(), before);
        });
    }

    #[test]
    fn test_superseded_query_never_calls_server() {
        let latest = Cell::new(1);
        let calls = Cell::new(0);

        // A second keystroke lands while the first is still waiting.
        let quiet = async { latest.set(2) };
        let first = block_on(after_quiet(quiet, || latest.get() == 1, || async {
            calls.set(calls.get() + 1);
        }));
        let second = block_on(after_quiet(async {}, || latest.get() == 2, || async {
            calls.set(calls.get() + 1);
        }));

        assert_eq!(first, None);
        assert_eq!(second, Some(()));
        assert_eq!(calls.get(), 1);
    }
}

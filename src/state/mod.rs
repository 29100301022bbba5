mod actions;
mod groups;
mod notes;
mod request;
mod theme;

pub(crate) use groups::{GroupsAction, GroupsState};
pub(crate) use notes::{NotesAction, NotesState};
pub(crate) use request::Backoff;
pub(crate) use theme::{ThemeAction, ThemeState};

use crate::api::{ApiClient, EnvConfig};
use crate::storage::{load_groups_state, load_theme_state, save_groups_state, save_theme_state};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Error,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Application store, provided to the component tree through [`AppContext`].
///
/// Each slice has one writer: the `dispatch_*` methods, which run the slice
/// reducer and persist the durable slices right away.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub config: StoredValue<EnvConfig>,
    pub api_client: RwSignal<ApiClient>,

    /// Group list + selection (persisted) and sidebar paging/search (transient).
    pub groups: RwSignal<GroupsState>,

    /// Notes of the selected group. Never persisted; refetched on selection.
    pub notes: RwSignal<NotesState>,

    /// Dark/light flag (persisted).
    pub theme: RwSignal<ThemeState>,

    pub toasts: RwSignal<Vec<Toast>>,
    toast_seq: StoredValue<u64>,

    /// Retry schedule for failed group page fetches.
    page_backoff: StoredValue<Backoff>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        let groups = load_groups_state();
        let theme = load_theme_state();

        tracing::info!(
            api_url = %config.api_url,
            groups = groups.groups.len(),
            dark = theme.dark,
            "state restored"
        );

        Self::from_parts(config, groups, theme, Backoff::default())
    }

    /// Build the store from already-loaded pieces. Touches neither the window
    /// nor storage.
    pub(crate) fn from_parts(
        config: EnvConfig,
        groups: GroupsState,
        theme: ThemeState,
        page_backoff: Backoff,
    ) -> Self {
        let api_client = ApiClient::from_config(&config);
        Self {
            config: StoredValue::new(config),
            api_client: RwSignal::new(api_client),
            groups: RwSignal::new(groups),
            notes: RwSignal::new(NotesState::default()),
            theme: RwSignal::new(theme),
            toasts: RwSignal::new(vec![]),
            toast_seq: StoredValue::new(0),
            page_backoff: StoredValue::new(page_backoff),
        }
    }

    pub fn dispatch_groups(&self, action: GroupsAction) {
        self.groups.update(|s| s.reduce(action));
        self.groups.with_untracked(save_groups_state);
    }

    pub fn dispatch_notes(&self, action: NotesAction) {
        self.notes.update(|s| s.reduce(action));
    }

    pub fn dispatch_theme(&self, action: ThemeAction) {
        self.theme.update(|s| s.reduce(action));
        self.theme.with_untracked(save_theme_state);
    }

    pub fn push_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.toast_seq.get_value() + 1;
        self.toast_seq.set_value(id);
        self.toasts.update(|ts| {
            ts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            toasts.update(|ts| ts.retain(|t| t.id != id));
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|ts| ts.retain(|t| t.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

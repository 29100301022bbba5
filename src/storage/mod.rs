use crate::state::{GroupsState, ThemeState};
use serde::{Deserialize, Serialize};

// Both keys live under the `pocket_notes` root.
pub(crate) const GROUPS_KEY: &str = "pocket_notes::groups";
pub(crate) const DARK_MODE_KEY: &str = "pocket_notes::dark_mode";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored value");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    let Ok(json) = serde_json::to_string(value) else {
        return;
    };
    if let Some(storage) = local_storage() {
        if let Err(e) = storage.set_item(key, &json) {
            tracing::warn!(key, error = ?e, "failed to persist state");
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) fn clear_storage() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(GROUPS_KEY);
        let _ = storage.remove_item(DARK_MODE_KEY);
    }
}

pub(crate) fn load_groups_state() -> GroupsState {
    load_json_from_storage(GROUPS_KEY).unwrap_or_default()
}

pub(crate) fn save_groups_state(state: &GroupsState) {
    save_json_to_storage(GROUPS_KEY, state);
}

pub(crate) fn load_theme_state() -> ThemeState {
    load_json_from_storage(DARK_MODE_KEY).unwrap_or_default()
}

pub(crate) fn save_theme_state(state: &ThemeState) {
    save_json_to_storage(DARK_MODE_KEY, state);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::{Group, GroupColor, SelectedGroup};
    use crate::state::{GroupsAction, ThemeAction};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_theme_storage_tracks_each_toggle() {
        clear_storage();
        let mut theme = load_theme_state();
        assert!(!theme.dark);

        for _ in 0..2 {
            theme.reduce(ThemeAction::Toggle);
            save_theme_state(&theme);
            assert_eq!(load_theme_state(), theme);
        }
        assert!(!theme.dark);
    }

    #[wasm_bindgen_test]
    fn test_groups_storage_roundtrip() {
        clear_storage();
        let g = Group {
            id: "g1".to_string(),
            name: "Work".to_string(),
            color: GroupColor::Orange,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let mut state = GroupsState::default();
        state.reduce(GroupsAction::GroupCreated(g.clone()));
        state.reduce(GroupsAction::Select(Some(SelectedGroup::from(&g))));
        save_groups_state(&state);

        let loaded = load_groups_state();
        assert_eq!(loaded.groups, vec![g]);
        assert!(loaded.is_selected("g1"));
        clear_storage();
    }

    #[wasm_bindgen_test]
    fn test_corrupt_value_falls_back_to_default() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(GROUPS_KEY, "{not json");
        }
        assert_eq!(load_groups_state(), GroupsState::default());
        clear_storage();
    }
}

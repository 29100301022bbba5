mod create_group_dialog;
mod landing;
mod note_area;
mod share_dialog;
mod sidebar;
mod topbar;

use crate::state::AppContext;
use create_group_dialog::CreateGroupDialog;
use landing::Landing;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use note_area::NoteArea;
use sidebar::Sidebar;

/// Widths at or below this show one pane at a time.
const SMALL_SCREEN_MAX_PX: f64 = 640.0;

fn is_small_screen() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .is_some_and(|w| w <= SMALL_SCREEN_MAX_PX)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let small: RwSignal<bool> = RwSignal::new(is_small_screen());
    let create_open: RwSignal<bool> = RwSignal::new(false);

    let resize_handle = window_event_listener(ev::resize, move |_| {
        let now = is_small_screen();
        if small.try_get_untracked().is_some_and(|was| was != now) {
            small.set(now);
        }
    });
    on_cleanup(move || resize_handle.remove());

    let has_selection = move || app.groups.with(|g| g.selected.is_some());

    // On small screens the sidebar and the note area replace each other.
    let show_sidebar = move || !small.get() || !has_selection();
    let show_main = move || !small.get() || has_selection();

    view! {
        <div class="flex h-screen overflow-hidden">
            <Show when=show_sidebar fallback=|| ().into_view()>
                <aside class=move || {
                    if small.get() {
                        "relative flex h-full w-full flex-col"
                    } else {
                        "relative flex h-full w-80 shrink-0 flex-col border-r border-border"
                    }
                }>
                    <Sidebar create_open=create_open />
                </aside>
            </Show>

            <Show when=show_main fallback=|| ().into_view()>
                <main class="flex h-full min-w-0 flex-1 flex-col">
                    <Show when=has_selection fallback=|| view! { <Landing /> }>
                        <NoteArea small=small />
                    </Show>
                </main>
            </Show>
        </div>

        <CreateGroupDialog open=create_open />
    }
}

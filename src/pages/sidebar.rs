use super::topbar::Topbar;
use crate::components::hooks::use_scroll_near_end;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, ErrorLine, GroupAvatar, GroupRowSkeletons, Spinner,
};
use crate::models::Group;
use crate::state::AppContext;
use icons::Plus;
use leptos::html;
use leptos::prelude::*;

/// Distance from the bottom of the list at which the next page is requested.
const LOAD_MORE_THRESHOLD_PX: i32 = 120;

#[component]
pub fn Sidebar(create_open: RwSignal<bool>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let list_ref: NodeRef<html::Div> = NodeRef::new();

    // Fetch the first page on mount, then keep fetching while the list is too
    // short to scroll. Persisted groups render right away; fresh pages merge in.
    Effect::new(move |_| {
        let (ready, first) = app.groups.with(|g| {
            (
                !g.search.is_active() && g.paging.error.is_none() && g.can_request_page(),
                g.paging.total_pages.is_none(),
            )
        });
        if !ready {
            return;
        }
        let fills_view = list_ref
            .get()
            .is_some_and(|el| el.scroll_height() > el.client_height());
        if first || !fills_view {
            app.load_next_group_page();
        }
    });

    let (on_scroll, can_scroll_up) =
        use_scroll_near_end(LOAD_MORE_THRESHOLD_PX, move || app.load_next_group_page());

    let searching = move || app.groups.with(|g| g.search.is_active());
    let first_load = move || {
        app.groups
            .with(|g| g.paging.loading && g.groups.is_empty() && !g.search.is_active())
    };
    let more_loading = move || {
        app.groups
            .with(|g| g.paging.loading && !g.groups.is_empty() && !g.search.is_active())
    };
    let page_error = move || {
        app.groups
            .with(|g| (!g.search.is_active()).then(|| g.paging.error.clone()).flatten())
    };
    let search_error = move || app.groups.with(|g| g.search.error.clone());
    let no_results = move || {
        app.groups.with(|g| {
            g.search.is_active()
                && !g.search.loading
                && g.search.results.as_ref().is_some_and(|r| r.is_empty())
        })
    };

    view! {
        <Topbar />

        <div
            class=move || {
                if can_scroll_up.get() {
                    "min-h-0 flex-1 overflow-y-auto border-t border-border pb-24"
                } else {
                    "min-h-0 flex-1 overflow-y-auto pb-24"
                }
            }
            on:scroll=on_scroll
            node_ref=list_ref
        >
            <Show when=first_load fallback=|| ().into_view()>
                <GroupRowSkeletons />
            </Show>

            <Show when=move || searching() && app.groups.with(|g| g.search.loading) fallback=|| ().into_view()>
                <div class="flex items-center gap-2 px-4 py-2 text-xs text-muted-foreground">
                    <Spinner />
                    "Searching…"
                </div>
            </Show>

            <nav aria-label="Groups">
                <For
                    each=move || app.groups.with(|g| g.visible_groups())
                    key=|g| (g.id.clone(), g.name.clone(), g.color)
                    children=move |g| view! { <GroupRow group=g /> }
                />
            </nav>

            <Show when=no_results fallback=|| ().into_view()>
                <div class="px-4 py-6 text-center text-sm text-muted-foreground">"No groups found"</div>
            </Show>

            <Show when=more_loading fallback=|| ().into_view()>
                <div class="flex justify-center py-3">
                    <Spinner class="text-muted-foreground" />
                </div>
            </Show>

            <div class="px-4 py-2">
                {move || search_error().map(|e| view! { <ErrorLine message=e /> })}
                {move || page_error().map(|e| view! {
                    <ErrorLine message=e>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| app.retry_group_pages()
                        >
                            "Retry"
                        </Button>
                    </ErrorLine>
                })}
            </div>
        </div>

        <Button
            variant=ButtonVariant::Fab
            size=ButtonSize::Fab
            class="absolute bottom-6 right-6"
            attr:title="Create group"
            attr:aria-label="Create group"
            on:click=move |_| create_open.set(true)
        >
            <Plus class="size-7" />
        </Button>
    }
}

#[component]
fn GroupRow(group: Group) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let id = StoredValue::new(group.id.clone());
    let is_selected = move || id.with_value(|id| app.groups.with(|g| g.is_selected(id)));
    let name = group.display_name().to_string();
    let color = group.color;
    let group = StoredValue::new(group);

    view! {
        <button
            type="button"
            class=move || {
                if is_selected() {
                    "flex w-full items-center gap-3 rounded-l-2xl bg-accent px-4 py-2 text-left"
                } else {
                    "flex w-full items-center gap-3 rounded-l-2xl px-4 py-2 text-left hover:bg-accent/50"
                }
            }
            aria-current=move || is_selected().then_some("true")
            on:click=move |_| group.with_value(|g| app.select_group(g))
        >
            <GroupAvatar name=name.clone() color=color />
            <span class="truncate text-base font-medium">{name}</span>
        </button>
    }
}

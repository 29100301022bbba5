use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::state::{AppContext, ThemeAction};
use icons::{EllipsisVertical, Moon, Search, Sun, X};
use leptos::html;
use leptos::prelude::*;

/// Esc inside the top bar: close the menu and empty the search box.
///
/// Returns whether a non-empty query was cleared. A no-op once the bar is gone.
fn dismiss_on_escape(query: RwSignal<String>, menu_open: RwSignal<bool>) -> bool {
    menu_open.try_set(false);
    query
        .try_update(|q| {
            let had_query = !q.is_empty();
            q.clear();
            had_query
        })
        .unwrap_or(false)
}

#[component]
pub fn Topbar() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let query: RwSignal<String> =
        RwSignal::new(app.groups.with_untracked(|g| g.search.query.clone()));
    let menu_open: RwSignal<bool> = RwSignal::new(false);
    let search_ref: NodeRef<html::Input> = NodeRef::new();

    let on_clear = move |_| {
        query.set(String::new());
        app.search(String::new());
        if let Some(input) = search_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dismiss_on_escape(query, menu_open) {
            app.search(String::new());
        }
    };

    let is_dark = move || app.theme.with(|t| t.dark);

    view! {
        <header class="space-y-3 px-4 pb-3 pt-6" on:keydown=on_keydown>
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-semibold tracking-tight">"Pocket Notes"</h1>

                <div class="relative">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Menu"
                        attr:aria-expanded=move || menu_open.get().to_string()
                        on:click=move |_| menu_open.update(|v| *v = !*v)
                    >
                        <EllipsisVertical />
                    </Button>

                    <Show when=move || menu_open.get() fallback=|| ().into_view()>
                        <div role="menu" class="absolute right-0 z-40 mt-1 w-44 rounded-md border border-border bg-background p-1 shadow-lg">
                            <button
                                type="button"
                                role="menuitemcheckbox"
                                aria-checked=move || is_dark().to_string()
                                class="flex w-full items-center gap-2 rounded-sm px-2 py-1.5 text-left text-sm hover:bg-accent"
                                on:click=move |_| {
                                    app.dispatch_theme(ThemeAction::Toggle);
                                    menu_open.set(false);
                                }
                            >
                                {move || if is_dark() {
                                    view! { <Sun class="size-4" /> }.into_any()
                                } else {
                                    view! { <Moon class="size-4" /> }.into_any()
                                }}
                                <span class="flex-1">"Dark mode"</span>
                                <span class="text-xs text-muted-foreground">{move || if is_dark() { "On" } else { "Off" }}</span>
                            </button>
                        </div>
                    </Show>
                </div>
            </div>

            <div class="flex items-center gap-2 rounded-md border border-border px-2">
                <Search class="size-4 shrink-0 text-muted-foreground" />
                <div class="min-w-0 flex-1">
                    <Input
                        node_ref=search_ref
                        r#type="search"
                        placeholder="Search groups…"
                        bind_value=query
                        on_value=move |q: String| app.search(q)
                        class="h-8 border-0 px-1 text-sm shadow-none focus-visible:ring-0"
                    />
                </div>
                <Show when=move || !query.get().is_empty() fallback=|| ().into_view()>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="size-7"
                        attr:title="Clear search"
                        on:click=on_clear
                    >
                        <X />
                    </Button>
                </Show>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_clears_query_and_closes_menu() {
        let owner = Owner::new();
        owner.with(|| {
            let query = RwSignal::new("abc".to_string());
            let menu_open = RwSignal::new(true);

            assert!(dismiss_on_escape(query, menu_open));
            assert_eq!(query.get_untracked(), "");
            assert!(!menu_open.get_untracked());

            // Nothing left to clear: no search reset needed.
            assert!(!dismiss_on_escape(query, menu_open));
        });
    }

    #[test]
    fn test_escape_after_unmount_is_a_no_op() {
        let owner = Owner::new();
        let (query, menu_open) =
            owner.with(|| (RwSignal::new("abc".to_string()), RwSignal::new(true)));
        drop(owner);

        assert!(!dismiss_on_escape(query, menu_open));
    }
}

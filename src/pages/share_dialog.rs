use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, ErrorLine, GroupAvatar, Spinner,
};
use crate::models::{Group, Note};
use crate::share::{retry_targets, share_targets, summarize, ShareSummary};
use crate::state::{AppContext, ToastKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Copy a note into other groups. Open while `note` is `Some`.
#[component]
pub fn ShareDialog(note: RwSignal<Option<Note>>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let roster: RwSignal<Vec<Group>> = RwSignal::new(vec![]);
    let roster_loading: RwSignal<bool> = RwSignal::new(false);
    let roster_error: RwSignal<Option<String>> = RwSignal::new(None);
    let chosen: RwSignal<Vec<String>> = RwSignal::new(vec![]);
    let sending: RwSignal<bool> = RwSignal::new(false);
    let summary: RwSignal<Option<ShareSummary>> = RwSignal::new(None);

    let source_id = Memo::new(move |_| note.with(|n| n.as_ref().map(|n| n.group_id.clone())));

    // Reload the roster each time the dialog opens for a note.
    Effect::new(move |_| {
        let Some(source) = source_id.get() else {
            return;
        };
        roster.set(vec![]);
        chosen.set(vec![]);
        summary.set(None);
        roster_error.set(None);
        roster_loading.set(true);

        spawn_local(async move {
            match app.load_share_roster().await {
                Ok(groups) => roster.set(share_targets(&groups, &source)),
                Err(e) => {
                    tracing::error!(error = %e, "loading share roster failed");
                    roster_error.set(Some(e.to_string()));
                }
            }
            roster_loading.set(false);
        });
    });

    let close = move || {
        if !sending.get_untracked() {
            note.set(None);
        }
    };

    let toggle = move |id: String| {
        chosen.update(|c| {
            if let Some(pos) = c.iter().position(|x| *x == id) {
                c.remove(pos);
            } else {
                c.push(id);
            }
        });
    };

    let on_share = move |_| {
        let Some(content) = note.with_untracked(|n| n.as_ref().map(|n| n.content.clone())) else {
            return;
        };
        let targets: Vec<Group> = chosen.with_untracked(|c| {
            roster.with_untracked(|r| r.iter().filter(|g| c.contains(&g.id)).cloned().collect())
        });
        if targets.is_empty() {
            return;
        }

        sending.set(true);
        spawn_local(async move {
            let outcomes = app.share_note(content, targets).await;
            // Delivered targets drop out of the selection.
            chosen.set(retry_targets(&outcomes));
            let result = summarize(&outcomes);
            if result.all_succeeded() {
                app.push_toast(
                    ToastKind::Success,
                    format!("Shared to {}", result.succeeded.join(", ")),
                );
            }
            summary.set(Some(result));
            sending.set(false);
        });
    };

    view! {
        <Show when=move || note.with(|n| n.is_some()) fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <Card class="w-full max-w-sm gap-3 py-4">
                    <CardHeader class="px-4">
                        <CardTitle class="text-base">"Share note"</CardTitle>
                        <CardDescription class="text-xs">"Copy this note into other groups."</CardDescription>
                    </CardHeader>

                    <CardContent class="max-h-72 space-y-1 overflow-y-auto px-4">
                        <Show when=move || roster_loading.get() fallback=|| ().into_view()>
                            <div class="flex items-center gap-2 text-xs text-muted-foreground">
                                <Spinner />
                                "Loading groups…"
                            </div>
                        </Show>

                        {move || roster_error.get().map(|e| view! { <ErrorLine message=e /> })}

                        <Show
                            when=move || !roster_loading.get() && roster_error.get().is_none() && roster.with(|r| r.is_empty())
                            fallback=|| ().into_view()
                        >
                            <div class="text-sm text-muted-foreground">"No other groups to share into."</div>
                        </Show>

                        <For
                            each=move || roster.get()
                            key=|g| g.id.clone()
                            children=move |g| {
                                let id = StoredValue::new(g.id.clone());
                                let checked = move || id.with_value(|id| chosen.with(|c| c.contains(id)));
                                view! {
                                    <label class="flex cursor-pointer items-center gap-3 rounded-md px-2 py-1.5 hover:bg-accent">
                                        <input
                                            type="checkbox"
                                            class="size-4 accent-primary"
                                            prop:checked=checked
                                            disabled=move || sending.get()
                                            on:change=move |_| toggle(id.get_value())
                                        />
                                        <GroupAvatar name=g.display_name().to_string() color=g.color class="size-8 text-xs" />
                                        <span class="truncate text-sm">{g.display_name().to_string()}</span>
                                    </label>
                                }
                            }
                        />

                        {move || summary.get().map(|s| view! {
                            <div class="space-y-1 pt-2 text-xs">
                                {(!s.succeeded.is_empty()).then(|| view! {
                                    <div class="text-muted-foreground">{format!("Shared to: {}", s.succeeded.join(", "))}</div>
                                })}
                                {s.failed
                                    .into_iter()
                                    .map(|(name, err)| view! { <ErrorLine message=format!("{name}: {err}") /> })
                                    .collect_view()}
                            </div>
                        })}
                    </CardContent>

                    <CardFooter class="px-4">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || sending.get()
                            on:click=move |_| close()
                        >
                            {move || if summary.with(|s| s.is_some()) { "Done" } else { "Cancel" }}
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || sending.get() || chosen.with(|c| c.is_empty())
                            on:click=on_share
                        >
                            {move || {
                                if sending.get() {
                                    "Sharing…"
                                } else if summary.with(|s| s.is_some()) {
                                    "Retry failed"
                                } else {
                                    "Share"
                                }
                            }}
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </Show>
    }
}

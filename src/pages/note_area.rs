use super::share_dialog::ShareDialog;
use crate::api::ApiError;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, ErrorLine, GroupAvatar, Spinner, Textarea,
};
use crate::models::Note;
use crate::state::{AppContext, NotesAction};
use crate::util::{format_note_time, linkify, Segment};
use icons::{ArrowLeft, Pencil, Send, Share2, Trash2};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn NoteArea(small: RwSignal<bool>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let selected_id = Memo::new(move |_| {
        app.groups
            .with(|g| g.selected.as_ref().map(|s| s.id.clone()))
    });

    // Refetch whenever the selection points at a different group.
    Effect::new(move |_| {
        if let Some(id) = selected_id.get() {
            app.load_notes(id);
        }
    });

    let sharing: RwSignal<Option<Note>> = RwSignal::new(None);

    let header = move || {
        app.groups.with(|g| {
            g.selected
                .as_ref()
                .map(|s| (s.name.clone(), s.color))
        })
    };

    let loading = move || app.notes.with(|n| n.loading);
    let error = move || app.notes.with(|n| n.error.clone());
    let is_empty = move || {
        app.notes
            .with(|n| !n.loading && n.error.is_none() && n.notes.is_empty())
    };

    view! {
        <header class="flex items-center gap-3 border-b border-border bg-[#001F8B] px-4 py-3 text-white">
            <Show when=move || small.get() fallback=|| ().into_view()>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="text-white hover:bg-white/10"
                    attr:title="Back"
                    attr:aria-label="Back to groups"
                    on:click=move |_| app.clear_selection()
                >
                    <ArrowLeft />
                </Button>
            </Show>
            {move || header().map(|(name, color)| view! {
                <GroupAvatar name=name.clone() color=color />
                <h2 class="truncate text-lg font-medium">{name}</h2>
            })}
        </header>

        <div class="min-h-0 flex-1 space-y-3 overflow-y-auto bg-muted/40 px-4 py-4 sm:px-8">
            <Show when=loading fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                    <Spinner />
                    "Loading notes…"
                </div>
            </Show>

            {move || error().map(|e| view! {
                <ErrorLine message=e>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| app.dispatch_notes(NotesAction::DismissError)
                    >
                        "Dismiss"
                    </Button>
                </ErrorLine>
            })}

            <Show when=is_empty fallback=|| ().into_view()>
                <div class="py-16 text-center text-sm text-muted-foreground">"No notes yet!"</div>
            </Show>

            <For
                each=move || app.notes.with(|n| n.notes.clone())
                key=|n| (n.id.clone(), n.content.clone(), n.updated_at.clone())
                children=move |note| view! { <NoteCard note=note sharing=sharing /> }
            />
        </div>

        <Composer />

        <ShareDialog note=sharing />
    }
}

#[component]
fn NoteContent(#[prop(into)] text: String) -> impl IntoView {
    linkify(&text)
        .into_iter()
        .map(|seg| match seg {
            Segment::Text(t) => view! { <span>{t}</span> }.into_any(),
            Segment::Link { href, label } => view! {
                <a
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                    class="text-primary underline underline-offset-2 break-all"
                >
                    {label}
                </a>
            }
            .into_any(),
        })
        .collect_view()
}

#[component]
fn NoteCard(note: Note, sharing: RwSignal<Option<Note>>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let editing: RwSignal<bool> = RwSignal::new(false);
    let draft: RwSignal<String> = RwSignal::new(note.content.clone());
    let edit_error: RwSignal<Option<String>> = RwSignal::new(None);

    let stamp = format_note_time(&note.updated_at);
    let edited = note.updated_at != note.created_at && !note.created_at.is_empty();
    let content = note.content.clone();
    let note = StoredValue::new(note);
    let busy = move || app.notes.with(|n| n.saving);

    let start_edit = move |_| {
        draft.set(note.with_value(|n| n.content.clone()));
        edit_error.set(None);
        editing.set(true);
    };

    let on_save = move |_| {
        let id = note.with_value(|n| n.id.clone());
        let text = draft.get_untracked();
        spawn_local(async move {
            match app.update_note(id, text).await {
                Ok(()) => editing.set(false),
                Err(ApiError::Validation(msg)) => edit_error.set(Some(msg)),
                // Request failures land in the notes error line.
                Err(_) => {}
            }
        });
    };

    let on_delete = move |_| {
        let id = note.with_value(|n| n.id.clone());
        spawn_local(async move {
            if let Err(e) = app.delete_note(id).await {
                // Already dispatched to the notes error line.
                tracing::debug!(error = %e, "delete rejected");
            }
        });
    };

    view! {
        <article class="rounded-md bg-background p-4 shadow-sm">
            <Show
                when=move || editing.get()
                fallback=move || {
                    let content = content.clone();
                    view! { <p class="whitespace-pre-wrap break-words text-sm leading-relaxed"><NoteContent text=content /></p> }
                }
            >
                <div class="space-y-2">
                    <Textarea bind_value=draft rows=4 autofocus=true class="text-sm" />
                    {move || edit_error.get().map(|e| view! { <ErrorLine message=e /> })}
                    <div class="flex justify-end gap-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| editing.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || busy() || draft.get().trim().is_empty()
                            on:click=on_save
                        >
                            "Save"
                        </Button>
                    </div>
                </div>
            </Show>

            <footer class="mt-3 flex items-center gap-1 text-xs text-muted-foreground">
                <span class="flex-1">
                    {stamp}
                    {edited.then_some(" (edited)")}
                </span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7"
                    attr:title="Edit"
                    attr:disabled=move || busy() || editing.get()
                    on:click=start_edit
                >
                    <Pencil />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7"
                    attr:title="Share"
                    on:click=move |_| sharing.set(Some(note.get_value()))
                >
                    <Share2 />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7 hover:text-destructive"
                    attr:title="Delete"
                    attr:disabled=busy
                    on:click=on_delete
                >
                    <Trash2 />
                </Button>
            </footer>
        </article>
    }
}

#[component]
fn Composer() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let content: RwSignal<String> = RwSignal::new(String::new());
    let area_ref: NodeRef<html::Textarea> = NodeRef::new();
    let saving = move || app.notes.with(|n| n.saving);

    let submit = move || {
        if saving() || content.get_untracked().trim().is_empty() {
            return;
        }
        let text = content.get_untracked();
        spawn_local(async move {
            if app.post_note(text).await.is_ok() {
                content.set(String::new());
                if let Some(el) = area_ref.get_untracked() {
                    let _ = el.focus();
                }
            }
        });
    };

    view! {
        <div class="border-t border-border bg-[#001F8B] p-4">
            <div class="relative rounded-md bg-background">
                <Textarea
                    node_ref=area_ref
                    bind_value=content
                    rows=4
                    placeholder="Enter your text here…"
                    class="border-0 pr-12 shadow-none focus-visible:ring-0"
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        // Enter posts, Shift+Enter falls through to a newline.
                        if ev.key() == "Enter" && !ev.shift_key() && !ev.is_composing() {
                            ev.prevent_default();
                            submit();
                        }
                    }
                />
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="absolute bottom-2 right-2 text-[#001F8B] disabled:text-muted-foreground"
                    attr:title="Post note"
                    attr:aria-label="Post note"
                    attr:disabled=move || saving() || content.get().trim().is_empty()
                    on:click=move |_| submit()
                >
                    <Send />
                </Button>
            </div>
        </div>
    }
}

use crate::state::{AppContext, ToastKind};
use icons::X;
use leptos::prelude::*;

/// Bottom-right stack of transient messages pushed through `AppState::push_toast`.
#[component]
pub fn Toaster() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <div class="pointer-events-none fixed bottom-4 right-4 z-[60] flex w-80 max-w-[calc(100vw-2rem)] flex-col gap-2">
            <For
                each=move || app.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let tone = match t.kind {
                        ToastKind::Error => "border-destructive/40 text-destructive",
                        ToastKind::Success => "border-success/40 text-foreground",
                    };
                    let id = t.id;
                    view! {
                        <div
                            role="status"
                            class=format!("pointer-events-auto flex items-start gap-2 rounded-md border bg-background px-3 py-2 text-sm shadow-lg {tone}")
                        >
                            <div class="min-w-0 flex-1 break-words">{t.message}</div>
                            <button
                                class="shrink-0 text-muted-foreground hover:text-foreground"
                                aria-label="Dismiss"
                                on:click=move |_| app.dismiss_toast(id)
                            >
                                <X class="size-4" />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

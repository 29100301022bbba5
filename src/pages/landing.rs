use leptos::prelude::*;

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <section class="flex h-full flex-col items-center justify-center gap-4 bg-muted/40 px-8 text-center">
            <div class="text-5xl" aria-hidden="true">"🗒️"</div>
            <h2 class="text-3xl font-semibold tracking-tight">"Pocket Notes"</h2>
            <p class="max-w-md text-sm text-muted-foreground">
                "Create a group with the + button, pick it from the list and start writing. "
                "Notes are kept on the server, so they follow you to any browser."
            </p>
        </section>
    }
}

use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Inline `Error: <message>` line used under lists and forms.
#[component]
pub fn ErrorLine(
    #[prop(into)] message: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <Alert class="flex items-center justify-between gap-2 border-destructive/30 px-3 py-2">
            <AlertDescription class="text-destructive text-xs">{format!("Error: {message}")}</AlertDescription>
            {children.map(|c| c())}
        </Alert>
    }
}

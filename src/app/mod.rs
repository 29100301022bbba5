use crate::components::ui::Toaster;
use crate::pages::HomePage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app = AppState::new();
    provide_context(AppContext(app));

    let root_class = move || {
        format!(
            "{} min-h-screen bg-background text-foreground",
            app.theme.with(|t| t.root_class())
        )
    };

    view! {
        <div class=root_class>
            <Router>
                <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                    <Route path=path!("") view=HomePage />
                </Routes>
            </Router>
            <Toaster />
        </div>
    }
}

use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Skeleton, div, "animate-pulse rounded-md bg-muted"}
}

pub use components::*;

/// Placeholder rows shown while the first group page is loading.
#[component]
pub fn GroupRowSkeletons(#[prop(default = 6)] rows: usize) -> impl IntoView {
    (0..rows)
        .map(|_| {
            view! {
                <div class="flex items-center gap-3 px-4 py-2">
                    <Skeleton class="size-12 shrink-0 rounded-full">""</Skeleton>
                    <Skeleton class="h-4 w-2/3">""</Skeleton>
                </div>
            }
        })
        .collect_view()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_group_row_skeletons_render_one_row_each() {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document");
        let host: web_sys::HtmlElement = document
            .create_element("div")
            .expect("create div")
            .unchecked_into();
        document
            .body()
            .expect("body")
            .append_child(&host)
            .expect("append host");

        let _mounted =
            leptos::mount::mount_to(host.clone(), || view! { <GroupRowSkeletons rows=3 /> });

        assert_eq!(host.child_element_count(), 3);
        // Avatar placeholder + title placeholder per row.
        assert_eq!(
            host.first_element_child().map(|row| row.child_element_count()),
            Some(2)
        );
    }
}

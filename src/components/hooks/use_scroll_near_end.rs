use leptos::prelude::*;

/// Hook for infinite lists: calls `on_near_end` whenever the scrolled element
/// comes within `threshold_px` of its bottom edge.
///
/// Returns `(on_scroll_handler, can_scroll_up_signal)`. Attach the handler to the
/// scrollable element's `on:scroll`; the signal drives the top shadow.
pub fn use_scroll_near_end<F>(
    threshold_px: i32,
    on_near_end: F,
) -> (impl Fn(web_sys::Event) + Clone, RwSignal<bool>)
where
    F: Fn() + Clone + 'static,
{
    let can_scroll_up_signal = RwSignal::new(false);

    let on_scroll = move |ev: web_sys::Event| {
        let target = event_target::<web_sys::HtmlElement>(&ev);
        let scroll_top = target.scroll_top();
        let remaining = target.scroll_height() - target.client_height() - scroll_top;

        can_scroll_up_signal.set(scroll_top > 0);
        if remaining <= threshold_px {
            on_near_end();
        }
    };

    (on_scroll, can_scroll_up_signal)
}

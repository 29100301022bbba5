use crate::models::GroupColor;
use crate::util::initials;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Round gradient badge with the group's initials.
#[component]
pub fn GroupAvatar(
    #[prop(into)] name: String,
    color: GroupColor,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let class = tw_merge!(
        "flex size-12 shrink-0 select-none items-center justify-center rounded-full text-base font-medium uppercase text-white",
        class
    );

    view! {
        <div data-name="GroupAvatar" class=class style=color.gradient_style() aria-hidden="true">
            {initials(&name)}
        </div>
    }
}

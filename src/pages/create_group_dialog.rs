use crate::api::ApiError;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter, CardHeader, CardTitle,
    ErrorLine, Input, Label,
};
use crate::models::GroupColor;
use crate::state::{AppContext, ToastKind};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

const CREATE_FAILED: &str = "Failed to create group.";

#[component]
pub fn CreateGroupDialog(open: RwSignal<bool>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let name: RwSignal<String> = RwSignal::new(String::new());
    let color: RwSignal<Option<GroupColor>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let creating: RwSignal<bool> = RwSignal::new(false);
    let name_ref: NodeRef<html::Input> = NodeRef::new();

    Effect::new(move |_| {
        if open.get() {
            if let Some(el) = name_ref.get() {
                let _ = el.focus();
            }
        }
    });

    let reset = move || {
        name.set(String::new());
        color.set(None);
        error.set(None);
    };

    let close = move || {
        if creating.get_untracked() {
            return;
        }
        reset();
        open.set(false);
    };

    let submit = move || {
        if creating.get_untracked() {
            return;
        }
        error.set(None);
        creating.set(true);

        let name_val = name.get_untracked();
        let color_val = color.get_untracked();
        spawn_local(async move {
            match app.create_group(name_val, color_val).await {
                Ok(group) => {
                    app.push_toast(
                        ToastKind::Success,
                        format!("Group \"{}\" created", group.display_name()),
                    );
                    app.select_group(&group);
                    creating.set(false);
                    reset();
                    open.set(false);
                }
                Err(ApiError::Validation(msg)) => {
                    error.set(Some(msg));
                    creating.set(false);
                }
                Err(e) => {
                    let msg = e.server_message().unwrap_or(CREATE_FAILED).to_string();
                    app.push_toast(ToastKind::Error, msg);
                    creating.set(false);
                }
            }
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                on:click=move |_| close()
            >
                <Card
                    class="w-full max-w-md gap-3 py-4"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <CardHeader class="px-4">
                        <CardTitle class="text-base">"Create New Group"</CardTitle>
                    </CardHeader>

                    <CardContent class="space-y-4 px-4">
                        <div class="flex items-center gap-3">
                            <Label class="w-28 shrink-0" html_for="group-name">"Group Name"</Label>
                            <Input
                                id="group-name"
                                node_ref=name_ref
                                bind_value=name
                                placeholder="Enter group name"
                                class="h-8 text-sm"
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        submit();
                                    }
                                }
                            />
                        </div>

                        <div class="flex items-center gap-3">
                            <span class="w-28 shrink-0 text-sm font-medium">"Choose colour"</span>
                            <div class="flex flex-wrap gap-2" role="radiogroup" aria-label="Group colour">
                                {GroupColor::iter()
                                    .filter(|c| *c != GroupColor::Archive)
                                    .map(|c| {
                                        let is_chosen = move || color.get() == Some(c);
                                        view! {
                                            <button
                                                type="button"
                                                role="radio"
                                                aria-label=c.to_string()
                                                aria-checked=move || is_chosen().to_string()
                                                class=move || {
                                                    if is_chosen() {
                                                        "size-7 rounded-full ring-2 ring-offset-2 ring-foreground"
                                                    } else {
                                                        "size-7 rounded-full"
                                                    }
                                                }
                                                style=c.swatch_style()
                                                on:click=move |_| color.set(Some(c))
                                            ></button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        {move || error.get().map(|e| view! { <ErrorLine message=e /> })}
                    </CardContent>

                    <CardFooter class="px-4">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || creating.get()
                            on:click=move |_| close()
                        >
                            "Cancel"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || creating.get()
                            on:click=move |_| submit()
                        >
                            {move || if creating.get() { "Creating…" } else { "Create" }}
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </Show>
    }
}

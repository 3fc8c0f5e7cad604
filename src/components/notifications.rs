use leptos::prelude::*;

use crate::controller::Dashboard;

/// Stack of transient banners; click one to dismiss it early.
#[component]
pub fn NotificationStack() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    view! {
        <div class="notification-stack" aria-live="polite">
            <style>{include_str!("notifications.css")}</style>
            {move || {
                dashboard.notifications.with(|n| {
                    n.items()
                        .iter()
                        .map(|item| {
                            let id = item.id;
                            view! {
                                <div
                                    class=item.kind.css_class()
                                    role="status"
                                    on:click=move |_| dashboard.dismiss(id)
                                >
                                    {item.text.clone()}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                })
            }}
        </div>
    }
}

use leptos::prelude::*;

use crate::components::notifications::NotificationStack;
use crate::config::ApiConfig;
use crate::controller::Dashboard;
use crate::pages::dashboard::DashboardPage;

#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    provide_context(Dashboard::new(config));

    view! {
        <main class="content">
            <DashboardPage />
        </main>
        <NotificationStack />
    }
}

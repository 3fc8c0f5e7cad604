use leptos::prelude::*;

use crate::charts;
use crate::components::chart_canvas::ChartCanvas;
use crate::components::clock::Clock;
use crate::components::log_form::LogFormPanel;
use crate::components::recommendations::RecommendationList;
use crate::components::student_info::StudentInfo;
use crate::components::student_list::StudentList;
use crate::controller::Dashboard;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    // Load students on mount
    Effect::new(move |_| {
        dashboard.load_students();
    });

    let topic_config =
        Signal::derive(move || dashboard.analytics.with(|a| a.as_ref().map(charts::topic_chart)));
    let activity_config = Signal::derive(move || {
        dashboard.analytics.with(|a| a.as_ref().map(charts::activity_chart))
    });

    view! {
        <div class="page dashboard-page">
            <header class="dashboard-header">
                <h2>"Student Activity Dashboard"</h2>
                <div class="header-actions">
                    <Clock />
                    <button
                        id="analyzeBtn"
                        class="btn btn-primary"
                        disabled=move || dashboard.analysis_running.get()
                        on:click=move |_| dashboard.trigger_analysis()
                    >
                        {move || {
                            if dashboard.analysis_running.get() { "Analyzing..." } else { "Run analysis" }
                        }}
                    </button>
                    <button
                        id="refreshBtn"
                        class="btn btn-secondary"
                        on:click=move |_| dashboard.load_students()
                    >
                        "Refresh"
                    </button>
                </div>
            </header>

            <div class="dashboard-grid">
                <StudentList />

                <div class="dashboard-main">
                    <StudentInfo />

                    <div class="chart-row">
                        <section class="card chart-card">
                            <h3 class="card-title">"Topic efficiency"</h3>
                            <ChartCanvas config=topic_config id="topicsChart" />
                        </section>
                        <section class="card chart-card">
                            <h3 class="card-title">"Weekly activity"</h3>
                            <ChartCanvas config=activity_config id="activityChart" />
                        </section>
                    </div>

                    <RecommendationList />
                    <LogFormPanel />
                </div>
            </div>
        </div>
    }
}

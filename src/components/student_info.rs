use leptos::prelude::*;

use crate::controller::Dashboard;
use crate::render::InfoPanel;
use crate::state::Selection;

#[component]
pub fn StudentInfo() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let selected_label = move || {
        dashboard
            .selection
            .with(Selection::current)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let panel = move || {
        dashboard
            .analytics
            .with(|a| a.as_ref().map(InfoPanel::from_analytics))
    };

    view! {
        <section class="card student-info">
            <h3 class="card-title">
                "Student #"
                <span id="currentStudentId">{selected_label}</span>
            </h3>
            {move || match panel() {
                Some(panel) => view! {
                    <dl class="info-grid">
                        <dt>"Cluster"</dt>
                        <dd id="clusterInfo">{panel.cluster}</dd>

                        <dt>"Engagement"</dt>
                        <dd class="engagement">
                            <div class="progress">
                                <div id="engagementBar" class="progress-bar" style:width=panel.engagement_width></div>
                            </div>
                            <span id="engagementScore">{panel.engagement_label}</span>
                        </dd>

                        <dt>"Success rate"</dt>
                        <dd id="successRate">{panel.success_rate}</dd>

                        <dt>"Avg. time per task"</dt>
                        <dd id="avgTime">{panel.avg_time}</dd>
                    </dl>
                }.into_any(),
                None => view! {
                    <p class="info-placeholder">"Select a student to see their analytics."</p>
                }.into_any(),
            }}
        </section>
    }
}

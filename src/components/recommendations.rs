use leptos::prelude::*;

use crate::controller::Dashboard;
use crate::render::Recommendations;

#[component]
pub fn RecommendationList() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let recommendations = move || {
        dashboard.analytics.with(|a| {
            a.as_ref()
                .map(Recommendations::from_analytics)
                .unwrap_or(Recommendations::Empty)
        })
    };

    view! {
        <section class="card recommendations">
            <h3 class="card-title">"Recommendations"</h3>
            <ul id="recommendationsList" class="recommendations-list">
                {move || {
                    let recs = recommendations();
                    let placeholder = recs == Recommendations::Empty;
                    recs.items()
                        .into_iter()
                        .map(|text| view! { <li class:placeholder=move || placeholder>{text}</li> })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </section>
    }
}

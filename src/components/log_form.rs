use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::controller::Dashboard;
use crate::form::LogForm;
use crate::models::ActionType;
use crate::notify::NotificationKind;

/// Manual activity log entry.
#[component]
pub fn LogFormPanel() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();
    let form = RwSignal::new(LogForm::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let entry = match form.with_untracked(LogForm::to_entry) {
            Ok(entry) => entry,
            Err(e) => {
                dashboard.notify(NotificationKind::Error, e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        spawn_local(async move {
            if dashboard.submit_log(entry).await {
                form.set(LogForm::default());
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="card log-form-panel">
            <h3 class="card-title">"Log activity"</h3>
            <form id="logForm" class="log-form" on:submit=on_submit>
                <label for="studentId">"Student ID"</label>
                <input
                    id="studentId"
                    name="studentId"
                    type="number"
                    min="0"
                    class="input"
                    prop:value=move || form.with(|f| f.student_id.clone())
                    on:input=move |ev| form.update(|f| f.student_id = event_target_value(&ev))
                />

                <label for="actionType">"Action"</label>
                <select
                    id="actionType"
                    name="actionType"
                    class="input"
                    prop:value=move || form.with(|f| f.action_type.clone())
                    on:change=move |ev| form.update(|f| f.action_type = event_target_value(&ev))
                >
                    {ActionType::OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect::<Vec<_>>()}
                </select>

                <label for="materialId">"Material ID"</label>
                <input
                    id="materialId"
                    name="materialId"
                    type="text"
                    class="input"
                    placeholder="e.g. lecture-3"
                    prop:value=move || form.with(|f| f.material_id.clone())
                    on:input=move |ev| form.update(|f| f.material_id = event_target_value(&ev))
                />

                <label for="correct">"Correct"</label>
                <select
                    id="correct"
                    name="correct"
                    class="input"
                    prop:value=move || form.with(|f| f.correct.clone())
                    on:change=move |ev| form.update(|f| f.correct = event_target_value(&ev))
                >
                    <option value="true">"Yes"</option>
                    <option value="false">"No"</option>
                </select>

                <label for="timeSpent">"Time spent (sec)"</label>
                <input
                    id="timeSpent"
                    name="timeSpent"
                    type="number"
                    min="0"
                    class="input"
                    prop:value=move || form.with(|f| f.time_spent.clone())
                    on:input=move |ev| form.update(|f| f.time_spent = event_target_value(&ev))
                />

                <label for="difficulty">"Difficulty (1-5)"</label>
                <input
                    id="difficulty"
                    name="difficulty"
                    type="number"
                    min="1"
                    max="5"
                    class="input"
                    prop:value=move || form.with(|f| f.difficulty.clone())
                    on:input=move |ev| form.update(|f| f.difficulty = event_target_value(&ev))
                />

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Sending..." } else { "Submit log" }}
                </button>
            </form>
        </section>
    }
}

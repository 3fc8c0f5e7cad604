use leptos::prelude::*;

use crate::controller::Dashboard;
use crate::render::{matches_search, student_rows};
use crate::state::Selection;

/// Searchable list of students; clicking a row selects that student.
#[component]
pub fn StudentList() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let rows = move || {
        let selected = dashboard.selection.with(Selection::current);
        let query = dashboard.search.get();
        dashboard.students.with(|students| {
            student_rows(students, selected)
                .into_iter()
                .map(|row| {
                    let visible = matches_search(&row, &query);
                    (row, visible)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <aside class="card student-panel">
            <h3 class="card-title">"Students"</h3>
            <input
                type="search"
                id="studentSearch"
                class="input student-search"
                placeholder="Search by name, email or role..."
                prop:value=move || dashboard.search.get()
                on:input=move |ev| {
                    dashboard.search.set(event_target_value(&ev));
                }
            />
            <ul id="studentList" class="student-list">
                {move || {
                    let rows = rows();
                    if rows.is_empty() {
                        return view! { <li class="student-empty">"No students loaded"</li> }.into_any();
                    }
                    rows.into_iter().map(|(row, visible)| {
                        let id = row.id;
                        let active = row.active;
                        view! {
                            <li
                                class="student-item"
                                class:active=move || active
                                data-id=id.to_string()
                                style:display=move || if visible { "flex" } else { "none" }
                                on:click=move |_| dashboard.select_student(id)
                            >
                                <div class="student-name">{row.name}</div>
                                <div class="student-email">{row.email}</div>
                                <div class="student-role">{row.role}</div>
                            </li>
                        }
                    }).collect::<Vec<_>>().into_any()
                }}
            </ul>
        </aside>
    }
}

//! Sequencing of API calls against the dashboard's reactive state.
//!
//! [`Dashboard`] is a bundle of signal handles provided through context; every
//! component reads from it and every user action goes through one of its methods.

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use tracing::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::models::{Analytics, LogEntry, Student, StudentId};
use crate::notify::{NotificationKind, Notifications, NOTIFICATION_TTL_MS};
use crate::state::{AnalysisPoll, LoadToken, PollStep, Selection, ANALYSIS_POLL_INTERVAL_MS};

#[derive(Clone, Copy)]
pub struct Dashboard {
    config: StoredValue<ApiConfig>,
    pub students: RwSignal<Vec<Student>>,
    pub selection: RwSignal<Selection>,
    pub analytics: RwSignal<Option<Analytics>>,
    pub search: RwSignal<String>,
    pub notifications: RwSignal<Notifications>,
    pub analysis_running: RwSignal<bool>,
}

impl Dashboard {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: StoredValue::new(config),
            students: RwSignal::new(Vec::new()),
            selection: RwSignal::new(Selection::default()),
            analytics: RwSignal::new(None),
            search: RwSignal::new(String::new()),
            notifications: RwSignal::new(Notifications::default()),
            analysis_running: RwSignal::new(false),
        }
    }

    fn client(&self) -> ApiClient {
        self.config.with_value(ApiClient::new)
    }

    // -- Notifications --

    pub fn notify(&self, kind: NotificationKind, text: impl Into<String>) {
        let mut id = 0;
        self.notifications.update(|n| id = n.push(kind, text));

        let notifications = self.notifications;
        Timeout::new(NOTIFICATION_TTL_MS, move || {
            notifications.update(|n| n.dismiss(id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|n| n.dismiss(id));
    }

    // -- Student list --

    /// Fetch the list, then keep the current selection if it is still listed,
    /// otherwise select the first student.
    pub fn load_students(self) {
        spawn_local(async move {
            match self.client().list_students().await {
                Ok(students) => {
                    info!(count = students.len(), "student list refreshed");
                    let next = self.selection.with_untracked(|s| s.after_reload(&students));
                    self.students.set(students);
                    if let Some(id) = next {
                        self.select_student(id);
                    }
                }
                Err(e) => {
                    error!(error = %e, "failed to load students");
                    self.notify(
                        NotificationKind::Error,
                        e.user_message("Could not load the student list"),
                    );
                }
            }
        });
    }

    // -- Selection --

    /// Select a student, then load their analytics followed by their logs.
    pub fn select_student(self, student_id: StudentId) {
        let Some(token) = self.begin_selection(student_id) else {
            return;
        };

        spawn_local(async move {
            let client = self.client();
            self.load_analytics(&client, token).await;

            if !self.selection.with_untracked(|s| s.still_selected(&token)) {
                debug!(student_id, "selection changed, skipping log fetch");
                return;
            }

            match client.get_logs(student_id).await {
                Ok(logs) => {
                    info!(student_id, count = logs.entry_count(), "student logs loaded");
                    debug!(student_id, logs = ?logs.logs, "student logs");
                }
                Err(e) => error!(student_id, error = %e, "failed to load student logs"),
            }
        });
    }

    /// Switch the selection and drop the analytics shown for the previous one.
    /// `None` once the dashboard has been disposed.
    fn begin_selection(self, student_id: StudentId) -> Option<LoadToken> {
        let token = self.selection.try_update(|s| s.select(student_id))?;
        self.analytics.set(None);
        Some(token)
    }

    /// Fetch analytics under `token` and display them if the token is still current.
    /// Returns the fetched analytics either way.
    async fn load_analytics(self, client: &ApiClient, token: LoadToken) -> Option<Analytics> {
        let result = client.get_analytics(token.student_id).await;
        let current = self.selection.with_untracked(|s| s.accepts(&token));

        match result {
            Ok(analytics) => {
                if current {
                    self.analytics.set(Some(analytics.clone()));
                } else {
                    debug!(student_id = token.student_id, "discarding stale analytics");
                }
                Some(analytics)
            }
            Err(e) => {
                error!(student_id = token.student_id, error = %e, "failed to load analytics");
                if current {
                    self.notify(
                        NotificationKind::Error,
                        e.user_message("Could not load student analytics"),
                    );
                }
                None
            }
        }
    }

    /// Reload the analytics of `student_id` if it is still selected.
    fn refresh_analytics_for(self, student_id: StudentId) {
        let mut issued = None;
        self.selection.update(|s| issued = s.refresh_for(student_id));
        if let Some(token) = issued {
            spawn_local(async move {
                self.load_analytics(&self.client(), token).await;
            });
        }
    }

    // -- Analysis trigger --

    /// Ask the server to re-analyze the selected student, then poll until
    /// the displayed analytics carry a new `analyzed_at`.
    pub fn trigger_analysis(self) {
        let Some(student_id) = self.selection.with_untracked(Selection::current) else {
            self.notify(NotificationKind::Warning, "Select a student to analyze");
            return;
        };

        let baseline = self
            .analytics
            .with_untracked(|a| a.as_ref().and_then(|a| a.analyzed_at));

        self.analysis_running.set(true);
        spawn_local(async move {
            let client = self.client();
            match client.trigger_analysis(student_id).await {
                Ok(_) => {
                    self.notify(NotificationKind::Success, "Analysis started");
                    self.poll_analysis(&client, student_id, AnalysisPoll::new(baseline))
                        .await;
                }
                Err(e) => {
                    error!(student_id, error = %e, "failed to trigger analysis");
                    self.notify(
                        NotificationKind::Error,
                        e.user_message("Could not start the analysis"),
                    );
                }
            }
            self.analysis_running.set(false);
        });
    }

    async fn poll_analysis(self, client: &ApiClient, student_id: StudentId, mut poll: AnalysisPoll) {
        while poll.has_attempts_left() {
            TimeoutFuture::new(ANALYSIS_POLL_INTERVAL_MS).await;

            let mut issued = None;
            self.selection.update(|s| issued = s.refresh_for(student_id));
            let Some(token) = issued else {
                debug!(student_id, "selection changed, analysis polling stopped");
                return;
            };

            let Some(analytics) = self.load_analytics(client, token).await else {
                return;
            };

            match poll.observe(analytics.analyzed_at) {
                PollStep::Done => {
                    info!(student_id, "analysis results refreshed");
                    return;
                }
                PollStep::Continue => continue,
                PollStep::GiveUp => {
                    warn!(student_id, "analysis results not updated yet");
                    return;
                }
            }
        }
    }

    // -- Log submission --

    /// Post a log entry. On success the analytics of its student are reloaded
    /// when that student is still selected. Returns whether the server accepted it.
    pub async fn submit_log(self, entry: LogEntry) -> bool {
        let student_id = entry.student_id();
        match self.client().submit_log(&entry).await {
            Ok(_) => {
                info!(
                    student_id,
                    action = entry.action_type().as_str(),
                    on_material = entry.time_spent_on_mat(),
                    on_question = entry.time_spent_on_question(),
                    "log submitted"
                );
                self.notify(NotificationKind::Success, "Log submitted");
                self.refresh_analytics_for(student_id);
                true
            }
            Err(e) => {
                error!(student_id, error = %e, "failed to submit log");
                let message = if e.is_rejection() {
                    format!("Log was rejected: {}", e)
                } else {
                    "Could not submit the log".to_string()
                };
                self.notify(NotificationKind::Error, message);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_clears_previous_analytics() {
        let dashboard = Dashboard::new(ApiConfig::default());
        let first = dashboard.begin_selection(1).unwrap();
        dashboard.analytics.set(Some(Analytics {
            student_id: Some(1),
            cluster_group: Some("average".into()),
            ..Default::default()
        }));

        let second = dashboard.begin_selection(2).unwrap();

        assert_eq!(dashboard.analytics.get_untracked(), None);
        dashboard.selection.with_untracked(|s| {
            assert_eq!(s.current(), Some(2));
            assert!(!s.accepts(&first));
            assert!(s.accepts(&second));
        });
    }
}

//! REST client for the analytics core service.
//!
//! One HTTP call per operation: no retries, no timeouts, no backoff.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::models::{
    Analytics, AnalyticsPayload, AnalyzeRequest, ApiAck, LogEntry, LogSubmission, Student,
    StudentId, StudentList, StudentLogs,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed or the body could not be read.
    #[error("network error: {0}")]
    Transport(String),

    /// A successful response whose body was not the expected JSON.
    #[error("failed to parse response: {0}")]
    Decode(String),

    /// A non-2xx response without a recognizable error body.
    #[error("unexpected response (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// The API answered but refused the request.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid endpoint: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for the application tier: the server answered and said no.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected(_))
    }

    /// Text for a notification banner: the server's own words when it gave
    /// any, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(reason) => reason.clone(),
            _ => fallback.to_string(),
        }
    }
}

const REJECTED_WITHOUT_REASON: &str = "Request was rejected by the server";

#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// `GET /students`
    #[instrument(skip(self))]
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let url = self.endpoint(&["students"])?;
        let list: StudentList = self.get_json(url).await?;
        debug!(count = list.students.len(), "students loaded");
        Ok(list.students)
    }

    /// `GET /analytics/{id}`
    #[instrument(skip(self))]
    pub async fn get_analytics(&self, student_id: StudentId) -> Result<Analytics, ApiError> {
        let url = self.endpoint(&["analytics", &student_id.to_string()])?;
        let payload: AnalyticsPayload = self.get_json(url).await?;
        Ok(payload.into_analytics())
    }

    /// `GET /students/{id}/logs`
    #[instrument(skip(self))]
    pub async fn get_logs(&self, student_id: StudentId) -> Result<StudentLogs, ApiError> {
        let url = self.endpoint(&["students", &student_id.to_string(), "logs"])?;
        self.get_json(url).await
    }

    /// `POST /log` with `{"log": entry}`
    #[instrument(skip(self, entry), fields(student_id = entry.student_id()))]
    pub async fn submit_log(&self, entry: &LogEntry) -> Result<ApiAck, ApiError> {
        let url = self.endpoint(&["log"])?;
        self.post_for_ack(url, &LogSubmission { log: entry }).await
    }

    /// `POST /analyze` with `{"student_id": id}`
    #[instrument(skip(self))]
    pub async fn trigger_analysis(&self, student_id: StudentId) -> Result<ApiAck, ApiError> {
        let url = self.endpoint(&["analyze"])?;
        self.post_for_ack(url, &AnalyzeRequest { student_id }).await
    }

    /// Append path segments to the base URL, keeping any base path such as `/api`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_for_ack<B: serde::Serialize>(&self, url: Url, body: &B) -> Result<ApiAck, ApiError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), text));
        }

        let ack: ApiAck =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        if ack.success {
            Ok(ack)
        } else {
            Err(ApiError::Rejected(
                ack.reason()
                    .unwrap_or_else(|| REJECTED_WITHOUT_REASON.to_string()),
            ))
        }
    }
}

/// Error responses carry `{error, details}`; anything else is reported raw.
fn error_from_body(status: u16, body: String) -> ApiError {
    match serde_json::from_str::<ApiAck>(&body).ok().and_then(|ack| ack.reason()) {
        Some(reason) => ApiError::Rejected(reason),
        None => ApiError::Status { status, body },
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::models::ActionType;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&format!("{}/api", server.uri())).unwrap();
        ApiClient::new(&config)
    }

    #[tokio::test]
    async fn lists_students_under_base_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/students"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "students": [
                    {"id": 1, "name": "Ada", "email": "ada@school.example", "role": "student",
                     "created_at": "2026-01-01T00:00:00Z"},
                    {"id": 2, "name": "Grace", "email": "grace@school.example", "role": "student"}
                ],
                "count": 2
            })))
            .mount(&server)
            .await;

        let students = client_for(&server).list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].name, "Grace");
    }

    #[tokio::test]
    async fn base_url_with_trailing_slash_builds_same_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/students/4/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "student_id": 4,
                "logs": [{"id": 10, "action_type": "view_material"}],
                "count": 1
            })))
            .mount(&server)
            .await;

        let config = ApiConfig::new(&format!("{}/api/", server.uri())).unwrap();
        let logs = ApiClient::new(&config).get_logs(4).await.unwrap();
        assert_eq!(logs.student_id, Some(4));
        assert_eq!(logs.entry_count(), 1);
    }

    #[tokio::test]
    async fn fetches_wrapped_analytics() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/analytics/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analytics": {
                    "cluster_group": "average",
                    "engagement_score": 73,
                    "success_rate": 0.5,
                    "recommendation": "Review basics\nSchedule a consultation"
                }
            })))
            .mount(&server)
            .await;

        let analytics = client_for(&server).get_analytics(9).await.unwrap();
        assert_eq!(analytics.cluster_group.as_deref(), Some("average"));
        assert_eq!(analytics.engagement_score, Some(73.0));
    }

    #[tokio::test]
    async fn bare_analytics_with_null_collections() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/analytics/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "student_id": 4,
                "cluster_group": "average",
                "engagement_score": 73,
                "success_rate": 0.5,
                "topic_efficiency": null,
                "recommendations": null,
                "analyzed_at": "2026-03-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        let analytics = client_for(&server).get_analytics(4).await.unwrap();
        assert_eq!(analytics.student_id, Some(4));
        assert_eq!(analytics.engagement_score, Some(73.0));
        assert!(analytics.recommendations.is_empty());
        assert!(analytics.topic_efficiency.is_empty());
    }

    #[tokio::test]
    async fn malformed_wrapped_analytics_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/analytics/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "analytics": { "engagement_score": "high" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_analytics(4).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/analytics/9"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_analytics(9).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
        assert!(!err.is_rejection());
        assert_eq!(err.user_message("Could not load analytics"), "Could not load analytics");
    }

    #[tokio::test]
    async fn server_error_body_becomes_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/analytics/9"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "Failed to get analytics",
                "details": "no rows"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_analytics(9).await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.user_message("fallback"), "Failed to get analytics: no rows");
    }

    #[tokio::test]
    async fn bare_status_error_keeps_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/students"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_students().await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn submit_log_posts_wrapped_entry() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/log"))
            .and(body_json(serde_json::json!({
                "log": {
                    "student_id": 5,
                    "action_type": "view_material",
                    "material_id": "lecture-3",
                    "correct": false,
                    "time_spent_sec": 300,
                    "difficulty": 2,
                    "time_spent_on_mat": 300,
                    "time_spent_on_question": 0,
                    "attempts": 1,
                    "correctness": false,
                    "selected_distractor": null
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Log processed successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entry = LogEntry::new(5, ActionType::ViewMaterial, "lecture-3".into(), false, 300, 2);
        let ack = client_for(&server).submit_log(&entry).await.unwrap();
        assert!(ack.success);
        assert_eq!(ack.message.as_deref(), Some("Log processed successfully"));
    }

    #[tokio::test]
    async fn unsuccessful_ack_carries_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "message": "material not found"
            })))
            .mount(&server)
            .await;

        let entry = LogEntry::new(5, ActionType::TestAnswer, "q-1".into(), true, 10, 1);
        let err = client_for(&server).submit_log(&entry).await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "material not found");
    }

    #[tokio::test]
    async fn trigger_analysis_posts_student_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/analyze"))
            .and(body_json(serde_json::json!({ "student_id": 12 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "student_id": 12,
                "message": "Analysis triggered successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).trigger_analysis(12).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn ack_without_reason_uses_generic_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })))
            .mount(&server)
            .await;

        let err = client_for(&server).trigger_analysis(1).await.unwrap_err();
        assert_eq!(err.to_string(), REJECTED_WITHOUT_REASON);
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        drop(server);

        let err = client.list_students().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
    }
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub type StudentId = u64;

// -- Students --

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Response of `GET /students`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub students: Vec<Student>,
}

// -- Analytics --

/// Server-computed behavioral summary for one student.
///
/// Every field is optional on the wire; the dashboard only formats what it gets.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub cluster_group: Option<String>,
    /// 0-100
    #[serde(default)]
    pub engagement_score: Option<f64>,
    /// 0.0-1.0
    #[serde(default)]
    pub success_rate: Option<f64>,
    /// Seconds
    #[serde(default)]
    pub avg_time_per_task: Option<f64>,
    /// Newline-delimited text block.
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    /// Topic name to efficiency in 0.0-1.0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_efficiency: BTreeMap<String, f64>,
    /// Event counts Monday through Sunday.
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_activity: Vec<f64>,
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// The analytics endpoint answers either `{"analytics": {...}}` or the bare object.
///
/// An `analytics` key selects the wrapped form; a wrapped body that does not
/// hold an analytics object is a decode error.
#[derive(Debug)]
pub(crate) enum AnalyticsPayload {
    Wrapped(Analytics),
    Bare(Analytics),
}

impl AnalyticsPayload {
    pub(crate) fn into_analytics(self) -> Analytics {
        match self {
            AnalyticsPayload::Wrapped(analytics) => analytics,
            AnalyticsPayload::Bare(analytics) => analytics,
        }
    }
}

impl<'de> Deserialize<'de> for AnalyticsPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        let wrapped = value
            .as_object_mut()
            .and_then(|fields| fields.remove("analytics"));

        match wrapped {
            Some(inner) => Analytics::deserialize(inner)
                .map(AnalyticsPayload::Wrapped)
                .map_err(de::Error::custom),
            None => Analytics::deserialize(value)
                .map(AnalyticsPayload::Bare)
                .map_err(de::Error::custom),
        }
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// -- Logs --

/// Response of `GET /students/{id}/logs`. Entries are kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentLogs {
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<serde_json::Value>,
    #[serde(default)]
    pub count: Option<usize>,
}

impl StudentLogs {
    pub fn entry_count(&self) -> usize {
        self.count.unwrap_or(self.logs.len())
    }
}

/// Kind of activity a log entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    ViewMaterial,
    TestAnswer,
    WatchVideo,
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::ViewMaterial => "view_material",
            ActionType::TestAnswer => "test_answer",
            ActionType::WatchVideo => "watch_video",
            ActionType::Other(other) => other,
        }
    }

    /// Form options in display order: (value, label).
    pub const OPTIONS: [(&'static str, &'static str); 3] = [
        ("view_material", "Viewed material"),
        ("test_answer", "Answered a question"),
        ("watch_video", "Watched a video"),
    ];
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "view_material" => ActionType::ViewMaterial,
            "test_answer" => ActionType::TestAnswer,
            "watch_video" => ActionType::WatchVideo,
            _ => ActionType::Other(value),
        }
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        value.as_str().to_string()
    }
}

/// One activity record posted to `POST /log`.
///
/// Built only through [`LogEntry::new`], which routes `time_spent_sec` into
/// exactly one of the material/question buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    student_id: StudentId,
    action_type: ActionType,
    material_id: String,
    correct: bool,
    time_spent_sec: u32,
    difficulty: u8,
    time_spent_on_mat: u32,
    time_spent_on_question: u32,
    attempts: u32,
    correctness: bool,
    selected_distractor: Option<String>,
}

impl LogEntry {
    pub fn new(
        student_id: StudentId,
        action_type: ActionType,
        material_id: String,
        correct: bool,
        time_spent_sec: u32,
        difficulty: u8,
    ) -> Self {
        let (time_spent_on_mat, time_spent_on_question) = match action_type {
            ActionType::ViewMaterial => (time_spent_sec, 0),
            _ => (0, time_spent_sec),
        };

        Self {
            student_id,
            action_type,
            material_id,
            correct,
            time_spent_sec,
            difficulty,
            time_spent_on_mat,
            time_spent_on_question,
            attempts: 1,
            correctness: correct,
            selected_distractor: None,
        }
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn time_spent_on_mat(&self) -> u32 {
        self.time_spent_on_mat
    }

    pub fn time_spent_on_question(&self) -> u32 {
        self.time_spent_on_question
    }
}

// -- Request/response envelopes --

#[derive(Serialize)]
pub(crate) struct LogSubmission<'a> {
    pub log: &'a LogEntry,
}

#[derive(Serialize)]
pub(crate) struct AnalyzeRequest {
    pub student_id: StudentId,
}

/// Reply to the POST endpoints, and the shape of server error bodies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiAck {
    /// Server-supplied explanation, if the body carried one.
    pub fn reason(&self) -> Option<String> {
        match (&self.message, &self.error, &self.details) {
            (Some(message), _, _) => Some(message.clone()),
            (None, Some(error), Some(details)) => Some(format!("{}: {}", error, details)),
            (None, Some(error), None) => Some(error.clone()),
            (None, None, Some(details)) => Some(details.clone()),
            (None, None, None) => None,
        }
    }
}

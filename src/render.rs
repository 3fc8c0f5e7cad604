//! Pure mappings from API data to what the components display.

use crate::models::{Analytics, Student, StudentId};

pub const NO_RECOMMENDATIONS: &str = "No recommendations to display";
pub const UNKNOWN_CLUSTER: &str = "Not determined";

/// One entry of the student list.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

pub fn student_rows(students: &[Student], selected: Option<StudentId>) -> Vec<StudentRow> {
    students
        .iter()
        .map(|s| StudentRow {
            id: s.id,
            name: s.name.clone(),
            email: s.email.clone(),
            role: s.role.clone(),
            active: selected == Some(s.id),
        })
        .collect()
}

/// Case-insensitive substring match over the row's visible text.
pub fn matches_search(row: &StudentRow, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    format!("{} {} {}", row.name, row.email, row.role)
        .to_lowercase()
        .contains(&query)
}

/// Formatted values of the student info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub cluster: String,
    pub engagement_width: String,
    pub engagement_label: String,
    pub success_rate: String,
    pub avg_time: String,
}

impl InfoPanel {
    pub fn from_analytics(analytics: &Analytics) -> Self {
        let cluster = analytics
            .cluster_group
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNKNOWN_CLUSTER)
            .to_string();

        let engagement = analytics.engagement_score.unwrap_or(0.0);
        let success = analytics.success_rate.unwrap_or(0.0);
        let avg_time = analytics.avg_time_per_task.unwrap_or(0.0);

        Self {
            cluster,
            engagement_width: format!("{}%", format_number(engagement.clamp(0.0, 100.0))),
            engagement_label: format!("{}/100", format_number(engagement)),
            success_rate: format!("{:.1}%", success * 100.0),
            avg_time: format!("{} sec", avg_time.round()),
        }
    }
}

/// Whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Items of the recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    Listed(Vec<String>),
    Empty,
}

impl Recommendations {
    /// The text block wins; the server's list is used only when the block is absent.
    pub fn from_analytics(analytics: &Analytics) -> Self {
        let lines: Vec<String> = match &analytics.recommendation {
            Some(block) => non_blank(block.split('\n')),
            None => non_blank(analytics.recommendations.iter().map(String::as_str)),
        };

        if lines.is_empty() {
            Recommendations::Empty
        } else {
            Recommendations::Listed(lines)
        }
    }

    /// What the list shows, placeholder included.
    pub fn items(&self) -> Vec<String> {
        match self {
            Recommendations::Listed(lines) => lines.clone(),
            Recommendations::Empty => vec![NO_RECOMMENDATIONS.to_string()],
        }
    }
}

fn non_blank<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

//! Raw log-form fields and their conversion into a [`LogEntry`].

use thiserror::Error;

use crate::models::{ActionType, LogEntry};

pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a non-negative whole number")]
    Negative { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

/// The six form inputs exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogForm {
    pub student_id: String,
    pub action_type: String,
    pub material_id: String,
    /// `"true"` or `"false"`, from a select.
    pub correct: String,
    pub time_spent: String,
    pub difficulty: String,
}

impl Default for LogForm {
    fn default() -> Self {
        Self {
            student_id: String::new(),
            action_type: "view_material".to_string(),
            material_id: String::new(),
            correct: "true".to_string(),
            time_spent: String::new(),
            difficulty: "1".to_string(),
        }
    }
}

impl LogForm {
    /// Validate and coerce the fields.
    pub fn to_entry(&self) -> Result<LogEntry, FormError> {
        let student_id = parse_non_negative("Student ID", &self.student_id)?;

        let material_id = self.material_id.trim();
        if material_id.is_empty() {
            return Err(FormError::Missing {
                field: "Material ID",
            });
        }

        let time_spent = parse_non_negative("Time spent", &self.time_spent)?;
        let time_spent = u32::try_from(time_spent).map_err(|_| FormError::OutOfRange {
            field: "Time spent",
            min: 0,
            max: u32::MAX as i64,
        })?;

        let difficulty = parse_number("Difficulty", &self.difficulty)?;
        let difficulty = u8::try_from(difficulty)
            .ok()
            .filter(|d| DIFFICULTY_RANGE.contains(d))
            .ok_or(FormError::OutOfRange {
                field: "Difficulty",
                min: *DIFFICULTY_RANGE.start() as i64,
                max: *DIFFICULTY_RANGE.end() as i64,
            })?;

        let action_type = ActionType::from(self.action_type.trim().to_string());

        Ok(LogEntry::new(
            student_id,
            action_type,
            material_id.to_string(),
            self.correct == "true",
            time_spent,
            difficulty,
        ))
    }
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<u64, FormError> {
    let value = parse_number(field, raw)?;
    u64::try_from(value).map_err(|_| FormError::Negative { field })
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Missing { field });
    }
    raw.parse().map_err(|_| FormError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

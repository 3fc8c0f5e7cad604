//! Selection state and analytics load ordering.
//!
//! Every analytics request is issued under a [`LoadToken`]. A response may only
//! be displayed while its token is still the newest one handed out, so a slow
//! reply for an earlier selection can never overwrite a later one.

use chrono::{DateTime, Utc};

use crate::models::{Student, StudentId};

/// Issued per analytics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    pub student_id: StudentId,
    generation: u64,
    load_seq: u64,
}

/// The one piece of process-wide state: which student is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<StudentId>,
    generation: u64,
    load_seq: u64,
}

impl Selection {
    pub fn current(&self) -> Option<StudentId> {
        self.current
    }

    pub fn is_selected(&self, student_id: StudentId) -> bool {
        self.current == Some(student_id)
    }

    /// Move to `selected(student_id)`. Tokens issued before this call go stale,
    /// even when the same student is selected again.
    pub fn select(&mut self, student_id: StudentId) -> LoadToken {
        self.current = Some(student_id);
        self.generation += 1;
        self.next_token(student_id)
    }

    /// New token for reloading `student_id`, only if it is still the selection.
    pub fn refresh_for(&mut self, student_id: StudentId) -> Option<LoadToken> {
        if self.is_selected(student_id) {
            Some(self.next_token(student_id))
        } else {
            None
        }
    }

    /// Student to select after the list was reloaded: the current one if it is
    /// still listed, otherwise the first. `None` for an empty list.
    pub fn after_reload(&self, students: &[Student]) -> Option<StudentId> {
        self.current
            .filter(|id| students.iter().any(|s| s.id == *id))
            .or_else(|| students.first().map(|s| s.id))
    }

    /// Whether a response issued under `token` may be displayed.
    pub fn accepts(&self, token: &LoadToken) -> bool {
        token.generation == self.generation && token.load_seq == self.load_seq
    }

    /// Whether the selection that issued `token` is still in effect; later
    /// refreshes of the same selection do not end it.
    pub fn still_selected(&self, token: &LoadToken) -> bool {
        token.generation == self.generation
    }

    fn next_token(&mut self, student_id: StudentId) -> LoadToken {
        self.load_seq += 1;
        LoadToken {
            student_id,
            generation: self.generation,
            load_seq: self.load_seq,
        }
    }
}

pub const ANALYSIS_POLL_ATTEMPTS: u32 = 5;
pub const ANALYSIS_POLL_INTERVAL_MS: u32 = 2_000;

/// Decides when to stop re-fetching analytics after an analysis was triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPoll {
    baseline: Option<DateTime<Utc>>,
    attempts_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Fresh analytics arrived.
    Done,
    /// Still the old result; wait and fetch again.
    Continue,
    /// Out of attempts.
    GiveUp,
}

impl AnalysisPoll {
    /// `baseline` is the `analyzed_at` shown before the trigger.
    pub fn new(baseline: Option<DateTime<Utc>>) -> Self {
        Self {
            baseline,
            attempts_left: ANALYSIS_POLL_ATTEMPTS,
        }
    }

    pub fn has_attempts_left(&self) -> bool {
        self.attempts_left > 0
    }

    /// Record one fetched `analyzed_at`.
    pub fn observe(&mut self, analyzed_at: Option<DateTime<Utc>>) -> PollStep {
        self.attempts_left = self.attempts_left.saturating_sub(1);

        if analyzed_at.is_some() && analyzed_at != self.baseline {
            PollStep::Done
        } else if self.attempts_left == 0 {
            PollStep::GiveUp
        } else {
            PollStep::Continue
        }
    }
}

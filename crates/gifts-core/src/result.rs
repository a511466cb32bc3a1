use crate::score::GiftScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// QuizResult
// ---------------------------------------------------------------------------

/// One completed, scored submission of the questionnaire for one identity.
///
/// Built in session state before persistence is attempted, so results render
/// even when the store is down. Never mutated after creation except to attach
/// the store-assigned id or a late persistence error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    /// Store-assigned identifier; absent until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// Ranked shortlist: descending score, ties in catalog order.
    pub top_gifts: Vec<GiftScore>,
    /// Full score list in catalog order.
    pub all_scores: Vec<GiftScore>,
    pub created_at: DateTime<Utc>,
    /// Message attached when persistence failed; the result itself is intact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

impl QuizResult {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        top_gifts: Vec<GiftScore>,
        all_scores: Vec<GiftScore>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            top_gifts,
            all_scores,
            created_at: Utc::now(),
            save_error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

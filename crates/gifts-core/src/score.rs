use crate::answers::AnswerSet;
use crate::catalog::{Catalog, Gift};
use serde::{Deserialize, Serialize};

/// How many gifts make the ranked shortlist.
pub const TOP_GIFT_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// GiftScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftScore {
    pub gift: Gift,
    pub score: u32,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score every gift in catalog order. Absent answers count as zero, so a
/// partial answer set is tolerated here; completeness enforcement belongs to
/// the session layer.
pub fn score(answers: &AnswerSet, catalog: &Catalog) -> Vec<GiftScore> {
    catalog
        .gifts()
        .iter()
        .map(|gift| {
            let total = gift
                .questions
                .iter()
                .map(|&qid| u32::from(answers.get(qid).unwrap_or(0)))
                .sum();
            GiftScore {
                gift: gift.clone(),
                score: total,
            }
        })
        .collect()
}

/// Split catalog-order scores into the ranked top three and the full list.
///
/// The shortlist is a stable descending sort, so ties keep catalog definition
/// order. The full list stays in catalog order; only the shortlist is ranked.
pub fn rank(scores: Vec<GiftScore>) -> (Vec<GiftScore>, Vec<GiftScore>) {
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted.truncate(TOP_GIFT_COUNT);
    (sorted, scores)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::catalog::{Catalog, RATING_MAX, RATING_MIN};
use crate::error::{GiftsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// AnswerSet
// ---------------------------------------------------------------------------

/// Ratings keyed by question id. Partial by construction until every catalog
/// question has an entry; cleared entirely on session reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet(BTreeMap<u32, u8>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rating, replacing any prior rating for the same question.
    pub fn record(&mut self, question_id: u32, rating: u8) -> Result<()> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(GiftsError::RatingOutOfRange(rating));
        }
        self.0.insert(question_id, rating);
        Ok(())
    }

    pub fn get(&self, question_id: u32) -> Option<u8> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.0.iter().map(|(&id, &rating)| (id, rating))
    }

    /// True when every question in the catalog has an answer.
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        catalog.questions().iter().all(|q| self.0.contains_key(&q.id))
    }

    /// True when every question on the given page has an answer. Answers on
    /// other pages are irrelevant.
    pub fn page_complete(&self, catalog: &Catalog, page_index: usize) -> bool {
        catalog
            .page(page_index)
            .iter()
            .all(|q| self.0.contains_key(&q.id))
    }
}

impl FromIterator<(u32, u8)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (u32, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

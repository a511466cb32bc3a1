use crate::error::{GiftsError, Result};
use serde::{Deserialize, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Default number of questions shown per form page.
pub const QUESTIONS_PER_PAGE: usize = 8;

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Gift
// ---------------------------------------------------------------------------

/// A named group of questions whose answers sum to one score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Question ids that contribute to this gift's score.
    pub questions: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The fixed question battery and gift taxonomy. Static data: constructed
/// once, never mutated at runtime.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    gifts: Vec<Gift>,
    page_size: usize,
}

impl Catalog {
    pub fn new(questions: Vec<Question>, gifts: Vec<Gift>, page_size: usize) -> Result<Self> {
        let catalog = Self {
            questions,
            gifts,
            page_size,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GiftsError::InvalidCatalog("page size must be > 0".into()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if self.questions[..i].iter().any(|other| other.id == q.id) {
                return Err(GiftsError::InvalidCatalog(format!(
                    "duplicate question id {}",
                    q.id
                )));
            }
        }
        for gift in &self.gifts {
            for &qid in &gift.questions {
                if !self.questions.iter().any(|q| q.id == qid) {
                    return Err(GiftsError::InvalidCatalog(format!(
                        "gift '{}' references unknown question {}",
                        gift.id, qid
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    // ---------------------------------------------------------------------------
    // Pagination
    // ---------------------------------------------------------------------------

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.questions.len().div_ceil(self.page_size)
    }

    /// Pure windowing: page `i` is the slice `[i*P, i*P+P)`.
    pub fn page(&self, index: usize) -> &[Question] {
        let start = index.saturating_mul(self.page_size).min(self.questions.len());
        let end = (start + self.page_size).min(self.questions.len());
        &self.questions[start..end]
    }

    // ---------------------------------------------------------------------------
    // Built-in battery
    // ---------------------------------------------------------------------------

    /// The standard battery: 40 statements across 10 gifts, 4 questions each.
    pub fn standard() -> Self {
        let questions = STANDARD_QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, &text)| Question {
                id: (i + 1) as u32,
                text: text.to_string(),
            })
            .collect();

        let gifts = STANDARD_GIFTS
            .iter()
            .map(|&(id, name, description, ref qids)| Gift {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                questions: qids.to_vec(),
            })
            .collect();

        // Static data is validated by tests; construction cannot fail here.
        Self {
            questions,
            gifts,
            page_size: QUESTIONS_PER_PAGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Standard battery data
// ---------------------------------------------------------------------------

const STANDARD_QUESTIONS: [&str; 40] = [
    "I enjoy organizing people and tasks to reach a shared goal.",
    "People look to me for direction when a group has to decide something.",
    "I am comfortable taking responsibility for the outcome of a project.",
    "I naturally step forward when no one else is willing to lead.",
    "I enjoy explaining difficult ideas until others understand them.",
    "I spend time studying so I can pass on what I have learned.",
    "People tell me that my explanations make things click for them.",
    "I feel energized preparing material that helps others learn.",
    "I notice practical needs and quietly take care of them.",
    "I would rather work behind the scenes than be up front.",
    "I find satisfaction in doing small tasks that free others to serve.",
    "I volunteer for jobs nobody else wants.",
    "I find the right words to lift people who are discouraged.",
    "People seek me out when they need motivation to keep going.",
    "I can challenge others to grow without tearing them down.",
    "I follow up with people to see how they are progressing.",
    "I give generously even when my own resources are limited.",
    "I manage my finances so that I am able to give more.",
    "I am alert to needs that a timely gift could meet.",
    "Giving anonymously appeals to me more than public recognition.",
    "I am drawn to people who are suffering or overlooked.",
    "I can sit with someone in pain without needing to fix them.",
    "People say I am easy to open up to about hard things.",
    "I feel compassion before I feel judgment.",
    "I look for natural openings to share what I believe.",
    "I enjoy conversations with people who see the world differently.",
    "I can present my convictions without alienating others.",
    "Meeting new people energizes rather than drains me.",
    "I like making newcomers feel they belong.",
    "My home is open to guests on short notice.",
    "I notice the person standing alone at a gathering.",
    "I would happily host a group every week.",
    "I stay confident in a good outcome when others have given up.",
    "I make decisions based on trust rather than certainty.",
    "Obstacles read to me as challenges, not stop signs.",
    "I encourage others to attempt things that seem impossible.",
    "I enjoy building schedules, budgets, and plans that hold up.",
    "I keep track of details others tend to lose.",
    "I can break a large goal into steps people can actually follow.",
    "Coordinating many moving parts does not overwhelm me.",
];

type GiftRow = (&'static str, &'static str, &'static str, [u32; 4]);

const STANDARD_GIFTS: [GiftRow; 10] = [
    (
        "A",
        "Leadership",
        "Setting direction and taking responsibility so a group moves together.",
        [1, 2, 3, 4],
    ),
    (
        "B",
        "Teaching",
        "Making difficult things understandable so others can grow.",
        [5, 6, 7, 8],
    ),
    (
        "C",
        "Service",
        "Meeting practical needs, usually out of sight.",
        [9, 10, 11, 12],
    ),
    (
        "D",
        "Encouragement",
        "Strengthening the discouraged and spurring others on.",
        [13, 14, 15, 16],
    ),
    (
        "E",
        "Giving",
        "Contributing resources freely, cheerfully, and strategically.",
        [17, 18, 19, 20],
    ),
    (
        "F",
        "Mercy",
        "Staying present to people in pain without judgment.",
        [21, 22, 23, 24],
    ),
    (
        "G",
        "Evangelism",
        "Sharing convictions persuasively with those outside the community.",
        [25, 26, 27, 28],
    ),
    (
        "H",
        "Hospitality",
        "Opening home and table so strangers become friends.",
        [29, 30, 31, 32],
    ),
    (
        "I",
        "Faith",
        "Trusting a good outcome when the evidence is still thin.",
        [33, 34, 35, 36],
    ),
    (
        "J",
        "Administration",
        "Turning goals into plans, details, and working schedules.",
        [37, 38, 39, 40],
    ),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = Catalog::standard();
        catalog.validate().unwrap();
        assert_eq!(catalog.questions().len(), 40);
        assert_eq!(catalog.gifts().len(), 10);
    }

    #[test]
    fn standard_pagination() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.total_pages(), 5);
        assert_eq!(catalog.page(0).len(), 8);
        assert_eq!(catalog.page(0)[0].id, 1);
        assert_eq!(catalog.page(4)[7].id, 40);
        assert!(catalog.page(5).is_empty());
    }

    #[test]
    fn partial_last_page() {
        let questions: Vec<Question> = (1..=7)
            .map(|id| Question {
                id,
                text: format!("q{id}"),
            })
            .collect();
        let catalog = Catalog::new(questions, Vec::new(), 3).unwrap();
        assert_eq!(catalog.total_pages(), 3);
        assert_eq!(catalog.page(2).len(), 1);
    }

    #[test]
    fn rejects_unknown_member_question() {
        let questions = vec![Question {
            id: 1,
            text: "q1".into(),
        }];
        let gifts = vec![Gift {
            id: "X".into(),
            name: "X".into(),
            description: String::new(),
            questions: vec![1, 99],
        }];
        assert!(matches!(
            Catalog::new(questions, gifts, 3),
            Err(GiftsError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let questions = vec![
            Question {
                id: 1,
                text: "a".into(),
            },
            Question {
                id: 1,
                text: "b".into(),
            },
        ];
        assert!(Catalog::new(questions, Vec::new(), 3).is_err());
    }

    #[test]
    fn question_lookup() {
        let catalog = Catalog::standard();
        assert!(catalog.question(1).is_some());
        assert!(catalog.question(0).is_none());
        assert!(catalog.question(41).is_none());
    }

    #[test]
    fn question_may_belong_to_many_gifts() {
        let questions = vec![Question {
            id: 1,
            text: "shared".into(),
        }];
        let gifts = vec![
            Gift {
                id: "X".into(),
                name: "X".into(),
                description: String::new(),
                questions: vec![1],
            },
            Gift {
                id: "Y".into(),
                name: "Y".into(),
                description: String::new(),
                questions: vec![1],
            },
        ];
        assert!(Catalog::new(questions, gifts, 3).is_ok());
    }
}

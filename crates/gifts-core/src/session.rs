use crate::answers::AnswerSet;
use crate::catalog::Catalog;
use crate::error::GiftsError;
use crate::identity::{validate_email, Identity};
use crate::plan::{DevelopmentPlan, PlanCategoryPatch, PlanField};
use crate::result::QuizResult;
use crate::score::GiftScore;

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

/// The fixed set of human-readable messages the session can surface. Raw
/// store errors never reach the renderer; they are logged at the engine
/// boundary and mapped to one of these.
pub mod msg {
    pub const INVALID_NAME: &str = "Please enter your name.";
    pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
    pub const ANSWER_PAGE: &str = "Please answer every question on this page to continue.";
    pub const MISSING_ANSWERS: &str =
        "Some pages still have unanswered questions. Please review them.";
    pub const INVALID_ANSWER: &str = "That answer could not be recorded.";
    pub const RESULT_SAVE_FAILED: &str =
        "There was a problem saving your results. You can still view them locally.";
    pub const NO_PRIOR_RESULT: &str =
        "No questionnaire results were found for this email. Please complete the questionnaire first.";
    pub const LOAD_FAILED: &str = "Failed to load your data. Please try again.";
    pub const PLAN_SAVE_FAILED: &str =
        "Failed to save your development plan. Please try again.";
    pub const NOTHING_TO_SAVE: &str = "There is no plan to save or the email is missing.";
    pub const NEED_EMAIL_FOR_PLAN: &str = "Please enter your email to load your plan.";
    pub const NO_RESULTS_TO_SHOW: &str =
        "There are no results to show. Please complete the questionnaire.";
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    IdentifyForQuiz,
    IdentifyForDevelopment,
    Form,
    Calculating,
    Saving,
    Results,
    DevelopmentGuide,
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// One user action or one store-call completion. The session processes one
/// intent at a time; there is no parallel mutation of session state.
#[derive(Debug, Clone)]
pub enum Intent {
    StartQuiz,
    StartDevelopment,
    BackToWelcome,
    Identify { name: String, email: String },
    Answer { question_id: u32, rating: u8 },
    NextPage,
    PrevPage,
    Submit,
    OpenDevelopmentGuide,
    IdentifyForPlan { email: String },
    EditPlan { field: PlanField, value: String },
    PatchPlanCategories(PlanCategoryPatch),
    SavePlan,
    ShowResults,
    Reset,

    // Engine-supplied completions. Each carries the generation observed when
    // its effect was issued; stale completions are dropped.
    ScoresReady {
        generation: u64,
        top: Vec<GiftScore>,
        all: Vec<GiftScore>,
    },
    StoreOutcome {
        generation: u64,
        outcome: StoreOutcome,
    },
}

/// Completion of one store call, already reduced to data or a raw error
/// string (the engine logs the raw error before handing it here).
#[derive(Debug, Clone)]
pub enum StoreOutcome {
    ResultPersisted(Result<String, String>),
    ResultLookup(Result<Option<QuizResult>, String>),
    PlanLoaded(Result<Option<DevelopmentPlan>, String>),
    PlanSaved(Result<(), String>),
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// Side-effect descriptions the reducer requests instead of performing.
/// Store calls are the only suspension points of the whole flow.
#[derive(Debug, Clone)]
pub enum Effect {
    ComputeScores { generation: u64 },
    PersistResult { generation: u64, result: QuizResult },
    LookupResult { generation: u64, email: String },
    LoadPlan { generation: u64, email: String },
    SavePlan {
        generation: u64,
        email: String,
        plan: DevelopmentPlan,
    },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// All session state in one explicit record. Owned by the engine; transitions
/// are pure functions over it.
#[derive(Debug, Clone)]
pub struct Session {
    pub step: Step,
    pub name: String,
    pub email: String,
    pub answers: AnswerSet,
    pub page_index: usize,
    pub result: Option<QuizResult>,
    pub plan: Option<DevelopmentPlan>,
    pub plan_loading: bool,
    pub plan_saving: bool,
    pub page_warning: Option<&'static str>,
    pub identify_error: Option<&'static str>,
    pub general_message: Option<&'static str>,
    pub plan_load_error: Option<&'static str>,
    pub plan_save_error: Option<&'static str>,
    /// Incremented on reset; guards against applying stale completions.
    pub generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            step: Step::Welcome,
            name: String::new(),
            email: String::new(),
            answers: AnswerSet::new(),
            page_index: 0,
            result: None,
            plan: None,
            plan_loading: false,
            plan_saving: false,
            page_warning: None,
            identify_error: None,
            general_message: None,
            plan_load_error: None,
            plan_save_error: None,
            generation: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<Identity> {
        if self.name.is_empty() || self.email.is_empty() {
            return None;
        }
        Some(Identity {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }

    fn reset(self) -> Self {
        Session {
            generation: self.generation + 1,
            ..Session::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Apply one intent. No I/O and no store calls happen here; requested side
/// effects come back as [`Effect`] descriptions for the engine to execute.
pub fn reduce(mut s: Session, intent: Intent, catalog: &Catalog) -> (Session, Vec<Effect>) {
    let mut effects = Vec::new();

    match intent {
        Intent::Reset => {
            s = s.reset();
        }

        Intent::StartQuiz => {
            if s.step == Step::Welcome {
                s.step = Step::IdentifyForQuiz;
                s.general_message = None;
                s.identify_error = None;
            }
        }

        Intent::StartDevelopment => {
            if s.step == Step::Welcome {
                s.step = Step::IdentifyForDevelopment;
                s.general_message = None;
                s.plan_load_error = None;
                s.identify_error = None;
            }
        }

        Intent::BackToWelcome => {
            if matches!(
                s.step,
                Step::IdentifyForQuiz | Step::IdentifyForDevelopment
            ) {
                s.step = Step::Welcome;
                s.identify_error = None;
            }
        }

        Intent::Identify { name, email } => {
            if s.step == Step::IdentifyForQuiz {
                match Identity::new(&name, &email) {
                    Err(GiftsError::EmptyName) => {
                        s.identify_error = Some(msg::INVALID_NAME);
                    }
                    Err(_) => {
                        s.identify_error = Some(msg::INVALID_EMAIL);
                    }
                    Ok(identity) => {
                        s.name = identity.name;
                        s.email = identity.email;
                        s.answers.clear();
                        s.result = None;
                        s.page_index = 0;
                        s.page_warning = None;
                        s.identify_error = None;
                        s.step = Step::Form;
                    }
                }
            }
        }

        Intent::Answer {
            question_id,
            rating,
        } => {
            if s.step == Step::Form {
                if catalog.question(question_id).is_none()
                    || s.answers.record(question_id, rating).is_err()
                {
                    s.page_warning = Some(msg::INVALID_ANSWER);
                } else {
                    s.page_warning = None;
                }
            }
        }

        Intent::NextPage => {
            if s.step == Step::Form {
                if !s.answers.page_complete(catalog, s.page_index) {
                    s.page_warning = Some(msg::ANSWER_PAGE);
                } else {
                    if s.page_index + 1 < catalog.total_pages() {
                        s.page_index += 1;
                    }
                    s.page_warning = None;
                }
            }
        }

        Intent::PrevPage => {
            if s.step == Step::Form && s.page_index > 0 {
                s.page_index -= 1;
                s.page_warning = None;
            }
        }

        Intent::Submit => {
            if s.step == Step::Form {
                if !s.answers.is_complete(catalog) {
                    s.page_warning = Some(msg::MISSING_ANSWERS);
                } else if !s.answers.page_complete(catalog, s.page_index) {
                    s.page_warning = Some(msg::ANSWER_PAGE);
                } else {
                    s.page_warning = None;
                    s.step = Step::Calculating;
                    effects.push(Effect::ComputeScores {
                        generation: s.generation,
                    });
                }
            }
        }

        Intent::ScoresReady {
            generation,
            top,
            all,
        } => {
            if generation == s.generation && s.step == Step::Calculating {
                // The result lives in session state before persistence is
                // attempted, so it renders even if the store is down.
                let result = QuizResult::new(s.name.clone(), s.email.clone(), top, all);
                s.result = Some(result.clone());
                s.step = Step::Saving;
                effects.push(Effect::PersistResult { generation, result });
            }
        }

        Intent::OpenDevelopmentGuide => {
            if s.step == Step::Results {
                if s.email.is_empty() || s.result.is_none() {
                    s.step = Step::IdentifyForDevelopment;
                    s.general_message = Some(msg::NEED_EMAIL_FOR_PLAN);
                } else {
                    s.step = Step::DevelopmentGuide;
                    s.plan_loading = true;
                    s.plan_load_error = None;
                    effects.push(Effect::LoadPlan {
                        generation: s.generation,
                        email: s.email.clone(),
                    });
                }
            }
        }

        Intent::IdentifyForPlan { email } => {
            if s.step == Step::IdentifyForDevelopment {
                let email = email.trim().to_string();
                if validate_email(&email).is_err() {
                    s.identify_error = Some(msg::INVALID_EMAIL);
                } else {
                    s.email = email.clone();
                    s.identify_error = None;
                    s.plan_loading = true;
                    s.plan_load_error = None;
                    effects.push(Effect::LookupResult {
                        generation: s.generation,
                        email,
                    });
                }
            }
        }

        Intent::EditPlan { field, value } => {
            if s.step == Step::DevelopmentGuide {
                s.plan
                    .get_or_insert_with(DevelopmentPlan::default)
                    .set(field, value);
            }
        }

        Intent::PatchPlanCategories(patch) => {
            if s.step == Step::DevelopmentGuide {
                s.plan
                    .get_or_insert_with(DevelopmentPlan::default)
                    .categories
                    .apply(patch);
            }
        }

        Intent::SavePlan => {
            if s.step == Step::DevelopmentGuide {
                // Saving requires a full identity: the email keys the store
                // and the name travels with the document.
                match (&s.plan, s.identity()) {
                    (Some(plan), Some(identity)) => {
                        let mut plan = plan.clone();
                        plan.user_name = identity.name;
                        plan.user_email = identity.email.clone();
                        s.plan_saving = true;
                        s.plan_save_error = None;
                        effects.push(Effect::SavePlan {
                            generation: s.generation,
                            email: identity.email,
                            plan,
                        });
                    }
                    _ => {
                        s.plan_save_error = Some(msg::NOTHING_TO_SAVE);
                    }
                }
            }
        }

        Intent::ShowResults => {
            if s.step == Step::DevelopmentGuide {
                if s.result.is_some() {
                    s.step = Step::Results;
                } else {
                    s.step = Step::IdentifyForQuiz;
                    s.general_message = Some(msg::NO_RESULTS_TO_SHOW);
                }
            }
        }

        Intent::StoreOutcome {
            generation,
            outcome,
        } => {
            if generation == s.generation {
                apply_store_outcome(&mut s, outcome, &mut effects);
            }
        }
    }

    (s, effects)
}

fn apply_store_outcome(s: &mut Session, outcome: StoreOutcome, effects: &mut Vec<Effect>) {
    match outcome {
        StoreOutcome::ResultPersisted(outcome) => {
            if s.step != Step::Saving {
                return;
            }
            if let Some(result) = s.result.as_mut() {
                match outcome {
                    Ok(id) => result.id = Some(id),
                    // Fail-open: the locally computed result is always shown.
                    Err(_) => result.save_error = Some(msg::RESULT_SAVE_FAILED.to_string()),
                }
            }
            s.step = Step::Results;
        }

        StoreOutcome::ResultLookup(outcome) => {
            if s.step != Step::IdentifyForDevelopment {
                return;
            }
            match outcome {
                Ok(Some(result)) => {
                    // Adopt the stored result and its name, then load the plan.
                    s.name = result.name.clone();
                    s.result = Some(result);
                    effects.push(Effect::LoadPlan {
                        generation: s.generation,
                        email: s.email.clone(),
                    });
                }
                Ok(None) => {
                    s.plan_loading = false;
                    s.plan = None;
                    s.plan_load_error = Some(msg::NO_PRIOR_RESULT);
                }
                Err(_) => {
                    s.plan_loading = false;
                    s.plan_load_error = Some(msg::LOAD_FAILED);
                }
            }
        }

        StoreOutcome::PlanLoaded(outcome) => {
            let seed = s
                .result
                .as_ref()
                .map(|r| DevelopmentPlan::seed_text(&r.top_gifts))
                .unwrap_or_default();
            s.plan_loading = false;
            match outcome {
                Ok(stored) => {
                    s.plan = Some(DevelopmentPlan::reconcile(stored, &seed));
                    s.step = Step::DevelopmentGuide;
                }
                Err(_) => {
                    s.plan_load_error = Some(msg::LOAD_FAILED);
                    if s.step == Step::DevelopmentGuide {
                        // Fail-open on the guide itself: show seeded defaults
                        // rather than a dead screen.
                        s.plan = Some(DevelopmentPlan::reconcile(None, &seed));
                    } else {
                        // Identification path: abort the pending transition.
                        s.plan = None;
                    }
                }
            }
        }

        StoreOutcome::PlanSaved(outcome) => {
            s.plan_saving = false;
            if outcome.is_err() {
                // Screen retained; retry stays available.
                s.plan_save_error = Some(msg::PLAN_SAVE_FAILED);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

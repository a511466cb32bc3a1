use crate::catalog::Catalog;
use crate::sanitize;
use crate::score;
use crate::session::{reduce, Effect, Intent, Session, StoreOutcome};
use crate::store::{PlanStore, ResultStore};
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Owns the session and the stores. Applies the reducer, executes the
/// requested effects, and feeds their completions back through the reducer
/// until the queue drains. One intent at a time; store calls are the only
/// suspension points.
pub struct Engine<R, P> {
    session: Session,
    catalog: Catalog,
    results: R,
    plans: P,
}

impl<R: ResultStore, P: PlanStore> Engine<R, P> {
    pub fn new(catalog: Catalog, results: R, plans: P) -> Self {
        Self {
            session: Session::new(),
            catalog,
            results,
            plans,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Process one user intent to quiescence.
    pub fn handle(&mut self, intent: Intent) {
        let mut queue = VecDeque::from([intent]);
        while let Some(intent) = queue.pop_front() {
            let session = std::mem::take(&mut self.session);
            let (session, effects) = reduce(session, intent, &self.catalog);
            self.session = session;
            for effect in effects {
                queue.push_back(self.execute(effect));
            }
        }
    }

    /// Execute one effect synchronously. Store failures are logged here with
    /// their raw payload and handed to the reducer as error strings; the
    /// reducer maps them to fixed user-facing messages.
    fn execute(&self, effect: Effect) -> Intent {
        match effect {
            Effect::ComputeScores { generation } => {
                let scores = score::score(&self.session.answers, &self.catalog);
                let (top, all) = score::rank(scores);
                Intent::ScoresReady {
                    generation,
                    top,
                    all,
                }
            }

            Effect::PersistResult { generation, result } => {
                let outcome = self.results.append(&result).map_err(|e| {
                    tracing::error!(email = %result.email, error = %e, "failed to persist result");
                    e.to_string()
                });
                Intent::StoreOutcome {
                    generation,
                    outcome: StoreOutcome::ResultPersisted(outcome),
                }
            }

            Effect::LookupResult { generation, email } => {
                let outcome = self.results.find_latest_by_email(&email).map_err(|e| {
                    tracing::error!(email = %email, error = %e, "result lookup failed");
                    e.to_string()
                });
                Intent::StoreOutcome {
                    generation,
                    outcome: StoreOutcome::ResultLookup(outcome),
                }
            }

            Effect::LoadPlan { generation, email } => {
                let key = sanitize::store_key(&email);
                let outcome = self.plans.get(&key).map_err(|e| {
                    tracing::error!(email = %email, key = %key, error = %e, "failed to load plan");
                    e.to_string()
                });
                Intent::StoreOutcome {
                    generation,
                    outcome: StoreOutcome::PlanLoaded(outcome),
                }
            }

            Effect::SavePlan {
                generation,
                email,
                plan,
            } => {
                let key = sanitize::store_key(&email);
                let outcome = self.plans.upsert(&key, &plan).map_err(|e| {
                    tracing::error!(email = %email, key = %key, error = %e, "failed to save plan");
                    e.to_string()
                });
                Intent::StoreOutcome {
                    generation,
                    outcome: StoreOutcome::PlanSaved(outcome),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

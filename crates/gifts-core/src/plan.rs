use crate::error::GiftsError;
use crate::score::GiftScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in the primary-gifts field when a ranked gift has no name.
pub const UNKNOWN_GIFT_PLACEHOLDER: &str = "(unknown gift)";
/// Shown when no ranked gifts are available at all.
pub const TOP_GIFTS_UNAVAILABLE: &str = "(top gifts unavailable)";

// ---------------------------------------------------------------------------
// PlanCategories
// ---------------------------------------------------------------------------

/// Step 2: how the user classifies their gifts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCategories {
    #[serde(default)]
    pub numeric: bool,
    #[serde(default)]
    pub maturity: bool,
    #[serde(default)]
    pub organic: bool,
}

/// A partial edit of the category flags; only the flags present are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCategoryPatch {
    pub numeric: Option<bool>,
    pub maturity: Option<bool>,
    pub organic: Option<bool>,
}

impl PlanCategories {
    pub fn apply(&mut self, patch: PlanCategoryPatch) {
        if let Some(v) = patch.numeric {
            self.numeric = v;
        }
        if let Some(v) = patch.maturity {
            self.maturity = v;
        }
        if let Some(v) = patch.organic {
            self.organic = v;
        }
    }
}

// ---------------------------------------------------------------------------
// DevelopmentPlan
// ---------------------------------------------------------------------------

/// The long-form follow-on worksheet, keyed 1:1 by identity. Twelve
/// conceptual steps flattened into one document. Every field carries
/// `serde(default)` so documents saved under an older schema still load;
/// reconciliation with defaults is then explicit (see [`DevelopmentPlan::reconcile`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
    // Step 1: identify the gifts.
    #[serde(default)]
    pub primary_gifts: String,
    #[serde(default)]
    pub secondary_gifts: String,

    // Step 2: classify them.
    #[serde(default)]
    pub categories: PlanCategories,

    // Step 3: define functions.
    #[serde(default)]
    pub functions_in_community: String,
    #[serde(default)]
    pub new_ministries_to_start: String,

    // Step 4: chosen ministries.
    #[serde(default)]
    pub chosen_ministries: String,

    // Step 5: barriers.
    #[serde(default)]
    pub potential_barriers: String,
    #[serde(default)]
    pub ministry_impact: String,

    // Step 6: theory and study.
    #[serde(default)]
    pub study_and_learning_plan: String,

    // Step 7: resources.
    #[serde(default)]
    pub current_resources: String,
    #[serde(default)]
    pub needed_resources: String,

    // Step 8: helpers.
    #[serde(default)]
    pub helper_skills_needed: String,
    #[serde(default)]
    pub helper_training_plan: String,

    // Step 9: support groups.
    #[serde(default)]
    pub support_group_temperament: String,
    #[serde(default)]
    pub support_group_resources: String,

    // Step 10: base of operations.
    #[serde(default)]
    pub base_of_operations: String,

    // Step 11: action plan.
    #[serde(default)]
    pub action_plan_details: String,

    // Step 12: timeline.
    #[serde(default)]
    pub timeline_3_months: String,
    #[serde(default)]
    pub timeline_1_year: String,
    #[serde(default)]
    pub timeline_long_term: String,

    // Bookkeeping.
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    /// Assigned by the store on every upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl DevelopmentPlan {
    /// Comma-joined names of the ranked top gifts, used to seed step 1.
    pub fn seed_text(top_gifts: &[GiftScore]) -> String {
        if top_gifts.is_empty() {
            return TOP_GIFTS_UNAVAILABLE.to_string();
        }
        top_gifts
            .iter()
            .map(|s| {
                if s.gift.name.is_empty() {
                    UNKNOWN_GIFT_PLACEHOLDER
                } else {
                    s.gift.name.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reconcile a stored plan with defaults and the current top-gift text.
    ///
    /// No stored plan: defaults seeded with `seed_text`. Stored plan: stored
    /// values win (fields the stored document lacked already took defaults at
    /// deserialization time), except an empty `primary_gifts` falls back to
    /// `seed_text` so the field never shows a stale empty string.
    pub fn reconcile(stored: Option<DevelopmentPlan>, seed_text: &str) -> DevelopmentPlan {
        match stored {
            None => DevelopmentPlan {
                primary_gifts: seed_text.to_string(),
                ..DevelopmentPlan::default()
            },
            Some(mut plan) => {
                if plan.primary_gifts.is_empty() {
                    plan.primary_gifts = seed_text.to_string();
                }
                plan
            }
        }
    }

    /// Replace exactly one free-text field.
    pub fn set(&mut self, field: PlanField, value: impl Into<String>) {
        let value = value.into();
        *self.field_mut(field) = value;
    }

    pub fn get(&self, field: PlanField) -> &str {
        match field {
            PlanField::PrimaryGifts => &self.primary_gifts,
            PlanField::SecondaryGifts => &self.secondary_gifts,
            PlanField::FunctionsInCommunity => &self.functions_in_community,
            PlanField::NewMinistriesToStart => &self.new_ministries_to_start,
            PlanField::ChosenMinistries => &self.chosen_ministries,
            PlanField::PotentialBarriers => &self.potential_barriers,
            PlanField::MinistryImpact => &self.ministry_impact,
            PlanField::StudyAndLearningPlan => &self.study_and_learning_plan,
            PlanField::CurrentResources => &self.current_resources,
            PlanField::NeededResources => &self.needed_resources,
            PlanField::HelperSkillsNeeded => &self.helper_skills_needed,
            PlanField::HelperTrainingPlan => &self.helper_training_plan,
            PlanField::SupportGroupTemperament => &self.support_group_temperament,
            PlanField::SupportGroupResources => &self.support_group_resources,
            PlanField::BaseOfOperations => &self.base_of_operations,
            PlanField::ActionPlanDetails => &self.action_plan_details,
            PlanField::Timeline3Months => &self.timeline_3_months,
            PlanField::Timeline1Year => &self.timeline_1_year,
            PlanField::TimelineLongTerm => &self.timeline_long_term,
        }
    }

    fn field_mut(&mut self, field: PlanField) -> &mut String {
        match field {
            PlanField::PrimaryGifts => &mut self.primary_gifts,
            PlanField::SecondaryGifts => &mut self.secondary_gifts,
            PlanField::FunctionsInCommunity => &mut self.functions_in_community,
            PlanField::NewMinistriesToStart => &mut self.new_ministries_to_start,
            PlanField::ChosenMinistries => &mut self.chosen_ministries,
            PlanField::PotentialBarriers => &mut self.potential_barriers,
            PlanField::MinistryImpact => &mut self.ministry_impact,
            PlanField::StudyAndLearningPlan => &mut self.study_and_learning_plan,
            PlanField::CurrentResources => &mut self.current_resources,
            PlanField::NeededResources => &mut self.needed_resources,
            PlanField::HelperSkillsNeeded => &mut self.helper_skills_needed,
            PlanField::HelperTrainingPlan => &mut self.helper_training_plan,
            PlanField::SupportGroupTemperament => &mut self.support_group_temperament,
            PlanField::SupportGroupResources => &mut self.support_group_resources,
            PlanField::BaseOfOperations => &mut self.base_of_operations,
            PlanField::ActionPlanDetails => &mut self.action_plan_details,
            PlanField::Timeline3Months => &mut self.timeline_3_months,
            PlanField::Timeline1Year => &mut self.timeline_1_year,
            PlanField::TimelineLongTerm => &mut self.timeline_long_term,
        }
    }
}

// ---------------------------------------------------------------------------
// PlanField
// ---------------------------------------------------------------------------

/// Addressable free-text fields of the plan (the category flags are edited
/// through [`PlanCategoryPatch`] instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanField {
    PrimaryGifts,
    SecondaryGifts,
    FunctionsInCommunity,
    NewMinistriesToStart,
    ChosenMinistries,
    PotentialBarriers,
    MinistryImpact,
    StudyAndLearningPlan,
    CurrentResources,
    NeededResources,
    HelperSkillsNeeded,
    HelperTrainingPlan,
    SupportGroupTemperament,
    SupportGroupResources,
    BaseOfOperations,
    ActionPlanDetails,
    Timeline3Months,
    Timeline1Year,
    TimelineLongTerm,
}

impl PlanField {
    pub fn all() -> &'static [PlanField] {
        &[
            PlanField::PrimaryGifts,
            PlanField::SecondaryGifts,
            PlanField::FunctionsInCommunity,
            PlanField::NewMinistriesToStart,
            PlanField::ChosenMinistries,
            PlanField::PotentialBarriers,
            PlanField::MinistryImpact,
            PlanField::StudyAndLearningPlan,
            PlanField::CurrentResources,
            PlanField::NeededResources,
            PlanField::HelperSkillsNeeded,
            PlanField::HelperTrainingPlan,
            PlanField::SupportGroupTemperament,
            PlanField::SupportGroupResources,
            PlanField::BaseOfOperations,
            PlanField::ActionPlanDetails,
            PlanField::Timeline3Months,
            PlanField::Timeline1Year,
            PlanField::TimelineLongTerm,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanField::PrimaryGifts => "primary_gifts",
            PlanField::SecondaryGifts => "secondary_gifts",
            PlanField::FunctionsInCommunity => "functions_in_community",
            PlanField::NewMinistriesToStart => "new_ministries_to_start",
            PlanField::ChosenMinistries => "chosen_ministries",
            PlanField::PotentialBarriers => "potential_barriers",
            PlanField::MinistryImpact => "ministry_impact",
            PlanField::StudyAndLearningPlan => "study_and_learning_plan",
            PlanField::CurrentResources => "current_resources",
            PlanField::NeededResources => "needed_resources",
            PlanField::HelperSkillsNeeded => "helper_skills_needed",
            PlanField::HelperTrainingPlan => "helper_training_plan",
            PlanField::SupportGroupTemperament => "support_group_temperament",
            PlanField::SupportGroupResources => "support_group_resources",
            PlanField::BaseOfOperations => "base_of_operations",
            PlanField::ActionPlanDetails => "action_plan_details",
            PlanField::Timeline3Months => "timeline_3_months",
            PlanField::Timeline1Year => "timeline_1_year",
            PlanField::TimelineLongTerm => "timeline_long_term",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanField {
    type Err = GiftsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanField::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| GiftsError::UnknownPlanField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

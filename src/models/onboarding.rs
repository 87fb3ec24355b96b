//! Onboarding wizard data
//!
//! The wizard collects a learner profile across five linear steps:
//! 1. plan selection
//! 2. personal info
//! 3. interests and goals
//! 4. skill self-assessment
//! 5. review and submit

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// First wizard step
pub const FIRST_STEP: u8 = 1;
/// Terminal wizard step (review/submit)
pub const LAST_STEP: u8 = 5;

/// Clamp any step number into `FIRST_STEP..=LAST_STEP`
pub fn clamp_step(step: i64) -> u8 {
    // Clamped into 1..=5, so the narrowing cast is lossless.
    step.clamp(i64::from(FIRST_STEP), i64::from(LAST_STEP)) as u8
}

/// Whether `step` names a wizard step
pub fn is_valid_step(step: i64) -> bool {
    (i64::from(FIRST_STEP)..=i64::from(LAST_STEP)).contains(&step)
}

/// Named wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OnboardingStep {
    Plan = 1,
    PersonalInfo = 2,
    Interests = 3,
    SkillAssessment = 4,
    Review = 5,
}

impl OnboardingStep {
    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(OnboardingStep::Plan),
            2 => Some(OnboardingStep::PersonalInfo),
            3 => Some(OnboardingStep::Interests),
            4 => Some(OnboardingStep::SkillAssessment),
            5 => Some(OnboardingStep::Review),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            OnboardingStep::Plan => "Choose a plan",
            OnboardingStep::PersonalInfo => "Personal info",
            OnboardingStep::Interests => "Interests & goals",
            OnboardingStep::SkillAssessment => "Skill assessment",
            OnboardingStep::Review => "Review",
        }
    }
}

/// Self-assessed skill in a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Partially-completed profile data accumulated by the wizard.
///
/// Every field is optional until the step that owns it is validated. The same
/// type doubles as the patch passed to `update_data`: `None` fields in a patch
/// leave the accumulated value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_study_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_levels: Option<BTreeMap<String, SkillLevel>>,
}

impl OnboardingData {
    /// Overlay every field set in `patch`; unset fields keep their value
    pub fn merge(&mut self, patch: OnboardingData) {
        self.plan = patch.plan.or(self.plan.take());
        self.age = patch.age.or(self.age);
        self.grade = patch.grade.or(self.grade.take());
        self.timezone = patch.timezone.or(self.timezone.take());
        self.subjects = patch.subjects.or(self.subjects.take());
        self.learning_goals = patch.learning_goals.or(self.learning_goals.take());
        self.weekly_study_hours = patch.weekly_study_hours.or(self.weekly_study_hours);
        self.skill_levels = patch.skill_levels.or(self.skill_levels.take());
    }

    pub fn is_empty(&self) -> bool {
        *self == OnboardingData::default()
    }
}

/// Wizard slice: cursor, accumulated data and completed steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    /// Current step, always within `FIRST_STEP..=LAST_STEP`
    #[serde(default = "default_step", deserialize_with = "deserialize_step")]
    pub step: u8,

    #[serde(default)]
    pub data: OnboardingData,

    #[serde(default, deserialize_with = "deserialize_completed_steps")]
    pub completed_steps: BTreeSet<u8>,
}

fn default_step() -> u8 {
    FIRST_STEP
}

/// Persisted cursors outside the wizard are pulled back into range
fn deserialize_step<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let step = i64::deserialize(deserializer)?;
    Ok(clamp_step(step))
}

/// Persisted completion marks for steps that do not exist are dropped
fn deserialize_completed_steps<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeSet<u8>, D::Error> {
    let steps = Vec::<i64>::deserialize(deserializer)?;
    Ok(steps
        .into_iter()
        .filter(|&step| is_valid_step(step))
        .map(clamp_step)
        .collect())
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            data: OnboardingData::default(),
            completed_steps: BTreeSet::new(),
        }
    }
}

impl OnboardingState {
    pub fn current_step(&self) -> Option<OnboardingStep> {
        OnboardingStep::from_number(self.step)
    }

    pub fn is_step_complete(&self, step: u8) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }
}

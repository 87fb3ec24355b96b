//! Onboarding service - Turns finished wizard data into a student profile

use crate::models::onboarding::LAST_STEP;
use crate::models::{OnboardingData, StudentProfile};
use crate::state::{OnboardingStore, StudentStore};
use crate::storage::StorageError;
use crate::validator::{first_incomplete_step, validate_step, FieldError};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Account details collected at sign-up, outside the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Onboarding is incomplete at step {step}: {}", format_errors(.errors))]
    Incomplete { step: u8, errors: Vec<FieldError> },

    #[error("Failed to save state: {0}")]
    Storage(#[from] StorageError),
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a profile from wizard data. Fails if any step is still invalid.
pub fn build_profile(
    data: &OnboardingData,
    account: &AccountInfo,
    now: DateTime<Utc>,
) -> Result<StudentProfile, OnboardingError> {
    let errors = validate_step(LAST_STEP, data);
    if !errors.is_empty() {
        let step = first_incomplete_step(data).unwrap_or(LAST_STEP);
        let errors = errors.into_iter().filter(|e| e.step == step).collect();
        return Err(OnboardingError::Incomplete { step, errors });
    }

    let data = data.clone();
    Ok(StudentProfile {
        id: Uuid::new_v4().to_string(),
        name: account.name.clone(),
        email: account.email.clone(),
        plan: data.plan.unwrap_or_default(),
        age: data.age,
        grade: data.grade,
        timezone: data.timezone,
        subjects: data.subjects.unwrap_or_default(),
        learning_goals: data.learning_goals.unwrap_or_default(),
        weekly_study_hours: data.weekly_study_hours,
        skill_levels: data.skill_levels.unwrap_or_default(),
        created_at: now,
        last_profile_update: None,
    })
}

/// Finish onboarding: hand the profile to the student store and reset the wizard.
///
/// Nothing is changed when validation fails.
pub fn complete_onboarding(
    onboarding: &mut OnboardingStore,
    student: &mut StudentStore,
    account: &AccountInfo,
) -> Result<StudentProfile, OnboardingError> {
    let profile = build_profile(&onboarding.state().data, account, student.now())?;

    student.set_profile(profile.clone())?;
    onboarding.reset_data()?;

    info!(student_id = %profile.id, plan = %profile.plan, "onboarding completed");
    Ok(profile)
}

//! Step validation for the onboarding wizard
//!
//! The onboarding store accepts any data. These checks are what the host UI
//! runs before letting the learner continue to the next step.

use crate::models::onboarding::{FIRST_STEP, LAST_STEP};
use crate::models::{OnboardingData, OnboardingStep};
use serde::Serialize;
use std::fmt;

/// Accepted learner age range
pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 100;

/// Accepted weekly study commitment, in hours
pub const MIN_WEEKLY_HOURS: u32 = 1;
pub const MAX_WEEKLY_HOURS: u32 = 40;

/// A field that blocks progress on a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Step that owns the field
    pub step: u8,
    /// Field name as stored in onboarding data
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(step: OnboardingStep, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            step: step.number(),
            field,
            message: message.into(),
        }
    }

    /// Format error for display
    pub fn format(&self) -> String {
        format!("[step {}] {}: {}", self.step, self.field, self.message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn has_entries(values: &Option<Vec<String>>) -> bool {
    values
        .as_ref()
        .map_or(false, |v| v.iter().any(|s| !s.trim().is_empty()))
}

fn validate_plan(data: &OnboardingData, errors: &mut Vec<FieldError>) {
    if is_blank(&data.plan) {
        errors.push(FieldError::new(OnboardingStep::Plan, "plan", "Please choose a plan"));
    }
}

fn validate_personal_info(data: &OnboardingData, errors: &mut Vec<FieldError>) {
    let step = OnboardingStep::PersonalInfo;

    match data.age {
        None => errors.push(FieldError::new(step, "age", "Age is required")),
        Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => errors.push(FieldError::new(
            step,
            "age",
            format!("Age must be between {} and {}", MIN_AGE, MAX_AGE),
        )),
        Some(_) => {}
    }

    if is_blank(&data.grade) {
        errors.push(FieldError::new(step, "grade", "Grade is required"));
    }

    if is_blank(&data.timezone) {
        errors.push(FieldError::new(step, "timezone", "Timezone is required"));
    }
}

fn validate_interests(data: &OnboardingData, errors: &mut Vec<FieldError>) {
    let step = OnboardingStep::Interests;

    if !has_entries(&data.subjects) {
        errors.push(FieldError::new(step, "subjects", "Select at least one subject"));
    }

    if !has_entries(&data.learning_goals) {
        errors.push(FieldError::new(
            step,
            "learningGoals",
            "Add at least one learning goal",
        ));
    }

    match data.weekly_study_hours {
        None => errors.push(FieldError::new(
            step,
            "weeklyStudyHours",
            "Weekly study hours are required",
        )),
        Some(hours) if !(MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&hours) => {
            errors.push(FieldError::new(
                step,
                "weeklyStudyHours",
                format!(
                    "Weekly study hours must be between {} and {}",
                    MIN_WEEKLY_HOURS, MAX_WEEKLY_HOURS
                ),
            ))
        }
        Some(_) => {}
    }
}

fn validate_skills(data: &OnboardingData, errors: &mut Vec<FieldError>) {
    let subjects = data.subjects.as_deref().unwrap_or_default();
    let levels = data.skill_levels.as_ref();

    for subject in subjects.iter().filter(|s| !s.trim().is_empty()) {
        if !levels.map_or(false, |l| l.contains_key(subject)) {
            errors.push(FieldError::new(
                OnboardingStep::SkillAssessment,
                "skillLevels",
                format!("Rate your skill in {}", subject),
            ));
        }
    }
}

/// Validate the fields owned by `step`.
///
/// The review step re-validates everything before it. Steps outside the
/// wizard's range have nothing to validate.
pub fn validate_step(step: u8, data: &OnboardingData) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match OnboardingStep::from_number(step) {
        Some(OnboardingStep::Plan) => validate_plan(data, &mut errors),
        Some(OnboardingStep::PersonalInfo) => validate_personal_info(data, &mut errors),
        Some(OnboardingStep::Interests) => validate_interests(data, &mut errors),
        Some(OnboardingStep::SkillAssessment) => validate_skills(data, &mut errors),
        Some(OnboardingStep::Review) => {
            validate_plan(data, &mut errors);
            validate_personal_info(data, &mut errors);
            validate_interests(data, &mut errors);
            validate_skills(data, &mut errors);
        }
        None => {}
    }

    errors
}

/// Whether the learner may continue past `step`
pub fn can_continue(step: u8, data: &OnboardingData) -> bool {
    validate_step(step, data).is_empty()
}

/// First step (in wizard order) whose fields are not valid yet
pub fn first_incomplete_step(data: &OnboardingData) -> Option<u8> {
    (FIRST_STEP..LAST_STEP).find(|&step| !can_continue(step, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;
    use std::collections::BTreeMap;

    fn complete_data() -> OnboardingData {
        OnboardingData {
            plan: Some("standard".into()),
            age: Some(16),
            grade: Some("10th Grade".into()),
            timezone: Some("Europe/London".into()),
            subjects: Some(vec!["math".into(), "physics".into()]),
            learning_goals: Some(vec!["Improve grades".into()]),
            weekly_study_hours: Some(6),
            skill_levels: Some(BTreeMap::from([
                ("math".to_string(), SkillLevel::Intermediate),
                ("physics".to_string(), SkillLevel::Beginner),
            ])),
        }
    }

    #[test]
    fn test_complete_data_passes_every_step() {
        let data = complete_data();
        for step in 1..=5 {
            assert!(can_continue(step, &data), "step {}", step);
        }
        assert_eq!(first_incomplete_step(&data), None);
    }

    #[test]
    fn test_empty_data_fails_at_plan() {
        let data = OnboardingData::default();
        let errors = validate_step(1, &data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "plan");
        assert_eq!(first_incomplete_step(&data), Some(1));
    }

    #[test]
    fn test_blank_plan_rejected() {
        let data = OnboardingData {
            plan: Some("   ".into()),
            ..complete_data()
        };
        assert!(!can_continue(1, &data));
    }

    #[test]
    fn test_age_range() {
        let young = OnboardingData {
            age: Some(4),
            ..complete_data()
        };
        let errors = validate_step(2, &young);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");

        let edge = OnboardingData {
            age: Some(MIN_AGE),
            ..complete_data()
        };
        assert!(can_continue(2, &edge));
    }

    #[test]
    fn test_interests_require_subjects_goals_and_hours() {
        let data = OnboardingData {
            subjects: Some(vec![]),
            learning_goals: None,
            weekly_study_hours: Some(0),
            ..complete_data()
        };
        let fields: Vec<_> = validate_step(3, &data).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["subjects", "learningGoals", "weeklyStudyHours"]);
    }

    #[test]
    fn test_skills_needed_for_each_subject() {
        let mut data = complete_data();
        data.skill_levels
            .as_mut()
            .unwrap()
            .remove("physics");

        let errors = validate_step(4, &data);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("physics"));
        assert_eq!(first_incomplete_step(&data), Some(4));
    }

    #[test]
    fn test_review_collects_all_errors() {
        let errors = validate_step(5, &OnboardingData::default());
        let steps: std::collections::BTreeSet<u8> = errors.iter().map(|e| e.step).collect();
        assert_eq!(steps, std::collections::BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_out_of_range_step_has_no_rules() {
        assert!(validate_step(0, &OnboardingData::default()).is_empty());
        assert!(validate_step(6, &OnboardingData::default()).is_empty());
    }

    #[test]
    fn test_error_format() {
        let error = &validate_step(1, &OnboardingData::default())[0];
        assert_eq!(error.to_string(), "[step 1] plan: Please choose a plan");
    }
}

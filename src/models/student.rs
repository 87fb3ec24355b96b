//! Student profile and session data

use super::SkillLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authenticated learner profile, created once onboarding completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_study_hours: Option<u32>,
    #[serde(default)]
    pub skill_levels: BTreeMap<String, SkillLevel>,
    pub created_at: DateTime<Utc>,
    /// Last time the learner edited the profile; drives the edit cooldown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_profile_update: Option<DateTime<Utc>>,
}

/// Shallow patch applied by `update_profile`
///
/// System fields (`id`, `created_at`, `last_profile_update`) are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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

impl StudentProfile {
    /// Overlay the fields set in `patch`
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(plan) = patch.plan {
            self.plan = plan;
        }
        if let Some(subjects) = patch.subjects {
            self.subjects = subjects;
        }
        if let Some(goals) = patch.learning_goals {
            self.learning_goals = goals;
        }
        if let Some(levels) = patch.skill_levels {
            self.skill_levels = levels;
        }
        self.age = patch.age.or(self.age);
        self.grade = patch.grade.or(self.grade.take());
        self.timezone = patch.timezone.or(self.timezone.take());
        self.weekly_study_hours = patch.weekly_study_hours.or(self.weekly_study_hours);
    }
}

/// Homework assigned to the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkItem {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

/// A booked tutoring session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutoringSession {
    pub id: String,
    pub tutor_name: String,
    pub subject: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Student slice: profile, authentication flag and learner-owned lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentState {
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub homework: Vec<HomeworkItem>,
    #[serde(default)]
    pub sessions: Vec<TutoringSession>,
    /// Content ids, insertion-ordered, no duplicates
    #[serde(default)]
    pub favourite_content: Vec<String>,
}

impl StudentState {
    pub fn is_favourite(&self, content_id: &str) -> bool {
        self.favourite_content.iter().any(|id| id == content_id)
    }

    pub fn pending_homework(&self) -> impl Iterator<Item = &HomeworkItem> {
        self.homework.iter().filter(|h| !h.completed)
    }
}

//! Lesson and quiz progress records

use super::MasteryLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Progress on a single lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson_id: String,
    pub mastery_level: MasteryLevel,
    /// Set once the lesson is marked complete; never reverts on its own
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

impl LessonProgress {
    pub fn new(lesson_id: impl Into<String>, mastery_level: MasteryLevel) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            mastery_level,
            completed: false,
            last_attempt_date: None,
            score: None,
        }
    }
}

/// Result of the latest attempt at a quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProgress {
    pub quiz_id: String,
    #[serde(default)]
    pub completed: bool,
    pub score: i32,
    pub mastery_level: MasteryLevel,
}

impl QuizProgress {
    /// Record a scored attempt; mastery follows the score thresholds
    pub fn scored(quiz_id: impl Into<String>, score: i32) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            completed: true,
            score,
            mastery_level: MasteryLevel::from_score(score),
        }
    }
}

/// Full progress slice: mastery records, XP and badges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Lesson records keyed by lesson id
    #[serde(default)]
    pub progress: BTreeMap<String, LessonProgress>,

    /// Quiz records keyed by quiz id
    #[serde(default)]
    pub quizzes: BTreeMap<String, QuizProgress>,

    /// Experience points; signed because corrections may overshoot zero
    #[serde(default)]
    pub xp: i64,

    #[serde(default)]
    pub badges: BTreeSet<String>,
}

impl ProgressState {
    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.progress.get(lesson_id)
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<&QuizProgress> {
        self.quizzes.get(quiz_id)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.contains(badge_id)
    }

    pub fn completed_lesson_count(&self) -> usize {
        self.progress.values().filter(|p| p.completed).count()
    }

    pub fn completed_quiz_count(&self) -> usize {
        self.quizzes.values().filter(|q| q.completed).count()
    }

    /// Number of lesson and quiz records at each mastery level.
    ///
    /// Every level is present in the result, with zero when unused.
    pub fn mastery_breakdown(&self) -> BTreeMap<MasteryLevel, usize> {
        let mut by_level: BTreeMap<MasteryLevel, usize> =
            MasteryLevel::ALL.into_iter().map(|level| (level, 0)).collect();

        let levels = self
            .progress
            .values()
            .map(|p| p.mastery_level)
            .chain(self.quizzes.values().map(|q| q.mastery_level));

        for level in levels {
            *by_level.entry(level).or_insert(0) += 1;
        }

        by_level
    }
}

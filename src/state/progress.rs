//! Progress reducer: lesson/quiz mastery, XP and badges

use super::{Reducer, Store};
use crate::models::{LessonProgress, MasteryLevel, ProgressState, QuizProgress};
use crate::storage::{StorageResult, PROGRESS_KEY};
use chrono::{DateTime, Utc};
use tracing::info;

/// XP granted every time a lesson is marked complete
pub const LESSON_COMPLETE_XP: i64 = 10;

/// Multiplier applied to quiz XP; reserved for per-quiz difficulty
pub const QUIZ_DIFFICULTY_MULTIPLIER: i64 = 1;

/// XP earned for a quiz score: `floor(score / 10)`, also for negative scores
pub fn quiz_xp(score: i32) -> i64 {
    i64::from(score).div_euclid(10) * QUIZ_DIFFICULTY_MULTIPLIER
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressAction {
    MarkLessonComplete { lesson_id: String },
    UpdateQuizProgress { quiz_id: String, score: i32 },
    UpdateMasteryLevel { item_id: String, level: MasteryLevel },
    AwardBadge { badge_id: String },
    AddXp { amount: i64 },
    ResetProgress,
}

impl Reducer for ProgressState {
    type Action = ProgressAction;
    const STORAGE_KEY: &'static str = PROGRESS_KEY;

    fn reduce(&self, action: ProgressAction, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();

        match action {
            ProgressAction::MarkLessonComplete { lesson_id } => {
                let record = next
                    .progress
                    .entry(lesson_id.clone())
                    .or_insert_with(|| LessonProgress::new(lesson_id, MasteryLevel::Familiar));
                record.completed = true;
                record.last_attempt_date = Some(now);
                // Granted on every call, including repeats.
                next.xp = next.xp.saturating_add(LESSON_COMPLETE_XP);
            }

            ProgressAction::UpdateQuizProgress { quiz_id, score } => {
                next.quizzes
                    .insert(quiz_id.clone(), QuizProgress::scored(quiz_id, score));
                next.xp = next.xp.saturating_add(quiz_xp(score));
            }

            ProgressAction::UpdateMasteryLevel { item_id, level } => {
                // Lessons win over quizzes sharing the same id.
                if let Some(lesson) = next.progress.get_mut(&item_id) {
                    lesson.mastery_level = level;
                } else if let Some(quiz) = next.quizzes.get_mut(&item_id) {
                    quiz.mastery_level = level;
                }
            }

            ProgressAction::AwardBadge { badge_id } => {
                next.badges.insert(badge_id);
            }

            ProgressAction::AddXp { amount } => {
                next.xp = next.xp.saturating_add(amount);
            }

            ProgressAction::ResetProgress => {
                next = ProgressState::default();
            }
        }

        next
    }
}

pub type ProgressStore = Store<ProgressState>;

impl Store<ProgressState> {
    /// Mark a lesson complete and grant [`LESSON_COMPLETE_XP`]
    pub fn mark_lesson_complete(&mut self, lesson_id: impl Into<String>) -> StorageResult<()> {
        self.dispatch(ProgressAction::MarkLessonComplete {
            lesson_id: lesson_id.into(),
        })
    }

    /// Record a quiz score; mastery and XP follow from the score
    pub fn update_quiz_progress(&mut self, quiz_id: impl Into<String>, score: i32) -> StorageResult<()> {
        self.dispatch(ProgressAction::UpdateQuizProgress {
            quiz_id: quiz_id.into(),
            score,
        })
    }

    /// Override the mastery level of an existing lesson or quiz record
    pub fn update_mastery_level(
        &mut self,
        item_id: impl Into<String>,
        level: MasteryLevel,
    ) -> StorageResult<()> {
        self.dispatch(ProgressAction::UpdateMasteryLevel {
            item_id: item_id.into(),
            level,
        })
    }

    pub fn award_badge(&mut self, badge_id: impl Into<String>) -> StorageResult<()> {
        self.dispatch(ProgressAction::AwardBadge {
            badge_id: badge_id.into(),
        })
    }

    /// Add (or with a negative amount, subtract) XP. No floor is applied.
    pub fn add_xp(&mut self, amount: i64) -> StorageResult<()> {
        self.dispatch(ProgressAction::AddXp { amount })
    }

    pub fn reset_progress(&mut self) -> StorageResult<()> {
        info!("resetting learning progress");
        self.dispatch(ProgressAction::ResetProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 15, 30, 0).unwrap()
    }

    fn apply(state: ProgressState, actions: Vec<ProgressAction>) -> ProgressState {
        actions
            .into_iter()
            .fold(state, |s, action| s.reduce(action, now()))
    }

    fn complete(id: &str) -> ProgressAction {
        ProgressAction::MarkLessonComplete {
            lesson_id: id.to_string(),
        }
    }

    fn quiz(id: &str, score: i32) -> ProgressAction {
        ProgressAction::UpdateQuizProgress {
            quiz_id: id.to_string(),
            score,
        }
    }

    #[test]
    fn test_mark_new_lesson_complete() {
        let state = apply(ProgressState::default(), vec![complete("algebra-1")]);

        let lesson = state.lesson("algebra-1").unwrap();
        assert!(lesson.completed);
        assert_eq!(lesson.mastery_level, MasteryLevel::Familiar);
        assert_eq!(lesson.last_attempt_date, Some(now()));
        assert_eq!(state.xp, 10);
    }

    #[test]
    fn test_mark_existing_lesson_keeps_mastery() {
        let mut state = ProgressState::default();
        let mut record = LessonProgress::new("l1", MasteryLevel::Mastered);
        record.score = Some(97);
        record.last_attempt_date = Some(now() - Duration::days(3));
        state.progress.insert("l1".into(), record);

        let state = apply(state, vec![complete("l1")]);

        let lesson = state.lesson("l1").unwrap();
        assert!(lesson.completed);
        assert_eq!(lesson.mastery_level, MasteryLevel::Mastered);
        assert_eq!(lesson.score, Some(97));
        assert_eq!(lesson.last_attempt_date, Some(now()));
    }

    #[test]
    fn test_mark_lesson_complete_twice_grants_xp_twice() {
        let state = apply(ProgressState::default(), vec![complete("l1"), complete("l1")]);
        assert_eq!(state.xp, 20);
        assert_eq!(state.progress.len(), 1);
    }

    #[test]
    fn test_quiz_thresholds_and_xp() {
        let cases = [
            (100, MasteryLevel::Mastered, 10),
            (90, MasteryLevel::Mastered, 9),
            (89, MasteryLevel::Proficient, 8),
            (75, MasteryLevel::Proficient, 7),
            (74, MasteryLevel::Familiar, 7),
            (60, MasteryLevel::Familiar, 6),
            (59, MasteryLevel::Attempted, 5),
            (9, MasteryLevel::Attempted, 0),
            (0, MasteryLevel::Attempted, 0),
        ];

        for (score, level, xp) in cases {
            let state = apply(ProgressState::default(), vec![quiz("q", score)]);
            let record = state.quiz("q").unwrap();
            assert_eq!(record.mastery_level, level, "score {}", score);
            assert!(record.completed);
            assert_eq!(state.xp, xp, "score {}", score);
        }
    }

    #[test]
    fn test_quiz_scores_are_not_validated() {
        let state = apply(ProgressState::default(), vec![quiz("q", 130)]);
        assert_eq!(state.quiz("q").unwrap().mastery_level, MasteryLevel::Mastered);
        assert_eq!(state.xp, 13);

        let state = apply(ProgressState::default(), vec![quiz("q", -5)]);
        assert_eq!(state.quiz("q").unwrap().mastery_level, MasteryLevel::Attempted);
        assert_eq!(state.xp, -1);
    }

    #[test]
    fn test_quiz_retake_replaces_record() {
        let state = apply(
            ProgressState::default(),
            vec![quiz("q1", 50), quiz("q1", 95)],
        );
        let record = state.quiz("q1").unwrap();
        assert_eq!(record.score, 95);
        assert_eq!(record.mastery_level, MasteryLevel::Mastered);
        assert_eq!(state.xp, 5 + 9);
    }

    #[test]
    fn test_update_mastery_prefers_lesson() {
        let state = apply(
            ProgressState::default(),
            vec![
                complete("shared"),
                quiz("shared", 40),
                ProgressAction::UpdateMasteryLevel {
                    item_id: "shared".into(),
                    level: MasteryLevel::Proficient,
                },
            ],
        );

        assert_eq!(
            state.lesson("shared").unwrap().mastery_level,
            MasteryLevel::Proficient
        );
        assert_eq!(
            state.quiz("shared").unwrap().mastery_level,
            MasteryLevel::Attempted
        );
    }

    #[test]
    fn test_update_mastery_falls_back_to_quiz() {
        let state = apply(
            ProgressState::default(),
            vec![
                quiz("q1", 40),
                ProgressAction::UpdateMasteryLevel {
                    item_id: "q1".into(),
                    level: MasteryLevel::Familiar,
                },
            ],
        );
        let record = state.quiz("q1").unwrap();
        assert_eq!(record.mastery_level, MasteryLevel::Familiar);
        assert_eq!(record.score, 40);
    }

    #[test]
    fn test_update_mastery_unknown_id_is_noop() {
        let before = apply(ProgressState::default(), vec![complete("l1")]);
        let after = before.reduce(
            ProgressAction::UpdateMasteryLevel {
                item_id: "ghost".into(),
                level: MasteryLevel::Mastered,
            },
            now(),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_award_badge_is_idempotent() {
        let award = || ProgressAction::AwardBadge {
            badge_id: "first-steps".into(),
        };
        let state = apply(ProgressState::default(), vec![award(), award()]);
        assert_eq!(state.badges.len(), 1);
        assert!(state.has_badge("first-steps"));
        assert_eq!(state.xp, 0);
    }

    #[test]
    fn test_add_xp_can_go_negative() {
        let state = apply(
            ProgressState::default(),
            vec![complete("l1"), ProgressAction::AddXp { amount: -50 }],
        );
        assert_eq!(state.xp, -40);
    }

    #[test]
    fn test_xp_saturates_instead_of_overflowing() {
        let state = apply(
            ProgressState::default(),
            vec![complete("l1"), ProgressAction::AddXp { amount: i64::MAX }],
        );
        assert_eq!(state.xp, i64::MAX);

        let state = apply(state, vec![complete("l2"), quiz("q1", 100)]);
        assert_eq!(state.xp, i64::MAX);

        let state = apply(
            ProgressState::default(),
            vec![
                ProgressAction::AddXp { amount: -5 },
                ProgressAction::AddXp { amount: i64::MIN },
            ],
        );
        assert_eq!(state.xp, i64::MIN);
    }

    #[test]
    fn test_reset_progress_clears_everything() {
        let state = apply(
            ProgressState::default(),
            vec![
                complete("l1"),
                quiz("q1", 88),
                ProgressAction::AwardBadge {
                    badge_id: "b".into(),
                },
                ProgressAction::ResetProgress,
            ],
        );

        assert_eq!(state.xp, 0);
        assert!(state.badges.is_empty());
        assert!(state.progress.is_empty());
        assert!(state.quizzes.is_empty());
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let before = ProgressState::default();
        let _ = before.reduce(complete("l1"), now());
        assert_eq!(before, ProgressState::default());
    }

    #[test]
    fn test_quiz_xp_floors() {
        assert_eq!(quiz_xp(82), 8);
        assert_eq!(quiz_xp(99), 9);
        assert_eq!(quiz_xp(-1), -1);
        assert_eq!(quiz_xp(-10), -1);
        assert_eq!(quiz_xp(-11), -2);
    }
}

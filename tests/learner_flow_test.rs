//! Integration tests for the learner state stores
//!
//! Covers:
//! - Progress scoring, XP and badges through the store API
//! - Onboarding wizard navigation and completion into a student profile
//! - Profile edit cooldown with a pinned clock
//! - Logout teardown

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use std::rc::Rc;
use tutorcore::models::{MasteryLevel, OnboardingData, ProfilePatch, SkillLevel};
use tutorcore::services::{complete_onboarding, AccountInfo, OnboardingError};
use tutorcore::{FixedClock, MemoryStorage, OnboardingStore, ProgressStore, Store, StudentStore};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()
}

fn setup() -> (MemoryStorage, Rc<FixedClock>) {
    (MemoryStorage::new(), Rc::new(FixedClock::new(start())))
}

fn account() -> AccountInfo {
    AccountInfo {
        name: "Riley".to_string(),
        email: "riley@example.com".to_string(),
    }
}

fn fill_wizard(store: &mut OnboardingStore) {
    store
        .update_data(OnboardingData {
            plan: Some("standard".into()),
            ..Default::default()
        })
        .unwrap();
    store.next_step().unwrap();

    store
        .update_data(OnboardingData {
            age: Some(16),
            ..Default::default()
        })
        .unwrap();
    store
        .update_data(OnboardingData {
            grade: Some("10th Grade".into()),
            timezone: Some("Europe/Madrid".into()),
            ..Default::default()
        })
        .unwrap();
    store.next_step().unwrap();

    store
        .update_data(OnboardingData {
            subjects: Some(vec!["math".into(), "biology".into()]),
            learning_goals: Some(vec!["Prepare for finals".into()]),
            weekly_study_hours: Some(8),
            ..Default::default()
        })
        .unwrap();
    store.next_step().unwrap();

    store
        .update_data(OnboardingData {
            skill_levels: Some(BTreeMap::from([
                ("math".to_string(), SkillLevel::Advanced),
                ("biology".to_string(), SkillLevel::Beginner),
            ])),
            ..Default::default()
        })
        .unwrap();
    store.next_step().unwrap();
}

#[test]
fn test_quiz_end_to_end() {
    let (storage, clock) = setup();
    let mut progress: ProgressStore = Store::open(storage, clock).unwrap();

    progress.update_quiz_progress("q1", 82).unwrap();

    let quiz = progress.state().quiz("q1").unwrap();
    assert_eq!(quiz.quiz_id, "q1");
    assert!(quiz.completed);
    assert_eq!(quiz.score, 82);
    assert_eq!(quiz.mastery_level, MasteryLevel::Proficient);
    assert_eq!(progress.state().xp, 8);
}

#[test]
fn test_lesson_completion_stamps_clock_time() {
    let (storage, clock) = setup();
    let mut progress: ProgressStore = Store::open(storage, clock.clone()).unwrap();

    progress.mark_lesson_complete("geometry-2").unwrap();
    clock.advance(Duration::hours(5));
    progress.mark_lesson_complete("geometry-2").unwrap();

    let lesson = progress.state().lesson("geometry-2").unwrap();
    assert_eq!(lesson.last_attempt_date, Some(start() + Duration::hours(5)));
    assert_eq!(lesson.mastery_level, MasteryLevel::Familiar);
    assert_eq!(progress.state().xp, 20);
}

#[test]
fn test_progress_reset_then_read() {
    let (storage, clock) = setup();
    let mut progress: ProgressStore = Store::open(storage, clock).unwrap();

    progress.mark_lesson_complete("l1").unwrap();
    progress.update_quiz_progress("q1", 91).unwrap();
    progress.award_badge("streak-7").unwrap();
    progress.award_badge("streak-7").unwrap();
    progress.update_mastery_level("l1", MasteryLevel::Mastered).unwrap();
    assert_eq!(progress.state().badges.len(), 1);
    assert_eq!(
        progress.state().lesson("l1").unwrap().mastery_level,
        MasteryLevel::Mastered
    );

    progress.reset_progress().unwrap();

    let state = progress.state();
    assert_eq!(state.xp, 0);
    assert!(state.badges.is_empty());
    assert!(state.progress.is_empty());
    assert!(state.quizzes.is_empty());
}

#[test]
fn test_onboarding_to_profile() {
    let (storage, clock) = setup();
    let mut onboarding: OnboardingStore = Store::open(storage.clone(), clock.clone()).unwrap();
    let mut student: StudentStore = Store::open(storage, clock).unwrap();

    fill_wizard(&mut onboarding);
    // Extra presses at the review step stay put.
    onboarding.next_step().unwrap();
    assert_eq!(onboarding.state().step, 5);

    let profile = complete_onboarding(&mut onboarding, &mut student, &account()).unwrap();

    assert_eq!(profile.name, "Riley");
    assert_eq!(profile.age, Some(16));
    assert_eq!(profile.grade.as_deref(), Some("10th Grade"));
    assert_eq!(profile.created_at, start());
    assert_eq!(profile.skill_levels.len(), 2);

    assert!(student.state().is_authenticated);
    assert_eq!(student.state().profile.as_ref(), Some(&profile));

    assert_eq!(onboarding.state().step, 1);
    assert!(onboarding.state().data.is_empty());
}

#[test]
fn test_incomplete_onboarding_changes_nothing() {
    let (storage, clock) = setup();
    let mut onboarding: OnboardingStore = Store::open(storage.clone(), clock.clone()).unwrap();
    let mut student: StudentStore = Store::open(storage, clock).unwrap();

    onboarding
        .update_data(OnboardingData {
            plan: Some("standard".into()),
            age: Some(12),
            ..Default::default()
        })
        .unwrap();
    onboarding.set_step(5).unwrap();

    let err = complete_onboarding(&mut onboarding, &mut student, &account()).unwrap_err();
    assert!(matches!(err, OnboardingError::Incomplete { step: 2, .. }));

    assert!(!student.state().is_authenticated);
    assert!(student.state().profile.is_none());
    assert_eq!(onboarding.state().step, 5);
    assert_eq!(onboarding.state().data.age, Some(12));
}

#[test]
fn test_profile_edit_cooldown() {
    let (storage, clock) = setup();
    let mut onboarding: OnboardingStore = Store::open(storage.clone(), clock.clone()).unwrap();
    let mut student: StudentStore = Store::open(storage, clock.clone()).unwrap();

    fill_wizard(&mut onboarding);
    complete_onboarding(&mut onboarding, &mut student, &account()).unwrap();

    // Never edited since creation.
    assert!(student.can_edit_profile());
    assert_eq!(student.next_edit_date(), None);

    student
        .update_profile(ProfilePatch {
            timezone: Some("Europe/Lisbon".into()),
            ..Default::default()
        })
        .unwrap();
    let edited_at = start();
    assert_eq!(student.next_edit_date(), Some(edited_at + Duration::days(30)));
    assert!(!student.can_edit_profile());

    clock.set(edited_at + Duration::days(29));
    assert!(!student.can_edit_profile());

    clock.set(edited_at + Duration::days(30));
    assert!(student.can_edit_profile());
}

#[test]
fn test_logout_after_profile_and_favourites() {
    let (storage, clock) = setup();
    let mut onboarding: OnboardingStore = Store::open(storage.clone(), clock.clone()).unwrap();
    let mut student: StudentStore = Store::open(storage, clock).unwrap();

    fill_wizard(&mut onboarding);
    complete_onboarding(&mut onboarding, &mut student, &account()).unwrap();
    student.add_to_favourites("x").unwrap();
    student.add_to_favourites("x").unwrap();
    student.set_credits(4).unwrap();
    assert_eq!(student.state().favourite_content, vec!["x".to_string()]);

    student.logout().unwrap();

    let state = student.state();
    assert!(state.profile.is_none());
    assert!(state.favourite_content.is_empty());
    assert!(!state.is_authenticated);
    assert_eq!(state.credits, 0);
}

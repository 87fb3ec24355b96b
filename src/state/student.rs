//! Student reducer: profile, edit cooldown, homework, favourites, logout

use super::{Reducer, Store};
use crate::models::{HomeworkItem, ProfilePatch, StudentProfile, StudentState, TutoringSession};
use crate::storage::{StorageResult, STUDENT_KEY};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// Days that must pass between profile edits
pub const EDIT_COOLDOWN_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentAction {
    SetProfile(Box<StudentProfile>),
    UpdateProfile(ProfilePatch),
    ToggleHomeworkComplete(String),
    AddToFavourites(String),
    RemoveFromFavourites(String),
    SetCredits(u32),
    SetHomework(Vec<HomeworkItem>),
    SetSessions(Vec<TutoringSession>),
    Logout,
}

impl Reducer for StudentState {
    type Action = StudentAction;
    const STORAGE_KEY: &'static str = STUDENT_KEY;

    fn reduce(&self, action: StudentAction, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();

        match action {
            StudentAction::SetProfile(profile) => {
                next.profile = Some(*profile);
                next.is_authenticated = true;
            }

            StudentAction::UpdateProfile(patch) => {
                // The cooldown is not checked here; callers gate on can_edit_profile.
                if let Some(profile) = next.profile.as_mut() {
                    profile.apply(patch);
                    profile.last_profile_update = Some(now);
                }
            }

            StudentAction::ToggleHomeworkComplete(id) => {
                if let Some(item) = next.homework.iter_mut().find(|h| h.id == id) {
                    item.completed = !item.completed;
                }
            }

            StudentAction::AddToFavourites(id) => {
                if !next.is_favourite(&id) {
                    next.favourite_content.push(id);
                }
            }

            StudentAction::RemoveFromFavourites(id) => {
                next.favourite_content.retain(|existing| *existing != id);
            }

            StudentAction::SetCredits(credits) => next.credits = credits,
            StudentAction::SetHomework(homework) => next.homework = homework,
            StudentAction::SetSessions(sessions) => next.sessions = sessions,

            StudentAction::Logout => next = StudentState::default(),
        }

        next
    }
}

impl StudentState {
    /// Whether the edit cooldown has elapsed at `now`.
    ///
    /// Elapsed days are whole 24-hour periods in UTC. A missing profile or a
    /// profile never edited since creation is always editable.
    pub fn can_edit_profile(&self, now: DateTime<Utc>) -> bool {
        let Some(last_update) = self.profile.as_ref().and_then(|p| p.last_profile_update) else {
            return true;
        };

        now.signed_duration_since(last_update).num_days() >= EDIT_COOLDOWN_DAYS
    }

    /// When the next edit is allowed, if a previous edit is on record
    pub fn next_edit_date(&self) -> Option<DateTime<Utc>> {
        self.profile
            .as_ref()
            .and_then(|p| p.last_profile_update)
            .map(|last| last + Duration::days(EDIT_COOLDOWN_DAYS))
    }
}

pub type StudentStore = Store<StudentState>;

impl Store<StudentState> {
    /// Replace the profile wholesale and mark the session authenticated
    pub fn set_profile(&mut self, profile: StudentProfile) -> StorageResult<()> {
        info!(student_id = %profile.id, "profile set");
        self.dispatch(StudentAction::SetProfile(Box::new(profile)))
    }

    /// Merge `patch` into the profile and stamp the edit time.
    ///
    /// Does nothing without a profile. Does not enforce the cooldown.
    pub fn update_profile(&mut self, patch: ProfilePatch) -> StorageResult<()> {
        self.dispatch(StudentAction::UpdateProfile(patch))
    }

    pub fn can_edit_profile(&self) -> bool {
        self.state().can_edit_profile(self.now())
    }

    pub fn next_edit_date(&self) -> Option<DateTime<Utc>> {
        self.state().next_edit_date()
    }

    pub fn toggle_homework_complete(&mut self, id: impl Into<String>) -> StorageResult<()> {
        self.dispatch(StudentAction::ToggleHomeworkComplete(id.into()))
    }

    pub fn add_to_favourites(&mut self, content_id: impl Into<String>) -> StorageResult<()> {
        self.dispatch(StudentAction::AddToFavourites(content_id.into()))
    }

    pub fn remove_from_favourites(&mut self, content_id: impl Into<String>) -> StorageResult<()> {
        self.dispatch(StudentAction::RemoveFromFavourites(content_id.into()))
    }

    pub fn set_credits(&mut self, credits: u32) -> StorageResult<()> {
        self.dispatch(StudentAction::SetCredits(credits))
    }

    pub fn set_homework(&mut self, homework: Vec<HomeworkItem>) -> StorageResult<()> {
        self.dispatch(StudentAction::SetHomework(homework))
    }

    pub fn set_sessions(&mut self, sessions: Vec<TutoringSession>) -> StorageResult<()> {
        self.dispatch(StudentAction::SetSessions(sessions))
    }

    /// Tear down the whole session
    pub fn logout(&mut self) -> StorageResult<()> {
        info!("logging out");
        self.dispatch(StudentAction::Logout)
    }
}

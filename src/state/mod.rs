//! Learner state stores
//!
//! Each slice is a pure reducer driven by a [`Store`], which handles:
//! - Rehydration from storage on open
//! - Clock injection for timestamps
//! - Saving after every dispatched action

mod onboarding;
mod progress;
mod store;
mod student;

pub use onboarding::{OnboardingAction, OnboardingStore};
pub use progress::{quiz_xp, ProgressAction, ProgressStore, LESSON_COMPLETE_XP, QUIZ_DIFFICULTY_MULTIPLIER};
pub use store::{Reducer, Store};
pub use student::{StudentAction, StudentStore, EDIT_COOLDOWN_DAYS};

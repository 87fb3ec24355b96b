// Tutorcore - Learner state core for a tutoring platform
// Progress and mastery tracking, onboarding wizard, student profile

pub mod cli;
pub mod clock;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod validator;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{MasteryLevel, OnboardingData, ProgressState, StudentProfile, StudentState, TutorConfig};
pub use state::{OnboardingStore, ProgressStore, Store, StudentStore};
pub use storage::{JsonFileStorage, MemoryStorage, StateStorage, StorageError};

pub mod config;
pub mod mastery;
pub mod onboarding;
pub mod progress;
pub mod student;

pub use config::TutorConfig;
pub use mastery::MasteryLevel;
pub use onboarding::{OnboardingData, OnboardingState, OnboardingStep, SkillLevel};
pub use progress::{LessonProgress, ProgressState, QuizProgress};
pub use student::{HomeworkItem, ProfilePatch, StudentProfile, StudentState, TutoringSession};

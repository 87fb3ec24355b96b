//! Service layer for tutorcore
//!
//! Services coordinate between stores. Stores never call each other; anything
//! that reads one slice and writes another lives here.

pub mod onboarding_service;

pub use onboarding_service::{build_profile, complete_onboarding, AccountInfo, OnboardingError};

pub mod onboarding;

pub use onboarding::{can_continue, first_incomplete_step, validate_step, FieldError};

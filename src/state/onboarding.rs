//! Onboarding reducer: linear 5-step wizard

use super::{Reducer, Store};
use crate::models::onboarding::{clamp_step, is_valid_step};
use crate::models::{OnboardingData, OnboardingState};
use crate::storage::{StorageResult, ONBOARDING_KEY};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingAction {
    UpdateData(OnboardingData),
    NextStep,
    PrevStep,
    SetStep(i64),
    MarkStepComplete(i64),
    ResetData,
}

impl Reducer for OnboardingState {
    type Action = OnboardingAction;
    const STORAGE_KEY: &'static str = ONBOARDING_KEY;

    fn reduce(&self, action: OnboardingAction, _now: DateTime<Utc>) -> Self {
        let mut next = self.clone();

        match action {
            OnboardingAction::UpdateData(patch) => next.data.merge(patch),
            OnboardingAction::NextStep => next.step = clamp_step(i64::from(self.step) + 1),
            OnboardingAction::PrevStep => next.step = clamp_step(i64::from(self.step) - 1),
            OnboardingAction::SetStep(step) => next.step = clamp_step(step),
            OnboardingAction::MarkStepComplete(step) => {
                if is_valid_step(step) {
                    next.completed_steps.insert(clamp_step(step));
                }
            }
            OnboardingAction::ResetData => next = OnboardingState::default(),
        }

        next
    }
}

pub type OnboardingStore = Store<OnboardingState>;

impl Store<OnboardingState> {
    /// Merge the set fields of `patch` into the accumulated data
    pub fn update_data(&mut self, patch: OnboardingData) -> StorageResult<()> {
        self.dispatch(OnboardingAction::UpdateData(patch))
    }

    /// Advance one step; a no-op on the review step
    pub fn next_step(&mut self) -> StorageResult<()> {
        self.dispatch(OnboardingAction::NextStep)
    }

    /// Go back one step; a no-op on the first step
    pub fn prev_step(&mut self) -> StorageResult<()> {
        self.dispatch(OnboardingAction::PrevStep)
    }

    /// Jump to a step, clamped into the wizard's range
    pub fn set_step(&mut self, step: i64) -> StorageResult<()> {
        self.dispatch(OnboardingAction::SetStep(step))
    }

    pub fn mark_step_complete(&mut self, step: i64) -> StorageResult<()> {
        self.dispatch(OnboardingAction::MarkStepComplete(step))
    }

    pub fn reset_data(&mut self) -> StorageResult<()> {
        self.dispatch(OnboardingAction::ResetData)
    }
}

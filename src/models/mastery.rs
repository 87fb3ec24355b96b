use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a quiz counts as mastered
pub const MASTERED_THRESHOLD: i32 = 90;
/// Score at or above which a quiz counts as proficient
pub const PROFICIENT_THRESHOLD: i32 = 75;
/// Score at or above which a quiz counts as familiar
pub const FAMILIAR_THRESHOLD: i32 = 60;

/// Ordered classification of a learner's command of a lesson or quiz
///
/// Variant order is significant: `NotStarted < Attempted < ... < Mastered`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasteryLevel {
    /// Never touched
    #[default]
    NotStarted,
    /// Tried, below the familiar threshold
    Attempted,
    /// Basic understanding
    Familiar,
    /// Solid understanding
    Proficient,
    /// Full command
    Mastered,
}

impl MasteryLevel {
    /// All levels in ascending order
    pub const ALL: [MasteryLevel; 5] = [
        MasteryLevel::NotStarted,
        MasteryLevel::Attempted,
        MasteryLevel::Familiar,
        MasteryLevel::Proficient,
        MasteryLevel::Mastered,
    ];

    /// Classify a quiz score.
    ///
    /// Out-of-range scores are not rejected; they fall through the same
    /// thresholds (e.g. 120 is mastered, -5 is attempted).
    pub fn from_score(score: i32) -> Self {
        if score >= MASTERED_THRESHOLD {
            MasteryLevel::Mastered
        } else if score >= PROFICIENT_THRESHOLD {
            MasteryLevel::Proficient
        } else if score >= FAMILIAR_THRESHOLD {
            MasteryLevel::Familiar
        } else {
            MasteryLevel::Attempted
        }
    }

    /// Wire name, as stored in persisted state
    pub fn name(&self) -> &'static str {
        match self {
            MasteryLevel::NotStarted => "not-started",
            MasteryLevel::Attempted => "attempted",
            MasteryLevel::Familiar => "familiar",
            MasteryLevel::Proficient => "proficient",
            MasteryLevel::Mastered => "mastered",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MasteryLevel::NotStarted => "⚪",
            MasteryLevel::Attempted => "🔴",
            MasteryLevel::Familiar => "🟡",
            MasteryLevel::Proficient => "🔵",
            MasteryLevel::Mastered => "🟢",
        }
    }

    /// Parse a wire name back into a level
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == s)
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

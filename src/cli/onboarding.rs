//! Onboarding CLI commands

use super::{open_store, print_json};
use crate::models::{OnboardingData, OnboardingState, OnboardingStep, SkillLevel};
use crate::services::{complete_onboarding, AccountInfo};
use crate::state::{OnboardingStore, StudentStore};
use crate::validator::{validate_step, FieldError};
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Subcommand)]
pub enum OnboardingCommands {
    /// Show the current step and collected data
    Show {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Merge fields into the collected data
    Update {
        #[arg(long)]
        plan: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        grade: Option<String>,

        #[arg(long)]
        timezone: Option<String>,

        /// Subject (repeatable; replaces the list)
        #[arg(long = "subject")]
        subjects: Vec<String>,

        /// Learning goal (repeatable; replaces the list)
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Weekly study hours
        #[arg(long)]
        hours: Option<u32>,

        /// Skill level as subject=level (repeatable; replaces the map)
        #[arg(long = "skill", value_parser = parse_skill)]
        skills: Vec<(String, SkillLevel)>,
    },

    /// Validate the current step and move to the next one
    Next {
        /// Skip validation
        #[arg(short, long)]
        force: bool,
    },

    /// Go back one step
    Prev,

    /// Jump to a step (clamped to 1-5)
    Step {
        #[arg(allow_negative_numbers = true)]
        step: i64,
    },

    /// Validate a step (defaults to the current one)
    Validate { step: Option<u8> },

    /// Create the student profile from the collected data
    Complete {
        /// Student name
        #[arg(long)]
        name: String,

        /// Student email
        #[arg(long)]
        email: String,
    },

    /// Discard collected data and return to step 1
    Reset,
}

fn parse_skill(s: &str) -> std::result::Result<(String, SkillLevel), String> {
    let (subject, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected subject=level, got '{}'", s))?;
    let level = SkillLevel::parse(level.trim())
        .ok_or_else(|| format!("unknown skill level '{}'", level.trim()))?;
    Ok((subject.trim().to_string(), level))
}

pub fn run(cmd: OnboardingCommands, storage_dir: &Path) -> Result<()> {
    let mut store: OnboardingStore = open_store(storage_dir)?;

    match cmd {
        OnboardingCommands::Show { json } => {
            if json {
                print_json(store.state())?;
            } else {
                print_state(store.state());
            }
        }
        OnboardingCommands::Update {
            plan,
            age,
            grade,
            timezone,
            subjects,
            goals,
            hours,
            skills,
        } => {
            let patch = OnboardingData {
                plan,
                age,
                grade,
                timezone,
                subjects: (!subjects.is_empty()).then_some(subjects),
                learning_goals: (!goals.is_empty()).then_some(goals),
                weekly_study_hours: hours,
                skill_levels: (!skills.is_empty()).then(|| skills.into_iter().collect::<BTreeMap<_, _>>()),
            };
            store.update_data(patch)?;
            println!("{}", "📝 Onboarding data updated".green());
        }
        OnboardingCommands::Next { force } => {
            let step = store.state().step;
            let errors = advance(&mut store, force)?;
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("{}", format!("  ✗ {}", error).red());
                }
                if !force {
                    anyhow::bail!("Step {} is not complete", step);
                }
                eprintln!("{}", format!("⚠ Skipped step {} without completing it", step).yellow());
            }
            print_cursor(store.state());
        }
        OnboardingCommands::Prev => {
            store.prev_step()?;
            print_cursor(store.state());
        }
        OnboardingCommands::Step { step } => {
            store.set_step(step)?;
            print_cursor(store.state());
        }
        OnboardingCommands::Validate { step } => {
            let step = step.unwrap_or(store.state().step);
            let errors = validate_step(step, &store.state().data);
            if errors.is_empty() {
                println!("{}", format!("✅ Step {} is valid", step).green());
            } else {
                for error in &errors {
                    println!("{}", format!("  ✗ {}", error).red());
                }
                anyhow::bail!("Step {} has {} error(s)", step, errors.len());
            }
        }
        OnboardingCommands::Complete { name, email } => {
            let mut student: StudentStore = open_store(storage_dir)?;
            let profile = complete_onboarding(&mut store, &mut student, &AccountInfo { name, email })?;
            println!(
                "{}",
                format!("🎉 Welcome, {}! Profile {} created", profile.name, profile.id).green()
            );
        }
        OnboardingCommands::Reset => {
            store.reset_data()?;
            println!("{}", "🔄 Onboarding reset".cyan());
        }
    }

    Ok(())
}

/// Move past the current step.
///
/// Returns the step's validation errors. Without `force` the cursor stays put
/// when there are any; a forced move never marks the skipped step complete.
fn advance(store: &mut OnboardingStore, force: bool) -> Result<Vec<FieldError>> {
    let step = store.state().step;
    let errors = validate_step(step, &store.state().data);

    if errors.is_empty() {
        store.mark_step_complete(i64::from(step))?;
    } else if !force {
        return Ok(errors);
    }

    store.next_step()?;
    Ok(errors)
}

fn print_cursor(state: &OnboardingState) {
    let name = state.current_step().map(|s| s.name()).unwrap_or("?");
    println!("{}", format!("➡ Step {}/5: {}", state.step, name).cyan());
}

fn print_state(state: &OnboardingState) {
    print_cursor(state);

    for number in 1..=5u8 {
        let Some(step) = OnboardingStep::from_number(number) else {
            continue;
        };
        let marker = if state.is_step_complete(number) {
            "✓".green()
        } else if number == state.step {
            "›".cyan()
        } else {
            " ".normal()
        };
        println!("   {} {}. {}", marker, number, step.name());
    }

    let data = &state.data;
    if data.is_empty() {
        println!("\n   {}", "No data collected yet".dimmed());
        return;
    }

    println!();
    let show = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            println!("   {:<14} {}", label.bold(), value);
        }
    };
    show("Plan", data.plan.clone());
    show("Age", data.age.map(|a| a.to_string()));
    show("Grade", data.grade.clone());
    show("Timezone", data.timezone.clone());
    show("Subjects", data.subjects.as_ref().map(|s| s.join(", ")));
    show("Goals", data.learning_goals.as_ref().map(|g| g.join(", ")));
    show("Hours/week", data.weekly_study_hours.map(|h| h.to_string()));
    show(
        "Skills",
        data.skill_levels.as_ref().map(|levels| {
            levels
                .iter()
                .map(|(subject, level)| format!("{}={}", subject, level))
                .collect::<Vec<_>>()
                .join(", ")
        }),
    );
}

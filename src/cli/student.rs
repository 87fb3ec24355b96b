//! Student CLI commands

use super::{open_store, print_json};
use crate::models::{HomeworkItem, ProfilePatch, StudentState, TutoringSession};
use crate::state::StudentStore;
use crate::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum StudentCommands {
    /// Show the profile and session data
    Show {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Check whether the profile may be edited
    CanEdit,

    /// Edit the profile (once every 30 days)
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        grade: Option<String>,

        #[arg(long)]
        timezone: Option<String>,

        /// Weekly study hours
        #[arg(long)]
        hours: Option<u32>,

        /// Edit even if the cooldown has not elapsed
        #[arg(short, long)]
        force: bool,
    },

    /// Add content to favourites
    Favourite { content_id: String },

    /// Remove content from favourites
    Unfavourite { content_id: String },

    /// Toggle a homework item's completion
    ToggleHomework { id: String },

    /// Set the credit balance
    Credits { credits: u32 },

    /// Replace homework from a JSON file (array of homework items)
    Homework {
        #[arg(long)]
        json_file: PathBuf,
    },

    /// Replace booked sessions from a JSON file (array of sessions)
    Sessions {
        #[arg(long)]
        json_file: PathBuf,
    },

    /// Clear the whole session
    Logout,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn run(cmd: StudentCommands, storage_dir: &Path) -> Result<()> {
    let mut store: StudentStore = open_store(storage_dir)?;

    match cmd {
        StudentCommands::Show { json } => {
            if json {
                print_json(store.state())?;
            } else {
                print_state(store.state());
            }
        }
        StudentCommands::CanEdit => {
            if store.can_edit_profile() {
                println!("{}", "✅ Profile can be edited".green());
            } else {
                print_cooldown(&store);
            }
        }
        StudentCommands::Update {
            name,
            email,
            grade,
            timezone,
            hours,
            force,
        } => {
            if store.state().profile.is_none() {
                anyhow::bail!("No profile yet. Complete onboarding first.");
            }
            if !force && !store.can_edit_profile() {
                print_cooldown(&store);
                anyhow::bail!("Profile edit is on cooldown");
            }

            store.update_profile(ProfilePatch {
                name,
                email,
                grade,
                timezone,
                weekly_study_hours: hours,
                ..Default::default()
            })?;
            println!("{}", "📝 Profile updated".green());
        }
        StudentCommands::Favourite { content_id } => {
            store.add_to_favourites(&content_id)?;
            println!("{}", format!("⭐ '{}' in favourites", content_id).green());
        }
        StudentCommands::Unfavourite { content_id } => {
            store.remove_from_favourites(&content_id)?;
            println!("{}", format!("'{}' removed from favourites", content_id).cyan());
        }
        StudentCommands::ToggleHomework { id } => {
            store.toggle_homework_complete(&id)?;
            match store.state().homework.iter().find(|h| h.id == id) {
                Some(item) if item.completed => println!("{}", format!("✅ '{}' done", item.title).green()),
                Some(item) => println!("{}", format!("↩ '{}' reopened", item.title).cyan()),
                None => println!("{}", format!("⚠ No homework '{}'", id).yellow()),
            }
        }
        StudentCommands::Credits { credits } => {
            store.set_credits(credits)?;
            println!("Credits: {}", credits.to_string().bold());
        }
        StudentCommands::Homework { json_file } => {
            let items: Vec<HomeworkItem> = read_json(&json_file)?;
            let count = items.len();
            store.set_homework(items)?;
            println!("{}", format!("📚 Loaded {} homework item(s)", count).green());
        }
        StudentCommands::Sessions { json_file } => {
            let sessions: Vec<TutoringSession> = read_json(&json_file)?;
            let count = sessions.len();
            store.set_sessions(sessions)?;
            println!("{}", format!("📅 Loaded {} session(s)", count).green());
        }
        StudentCommands::Logout => {
            store.logout()?;
            println!("{}", "👋 Logged out".cyan());
        }
    }

    Ok(())
}

fn print_cooldown(store: &StudentStore) {
    let next = store
        .next_edit_date()
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{}", format!("⏳ Profile can next be edited on {}", next).yellow());
}

fn print_state(state: &StudentState) {
    let Some(profile) = &state.profile else {
        println!("{}", "Not signed in".dimmed());
        return;
    };

    println!("{}", format!("👤 {} <{}>", profile.name, profile.email).cyan().bold());
    println!("   {:<14} {}", "ID".bold(), profile.id);
    println!("   {:<14} {}", "Plan".bold(), profile.plan);
    if let Some(grade) = &profile.grade {
        println!("   {:<14} {}", "Grade".bold(), grade);
    }
    if !profile.subjects.is_empty() {
        println!("   {:<14} {}", "Subjects".bold(), profile.subjects.join(", "));
    }
    println!("   {:<14} {}", "Credits".bold(), state.credits);

    if !state.homework.is_empty() {
        println!("\n{}", "Homework".bold());
        for item in &state.homework {
            let mark = if item.completed { "✓".green() } else { "·".normal() };
            println!("   {} {} ({})", mark, item.title, item.subject);
        }
    }

    if !state.sessions.is_empty() {
        println!("\n{}", "Sessions".bold());
        for session in &state.sessions {
            println!(
                "   {} {} with {} ({} min)",
                session.scheduled_at.format("%Y-%m-%d %H:%M"),
                session.subject,
                session.tutor_name,
                session.duration_minutes
            );
        }
    }

    if !state.favourite_content.is_empty() {
        println!("\n{}", "Favourites".bold());
        for id in &state.favourite_content {
            println!("   ⭐ {}", id);
        }
    }
}

//! Progress CLI commands

use super::{open_store, print_json};
use crate::models::{MasteryLevel, ProgressState};
use crate::state::{quiz_xp, ProgressStore, LESSON_COMPLETE_XP};
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Show lessons, quizzes, XP and badges
    Show {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Mark a lesson complete (+10 XP every time)
    CompleteLesson {
        /// Lesson ID
        lesson_id: String,
    },

    /// Record a quiz score
    Quiz {
        /// Quiz ID
        quiz_id: String,

        /// Score, normally 0-100
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },

    /// Override the mastery level of an existing lesson or quiz
    Mastery {
        /// Lesson or quiz ID
        item_id: String,

        /// not-started, attempted, familiar, proficient or mastered
        #[arg(value_parser = parse_level)]
        level: MasteryLevel,
    },

    /// Award a badge
    Badge {
        /// Badge ID
        badge_id: String,
    },

    /// Add XP (negative amounts subtract)
    Xp {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Clear all progress, XP and badges
    Reset,
}

fn parse_level(s: &str) -> std::result::Result<MasteryLevel, String> {
    MasteryLevel::parse(s).ok_or_else(|| {
        let names: Vec<_> = MasteryLevel::ALL.iter().map(|l| l.name()).collect();
        format!("unknown mastery level '{}', expected one of: {}", s, names.join(", "))
    })
}

pub fn run(cmd: ProgressCommands, storage_dir: &Path) -> Result<()> {
    let mut store: ProgressStore = open_store(storage_dir)?;

    match cmd {
        ProgressCommands::Show { json } => {
            if json {
                print_json(store.state())?;
            } else {
                print_summary(store.state());
            }
        }
        ProgressCommands::CompleteLesson { lesson_id } => {
            store.mark_lesson_complete(&lesson_id)?;
            println!(
                "{}",
                format!("✅ Lesson '{}' complete (+{} XP)", lesson_id, LESSON_COMPLETE_XP).green()
            );
            print_xp(store.state());
        }
        ProgressCommands::Quiz { quiz_id, score } => {
            store.update_quiz_progress(&quiz_id, score)?;
            let level = MasteryLevel::from_score(score);
            println!(
                "{}",
                format!(
                    "{} Quiz '{}' scored {} → {} (+{} XP)",
                    level.emoji(),
                    quiz_id,
                    score,
                    level,
                    quiz_xp(score)
                )
                .green()
            );
            print_xp(store.state());
        }
        ProgressCommands::Mastery { item_id, level } => {
            let known = store.state().lesson(&item_id).is_some() || store.state().quiz(&item_id).is_some();
            store.update_mastery_level(&item_id, level)?;
            if known {
                println!("{}", format!("{} '{}' is now {}", level.emoji(), item_id, level).green());
            } else {
                println!("{}", format!("⚠ No lesson or quiz '{}' recorded; nothing changed", item_id).yellow());
            }
        }
        ProgressCommands::Badge { badge_id } => {
            let already = store.state().has_badge(&badge_id);
            store.award_badge(&badge_id)?;
            if already {
                println!("{}", format!("Badge '{}' already earned", badge_id).dimmed());
            } else {
                println!("{}", format!("🏅 Badge '{}' awarded", badge_id).green());
            }
        }
        ProgressCommands::Xp { amount } => {
            store.add_xp(amount)?;
            print_xp(store.state());
        }
        ProgressCommands::Reset => {
            store.reset_progress()?;
            println!("{}", "🔄 Progress reset".cyan());
        }
    }

    Ok(())
}

fn print_xp(state: &ProgressState) {
    println!("   XP: {}", state.xp.to_string().bold());
}

fn print_summary(state: &ProgressState) {
    println!("{}", "📊 Learning progress".cyan().bold());
    println!("   XP: {}", state.xp.to_string().bold());
    println!(
        "   Lessons completed: {}  Quizzes completed: {}",
        state.completed_lesson_count(),
        state.completed_quiz_count()
    );

    if !state.progress.is_empty() {
        println!("\n{}", "Lessons".bold());
        for lesson in state.progress.values() {
            let date = lesson
                .last_attempt_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "   {} {:<24} {:<12} {}",
                lesson.mastery_level.emoji(),
                lesson.lesson_id,
                lesson.mastery_level.name(),
                date.dimmed()
            );
        }
    }

    if !state.quizzes.is_empty() {
        println!("\n{}", "Quizzes".bold());
        for quiz in state.quizzes.values() {
            println!(
                "   {} {:<24} {:<12} {:>3}",
                quiz.mastery_level.emoji(),
                quiz.quiz_id,
                quiz.mastery_level.name(),
                quiz.score
            );
        }
    }

    if !state.badges.is_empty() {
        println!("\n{}", "Badges".bold());
        for badge in &state.badges {
            println!("   🏅 {}", badge);
        }
    }

    println!("\n{}", "Mastery".bold());
    for (level, count) in state.mastery_breakdown() {
        println!("   {} {:<12} {}", level.emoji(), level.name(), count);
    }
}

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tutorcore::models::config::CONFIG_FILE;
use tutorcore::{Context, Result, TutorConfig};

#[derive(Parser)]
#[command(name = "tutorcore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Learner progress, onboarding and profile state", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: ./tutorcore.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted state (overrides config)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the storage directory
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Lesson/quiz mastery, XP and badges
    #[command(subcommand)]
    Progress(tutorcore::cli::progress::ProgressCommands),

    /// Onboarding wizard
    #[command(subcommand)]
    Onboarding(tutorcore::cli::onboarding::OnboardingCommands),

    /// Student profile and session
    #[command(subcommand)]
    Student(tutorcore::cli::student::StudentCommands),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn load_config(cli: &Cli) -> Result<TutorConfig> {
    let path = config_path(cli);
    let mut config = TutorConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }

    Ok(config)
}

fn init_logging(config: &TutorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_logging(&config);
    tracing::debug!(storage_dir = %config.storage_dir.display(), "config loaded");

    let storage_dir = config.storage_dir.as_path();
    let config_file = config_path(&cli);

    match cli.command {
        Commands::Init { force } => {
            tutorcore::cli::init::run(&config, &config_file, force)?;
        }

        Commands::Progress(cmd) => {
            tutorcore::cli::progress::run(cmd, storage_dir)?;
        }

        Commands::Onboarding(cmd) => {
            tutorcore::cli::onboarding::run(cmd, storage_dir)?;
        }

        Commands::Student(cmd) => {
            tutorcore::cli::student::run(cmd, storage_dir)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tutorcore", &mut io::stdout());
        }
    }

    Ok(())
}

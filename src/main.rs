use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use liftrs::config::AppConfig;
use liftrs::logging::{init_logging, LogLevel};
use liftrs::{
    Cadence, Clock, CompletionOutcome, ExperienceLevel, FileStore, FocusGroup, LiftRsError,
    Profile, ProgramGenerator, ResetOutcome, Session, SystemClock, TrainingType,
};

/// LiftRS - Workout Program Planner
///
/// Generates a weekly strength or hypertrophy program and tracks how many
/// scheduled sessions in a row you have completed.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version)]
#[command(about = "Workout program planner and attendance streak tracker", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile and generate a program
    Onboard {
        /// Training type (hypertrophy, strength)
        #[arg(short = 't', long = "type", default_value = "hypertrophy")]
        training_type: TrainingType,

        /// Experience (under1y, 1-3, over3y)
        #[arg(short, long, default_value = "under1y")]
        experience: ExperienceLevel,

        /// Schedule (3day, 2x2)
        #[arg(short, long, default_value = "3day")]
        schedule: Cadence,

        /// Extra muscle group for every day (back, legs, arms, chest, shoulders, chest+back, arms+shoulders)
        #[arg(short, long)]
        focus: Option<FocusGroup>,
    },

    /// Show the program, next session and current streak
    Show,

    /// Generate a new program for the current profile
    Regenerate,

    /// Replace the exercises of one day
    Edit {
        /// Day number, starting at 1
        #[arg(short, long)]
        day: usize,

        /// Exercises, one per line
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read exercises from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Mark today's workout as done
    Done,

    /// Print the next scheduled training date
    Next,

    /// Delete profile, program and streak
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref());
    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let mut rng = match config.generator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = SystemClock.today();

    let store = FileStore::new(&config.storage.data_dir);
    let mut session = Session::load_with(
        store,
        config.storage.state_key.clone(),
        ProgramGenerator::new(),
    );

    match cli.command {
        Commands::Onboard {
            training_type,
            experience,
            schedule,
            focus,
        } => {
            let profile = Profile {
                training_type,
                experience_level: experience,
                cadence: schedule,
                focus_group: focus,
            };
            session.onboard(profile, &mut rng);
            println!("{}", "✓ Program generated".green().bold());
            print_program(&session);
        }

        Commands::Show => {
            if !session.is_onboarded() {
                println!("{}", "No program yet. Run `liftrs onboard` first.".yellow());
                return Ok(());
            }
            print_cabinet(&session, today)?;
            println!();
            print_program(&session);
        }

        Commands::Regenerate => {
            session.regenerate(&mut rng).map_err(report)?;
            println!("{}", "✓ New program generated".green().bold());
            print_program(&session);
        }

        Commands::Edit { day, text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide exercises with --text or --file"),
            };
            let index = day
                .checked_sub(1)
                .context("Day numbers start at 1")?;
            let plan = session.edit_day(index, &text).map_err(report)?;
            println!("{}", format!("✓ {} updated", plan.label).green());
            for exercise in &plan.exercises {
                println!("  • {}", exercise);
            }
        }

        Commands::Done => match session.mark_complete(today).map_err(report)? {
            CompletionOutcome::Recorded { streak, .. } => {
                println!(
                    "{}",
                    format!("✓ Workout saved. Current streak: {}", streak).green().bold()
                );
            }
            CompletionOutcome::NotTrainingDay => {
                println!("{}", "Today is not a training day on your schedule.".yellow());
            }
            CompletionOutcome::AlreadyRecorded => {
                println!("{}", "Today's workout is already recorded.".yellow());
            }
            CompletionOutcome::BeforeLastCompletion { last_completed } => {
                println!(
                    "{}",
                    format!("Last workout is dated {}, after today.", last_completed).red()
                );
            }
        },

        Commands::Next => {
            let next = session.next_training_date(today).map_err(report)?;
            println!("{}", next.format("%Y-%m-%d"));
        }

        Commands::Reset { yes } => {
            let confirmed = yes || confirm("Delete all data?")?;
            match session.reset(confirmed) {
                ResetOutcome::Cleared => println!("{}", "✓ All data removed".green()),
                ResetOutcome::Declined => println!("Nothing changed."),
            }
        }
    }

    Ok(())
}

fn print_cabinet<S: liftrs::StateStore>(
    session: &Session<S>,
    today: chrono::NaiveDate,
) -> Result<()> {
    let summary = session.cabinet(today).map_err(report)?;
    if let Some(profile) = session.profile() {
        println!(
            "{} {:?}, schedule {:?}",
            "Program:".bold(),
            profile.training_type,
            profile.cadence
        );
    }
    println!("{} {}", "Next workout:".bold(), summary.next_training);
    println!("{} {}", "Streak:".bold(), summary.streak.to_string().cyan().bold());
    match summary.last_completed {
        Some(date) => println!("{} {}", "Last completed:".dimmed(), date),
        None => println!("{}", "No workouts completed yet".dimmed()),
    }
    if summary.can_mark_today {
        println!("{}", "Today is a training day: run `liftrs done` afterwards.".blue());
    }
    Ok(())
}

fn print_program<S: liftrs::StateStore>(session: &Session<S>) {
    let Some(program) = session.program() else {
        return;
    };
    for (i, day) in program.iter().enumerate() {
        let focus = day.focus().map(|g| g.to_string()).unwrap_or_default();
        println!(
            "{} {} {}",
            format!("[{}]", i + 1).dimmed(),
            day.label.bold(),
            format!("({})", focus).dimmed()
        );
        println!("    Sets: {} | Reps: {}", day.load_policy.set_count, day.load_policy.rep_range);
        for exercise in &day.exercises {
            println!("    • {}", exercise);
        }
    }
}

/// Log a library error at its severity and surface the user-facing text
fn report(err: LiftRsError) -> anyhow::Error {
    err.log();
    anyhow::anyhow!(err.user_message())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

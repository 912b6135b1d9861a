//! `studybuddy` CLI — manage profiles, weekly availability and study sessions.
//!
//! ## Usage
//!
//! ```sh
//! # Create a profile and enroll in a course
//! studybuddy create-user --name Alice --email alice@clemson.edu
//! studybuddy add-course --email alice@clemson.edu --course "CPSC 3720"
//!
//! # Add weekly availability (24h or 12h times)
//! studybuddy add-availability --email alice@clemson.edu --day Mon --start 9am --end 11:00
//!
//! # Find classmates and shared free time
//! studybuddy overlap --email alice@clemson.edu --course "CPSC 3720"
//!
//! # Propose a session and answer it
//! studybuddy propose --from alice@clemson.edu --to bob@clemson.edu \
//!     --course "CPSC 3720" --day Mon --start 10:00 --end 11:00
//! studybuddy respond --id 1 --email bob@clemson.edu --action accept
//! ```
//!
//! Data files default to `data/users.json` and `data/sessions.json`; override
//! them with `--users-file` / `--sessions-file` or the `STUDYBUDDY_DATA_PATH` /
//! `STUDYBUDDY_SESSIONS_PATH` environment variables. Set `RUST_LOG` for logs
//! on stderr.

use std::path::PathBuf;

use anyhow::Result;
use availability_engine::{format12, Interval};
use clap::{Parser, Subcommand};
use studybuddy::config::{SESSIONS_PATH_ENV, USERS_PATH_ENV};
use studybuddy::{Proposal, SessionAction, StoreConfig, StudyBuddy, StudySession};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "studybuddy",
    version,
    about = "StudyBuddy — find classmates and schedule study sessions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Profile data file
    #[arg(long, global = true, env = USERS_PATH_ENV)]
    users_file: Option<PathBuf>,

    /// Session data file
    #[arg(long, global = true, env = SESSIONS_PATH_ENV)]
    sessions_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user profile
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Add a course to an existing user
    AddCourse {
        #[arg(long)]
        email: String,
        #[arg(long)]
        course: String,
    },
    /// Show profile by email
    ShowProfile {
        #[arg(long)]
        email: String,
    },
    /// Add a weekly availability window (merged with touching/overlapping windows)
    AddAvailability {
        #[arg(long)]
        email: String,
        /// Day of week, e.g. Mon or monday
        #[arg(long)]
        day: String,
        /// Start time, e.g. 09:00 or 9am
        #[arg(long)]
        start: String,
        /// End time, e.g. 17:30 or 5:30pm
        #[arg(long)]
        end: String,
    },
    /// List availability windows with their index
    ListAvailability {
        #[arg(long)]
        email: String,
    },
    /// Remove an availability window by the index shown in list-availability
    RemoveAvailability {
        #[arg(long)]
        email: String,
        #[arg(long)]
        index: usize,
    },
    /// Show the Monday–Sunday availability overview
    Weekly {
        #[arg(long)]
        email: String,
    },
    /// List classmates enrolled in a course
    Classmates {
        #[arg(long)]
        email: String,
        #[arg(long)]
        course: String,
        /// Include each classmate's weekly availability
        #[arg(long)]
        with_availability: bool,
    },
    /// Show shared free time with each classmate in a course
    Overlap {
        #[arg(long)]
        email: String,
        #[arg(long)]
        course: String,
    },
    /// Propose a study session to a classmate
    Propose {
        /// Requester email
        #[arg(long)]
        from: String,
        /// Invitee email
        #[arg(long)]
        to: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        day: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Accept or decline a pending session as its invitee
    Respond {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        email: String,
        /// accept or decline
        #[arg(long)]
        action: String,
    },
    /// Pending sessions waiting for your answer
    Incoming {
        #[arg(long)]
        email: String,
    },
    /// Pending sessions you proposed
    Outgoing {
        #[arg(long)]
        email: String,
    },
    /// Accepted sessions
    Sessions {
        #[arg(long)]
        email: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = StoreConfig::default().with_overrides(cli.users_file, cli.sessions_file);
    tracing::debug!(
        users = %config.users_path.display(),
        sessions = %config.sessions_path.display(),
        "opening data files"
    );
    let app = StudyBuddy::open(&config);

    match cli.command {
        Commands::CreateUser { name, email } => {
            let profile = app.profiles.create_profile(&name, &email)?;
            println!("Created profile for {} ({})", profile.name, profile.email);
        }
        Commands::AddCourse { email, course } => {
            let profile = app.profiles.add_course(&email, &course)?;
            println!("Courses for {}: {}", profile.email, join_or_none(&profile.courses));
        }
        Commands::ShowProfile { email } => {
            let profile = app.profiles.get_profile(&email)?;
            println!("Name: {}", profile.name);
            println!("Email: {}", profile.email);
            println!("Courses: {}", join_or_none(&profile.courses));
        }
        Commands::AddAvailability { email, day, start, end } => {
            let slots = app.availability.add_slot(&email, &day, &start, &end)?;
            println!("Availability for {email}:");
            print_slots(&slots);
        }
        Commands::ListAvailability { email } => {
            print_slots(&app.availability.list_slots(&email)?);
        }
        Commands::RemoveAvailability { email, index } => {
            let slots = app.availability.remove_slot(&email, index)?;
            println!("Removed slot {index}. Remaining:");
            print_slots(&slots);
        }
        Commands::Weekly { email } => {
            for (day, windows) in app.availability.weekly_overview(&email)? {
                let text: Vec<String> = windows.iter().map(|(s, e)| format!("{s} - {e}")).collect();
                println!("{day}: {}", join_or_none(&text));
            }
        }
        Commands::Classmates { email, course, with_availability } => {
            if with_availability {
                let mates = app.search.classmates_with_availability(&email, &course)?;
                if mates.is_empty() {
                    println!("No classmates found");
                }
                for mate in mates {
                    println!("{} ({})", mate.name, mate.email);
                    for (day, windows) in &mate.availability {
                        if !windows.is_empty() {
                            let text: Vec<String> =
                                windows.iter().map(|(s, e)| format!("{s} - {e}")).collect();
                            println!("  {day}: {}", text.join(", "));
                        }
                    }
                }
            } else {
                let mates = app.search.classmates_in_course(&email, &course)?;
                if mates.is_empty() {
                    println!("No classmates found");
                }
                for mate in mates {
                    println!("{} ({})", mate.name, mate.email);
                }
            }
        }
        Commands::Overlap { email, course } => {
            let overlaps = app.search.overlap_with_classmates(&email, &course)?;
            if overlaps.is_empty() {
                println!("No classmates found");
            }
            for mate in overlaps {
                println!("{} ({}): {} min", mate.name, mate.email, mate.total_minutes);
                for (day, windows) in &mate.overlaps {
                    for w in windows {
                        println!("  {day} {} - {} ({} min)", w.start, w.end, w.minutes);
                    }
                }
            }
        }
        Commands::Propose { from, to, course, day, start, end, message } => {
            let session = app.sessions.propose(&Proposal {
                requester: &from,
                invitee: &to,
                course: &course,
                day: &day,
                start: &start,
                end: &end,
                message: message.as_deref(),
            })?;
            println!("Proposed session #{}", session.id);
            print_session(&session);
        }
        Commands::Respond { id, email, action } => {
            let action: SessionAction = action.parse()?;
            let session = app.sessions.respond(id, &email, action)?;
            println!("Session #{} {}", session.id, session.status);
        }
        Commands::Incoming { email } => print_sessions(&app.sessions.incoming_requests(&email)?),
        Commands::Outgoing { email } => print_sessions(&app.sessions.outgoing_requests(&email)?),
        Commands::Sessions { email } => print_sessions(&app.sessions.confirmed_sessions(&email)?),
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for command output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn print_slots(slots: &[Interval]) {
    if slots.is_empty() {
        println!("No availability");
    }
    for (i, slot) in slots.iter().enumerate() {
        println!(
            "{}. {} {} - {}",
            i + 1,
            slot.day,
            format12(slot.start),
            format12(slot.end)
        );
    }
}

fn print_session(s: &StudySession) {
    println!(
        "  #{} {} {} {} - {} | {} -> {} [{}]",
        s.id,
        s.course,
        s.day,
        format12(s.start),
        format12(s.end),
        s.requester,
        s.invitee,
        s.status
    );
    if let Some(message) = &s.message {
        println!("  Message: {message}");
    }
}

fn print_sessions(sessions: &[StudySession]) {
    if sessions.is_empty() {
        println!("No sessions");
    }
    for s in sessions {
        print_session(s);
    }
}

//! registrar CLI
//!
//! Command-line interface over a student data file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use registrar::config::DEFAULT_DATA_FILE;
use registrar::report::{fee_history, report_card, summary_line, SUMMARY_HEADER};
use registrar::{Config, Portal, RegistrarError, Result, StudentId};
use tracing_subscriber::{fmt, EnvFilter};

/// registrar CLI
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(about = "Student records with marks and fees, kept in a JSON file")]
#[command(version)]
struct Args {
    /// Path to the JSON data file
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Do not copy a corrupt data file aside before repairing it
    #[arg(long)]
    no_backup: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        branch: String,

        /// Year of study (1-5)
        #[arg(long)]
        year: u8,
    },

    /// List all students
    List,

    /// Print the report card for a student
    Show {
        id: StudentId,
    },

    /// Delete a student
    Delete {
        id: StudentId,
    },

    /// Manage a student's fees
    #[command(subcommand)]
    Fees(FeesCommand),

    /// Manage a student's marks
    #[command(subcommand)]
    Marks(MarksCommand),
}

#[derive(Subcommand, Debug)]
enum FeesCommand {
    /// Set the total fees due
    SetTotal { id: StudentId, total: f64 },

    /// Record a payment
    Pay { id: StudentId, amount: f64 },

    /// Show every recorded payment
    History { id: StudentId },
}

#[derive(Subcommand, Debug)]
enum MarksCommand {
    /// Set or update the score for a subject
    Set {
        id: StudentId,
        subject: String,
        score: f64,
    },

    /// Remove the score for a subject
    Remove { id: StudentId, subject: String },
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, so stdout stays clean for output)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,registrar=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_file(&args.data_file)
        .backup_corrupt(!args.no_backup)
        .build();

    match run(config, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            if e.is_storage() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(config: Config, command: Commands) -> Result<()> {
    let mut portal = Portal::open(config)?;

    match command {
        Commands::Add { name, branch, year } => {
            let id = portal.add_student(&name, &branch, year)?;
            println!("Added {}", summary_line(lookup(&portal, id)?));
        }
        Commands::List => {
            let students = portal.students();
            if students.is_empty() {
                println!("No students found.");
            } else {
                println!("{SUMMARY_HEADER}");
                for student in students {
                    println!("{}", summary_line(student));
                }
            }
        }
        Commands::Show { id } => {
            print!("{}", report_card(lookup(&portal, id)?));
        }
        Commands::Delete { id } => {
            let student = portal.delete_student(id)?;
            println!("Deleted student {} ({})", student.id(), student.name());
        }
        Commands::Fees(FeesCommand::SetTotal { id, total }) => {
            portal.set_total_fees(id, total)?;
            println!("Total fees set. {}", summary_line(lookup(&portal, id)?));
        }
        Commands::Fees(FeesCommand::Pay { id, amount }) => {
            portal.pay_fees(id, amount)?;
            println!("Payment recorded. {}", summary_line(lookup(&portal, id)?));
        }
        Commands::Fees(FeesCommand::History { id }) => {
            print!("{}", fee_history(lookup(&portal, id)?));
        }
        Commands::Marks(MarksCommand::Set { id, subject, score }) => {
            portal.set_mark(id, &subject, score)?;
            println!("Mark set. {}", summary_line(lookup(&portal, id)?));
        }
        Commands::Marks(MarksCommand::Remove { id, subject }) => {
            if portal.remove_mark(id, &subject)? {
                println!("Mark removed.");
            } else {
                println!("Subject '{}' not found.", subject.trim());
            }
        }
    }

    Ok(())
}

fn lookup(portal: &Portal, id: StudentId) -> Result<&registrar::Student> {
    portal.student(id).ok_or(RegistrarError::NotFound(id))
}

//! Dentister CLI - terminal front end for the clinic records store

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dentister_core::config::{self, Config};
use dentister_core::seed::{self, SeedOptions};
use dentister_core::{AdbDialer, BulkDelete, Database, Dialer, DoctorFilter, MeetingType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dentister")]
#[command(version)]
#[command(about = "Patient records, meetings, transfers and payments for a dental clinic")]
#[command(long_about = r#"
Dentister keeps a single clinic's records in a local SQLite file.

Example usage:
  dentister seed --patients 40
  dentister patients --doctor 1
  dentister meetings implant
  dentister delete-day transfers 2024-03-10 --direction incoming
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    fn transfer_type(self) -> bool {
        matches!(self, Direction::Incoming)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    Meetings,
    Transfers,
    Payments,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the database with demo data
    Seed {
        /// Number of patients to generate
        #[arg(short, long, default_value = "40")]
        patients: usize,

        /// Keep existing rows instead of wiping the tables first
        #[arg(long)]
        keep: bool,

        /// RNG seed for a reproducible data set
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List patients, newest first
    Patients {
        /// Doctor code, or "any"
        #[arg(long, default_value = "any")]
        doctor: String,
    },

    /// Search patients by name or phone number
    Search {
        query: String,

        #[arg(long, default_value = "any")]
        doctor: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Print a patient's full file as JSON
    Show { id: i64 },

    /// List meetings of one type, or all meetings on a day
    Meetings {
        /// general, implant or braces
        #[arg(default_value = "general")]
        meeting_type: String,

        /// Show every meeting on this date (YYYY-MM-DD) instead
        #[arg(long)]
        on: Option<NaiveDate>,

        #[arg(long, default_value = "any")]
        doctor: String,
    },

    /// List transfers
    Transfers {
        #[arg(long, value_enum)]
        direction: Option<Direction>,

        #[arg(long, default_value = "any")]
        doctor: String,
    },

    /// List payments
    Payments {
        #[arg(long, default_value = "any")]
        doctor: String,
    },

    /// Delete every record of a kind on one date
    DeleteDay {
        #[arg(value_enum)]
        kind: RecordKind,

        /// YYYY-MM-DD
        date: NaiveDate,

        /// Required for transfers
        #[arg(long, value_enum)]
        direction: Option<Direction>,
    },

    /// Call a phone number through the connected device
    Dial { phone: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let db_path = match cli.database {
        Some(path) => path,
        None => config.database_path()?,
    };
    config::ensure_db_dir(&db_path)?;
    let mut db = Database::open(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;

    match cli.command {
        Commands::Seed {
            patients,
            keep,
            seed: rng_seed,
        } => {
            let options = SeedOptions {
                clear: !keep,
                patients,
                ..Default::default()
            };
            let mut rng = match rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let report = seed::seed_demo(&mut db, &options, &mut rng)?;
            println!(
                "Seeded {} patients, {} meetings, {} transfers, {} payments into {}",
                report.patients,
                report.meetings,
                report.transfers,
                report.payments,
                db_path.display()
            );
        }

        Commands::Patients { doctor } => {
            let patients = db.list_patients(&DoctorFilter::parse(&doctor))?;
            if patients.is_empty() {
                println!("No patients.");
            }
            for p in patients {
                println!(
                    "#{:<5} {:<30} {:<13} dr {:<4} {} {}",
                    p.id, p.name, p.phone_num, p.doctor, p.creation_date, p.treat_type
                );
            }
        }

        Commands::Search {
            query,
            doctor,
            limit,
        } => {
            let patients = db.search_patients(&query, &DoctorFilter::parse(&doctor), limit)?;
            if patients.is_empty() {
                println!("No patients match '{}'.", query);
            }
            for p in patients {
                println!("#{:<5} {:<30} {}", p.id, p.name, p.phone_num);
            }
        }

        Commands::Show { id } => {
            println!("{}", db.patient_file(id)?.to_json()?);
        }

        Commands::Meetings {
            meeting_type,
            on,
            doctor,
        } => {
            let filter = DoctorFilter::parse(&doctor);
            let entries = match on {
                Some(date) => db.list_meetings_on(date, &filter)?,
                None => {
                    let meeting_type: MeetingType =
                        meeting_type.parse().map_err(anyhow::Error::msg)?;
                    db.list_meetings(meeting_type, &filter)?
                }
            };
            if entries.is_empty() {
                println!("No meetings.");
            }
            for e in entries {
                let m = &e.meeting;
                println!(
                    "{} {:<3} {:<8} {:<30} {:<13} {}",
                    m.date,
                    if m.time { "1st" } else { "2nd" },
                    m.meeting_type,
                    e.patient_name,
                    e.phone_num,
                    m.info.as_deref().unwrap_or("")
                );
            }
        }

        Commands::Transfers { direction, doctor } => {
            let entries = db.list_transfers(
                direction.map(Direction::transfer_type),
                &DoctorFilter::parse(&doctor),
            )?;
            if entries.is_empty() {
                println!("No transfers.");
            }
            for e in entries {
                let t = &e.transfer;
                println!(
                    "{} {:<8} {:<30} {:<13} {}",
                    t.date,
                    t.direction(),
                    e.patient_name,
                    e.phone_num,
                    t.clinic_name.as_deref().unwrap_or("")
                );
            }
        }

        Commands::Payments { doctor } => {
            let entries = db.list_payments(&DoctorFilter::parse(&doctor))?;
            if entries.is_empty() {
                println!("No payments.");
            }
            for e in entries {
                println!(
                    "{} {:>10} {}",
                    e.payment.date, e.payment.amount, e.patient_name
                );
            }
        }

        Commands::DeleteDay {
            kind,
            date,
            direction,
        } => {
            let target = match kind {
                RecordKind::Meetings => BulkDelete::Meetings { date },
                RecordKind::Payments => BulkDelete::Payments { date },
                RecordKind::Transfers => match direction {
                    Some(direction) => BulkDelete::Transfers {
                        date,
                        transfer_type: direction.transfer_type(),
                    },
                    None => bail!("--direction is required when deleting transfers"),
                },
            };
            let deleted = db.delete_bulk(target)?;
            println!("Deleted {} {} on {}", deleted, target.kind(), date);
        }

        Commands::Dial { phone } => {
            AdbDialer::new(config.dialer).dial(&phone)?;
            println!("Dialing {}", phone);
        }
    }

    Ok(())
}

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use chrono::{Datelike, Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use obd_doctor::config::Config;
use obd_doctor::connection::{
    DemoScanner, NoAdapterScanner, ReplayScanner, ScanRequest, Scanner,
};
use obd_doctor::diagnostic::{FaultCode, RecordId, ScanType};
use obd_doctor::i18n::Language;
use obd_doctor::insight::{chat_reply, explain_all, LocalInsight, ScriptedMechanic};
use obd_doctor::reporter::cli::CliReporter;
use obd_doctor::reporter::json::JsonReporter;
use obd_doctor::reporter::{score_only, share_text, Reporter};
use obd_doctor::session::DiagnosticSession;
use obd_doctor::vin::{is_valid_vin, LocalVinDecoder};

#[derive(Parser)]
#[command(name = "obd-doctor", version, about = "Score OBD2 fault codes and verify repairs")]
struct Cli {
    /// Directory holding obd-doctor.toml (defaults to current directory)
    #[arg(long, default_value = ".")]
    config: PathBuf,

    /// History file (overrides the config)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Output language
    #[arg(long, value_enum)]
    lang: Option<Language>,

    /// Output format
    #[arg(long, value_enum, default_value = "cli")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Cli,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Read fault codes and record an initial scan
    Scan {
        /// Use the simulated BMW adapter
        #[arg(long)]
        demo: bool,

        /// Replay a readout JSON file instead of connecting
        #[arg(long)]
        from: Option<PathBuf>,

        /// Only output the health score (0-100)
        #[arg(long)]
        score: bool,
    },

    /// Rescan after repair and compare with the initial scan
    Verify {
        /// VIN to verify (defaults to the latest initial scan)
        #[arg(long)]
        vin: Option<String>,

        #[arg(long)]
        demo: bool,

        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Inspect or edit scan history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Explain fault codes using the local database
    Explain {
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Identify a vehicle from its VIN without scanning
    Vin { vin: String },

    /// Print a shareable text report (defaults to the newest record)
    Share { id: Option<RecordId> },

    /// Print simulated live sensor samples
    Live {
        #[arg(long, default_value_t = 5)]
        samples: usize,
    },

    /// Ask the mechanic about a recorded scan
    Chat {
        message: String,

        /// Record to discuss (defaults to the newest)
        #[arg(long)]
        id: Option<RecordId>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recorded scans, newest first
    List,
    /// Number of scans this month
    Stats,
    /// Delete one record
    Delete { id: RecordId },
    /// Delete every record
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn scanner_for(demo: bool, from: Option<&Path>) -> Box<dyn Scanner> {
    match from {
        Some(path) => Box::new(ReplayScanner::new(path)),
        None if demo => Box::new(DemoScanner::new()),
        None => Box::new(NoAdapterScanner),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load(&cli.config)?;
    let lang = cli.lang.unwrap_or(config.general.language);
    let history_path = cli
        .history
        .clone()
        .unwrap_or_else(|| config.history_path(&cli.config));
    let fallback_year = config
        .vehicle
        .fallback_year
        .unwrap_or_else(|| Local::now().year());

    let mut session = DiagnosticSession::open(
        &history_path,
        config.history.max_entries,
        LocalVinDecoder::new(fallback_year),
        lang,
    )
    .with_fallback_year(config.vehicle.fallback_year);

    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Cli => Box::new(CliReporter),
        OutputFormat::Json => Box::new(JsonReporter),
    };

    match cli.command {
        Command::Scan { demo, from, score } => {
            let mut scanner = scanner_for(demo, from.as_deref());
            let request = ScanRequest::initial(demo);
            let outcome = match session.scan(scanner.as_mut(), &request) {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            if score {
                print!("{}", score_only(&outcome.record));
            } else {
                print!("{}", reporter.format(&outcome.record, None, lang));
            }
        }
        Command::Verify { vin, demo, from } => {
            let vin = match vin {
                Some(vin) => vin,
                None => session
                    .history()
                    .iter()
                    .find(|r| r.scan_type() == ScanType::Initial)
                    .map(|r| r.vin().to_string())
                    .ok_or("no initial scan in history; pass --vin")?,
            };
            let device_name = session
                .history()
                .find_latest_by_vin_and_type(&vin, ScanType::Initial)
                .map(|r| r.vehicle_name())
                .filter(|name| !name.is_empty());
            let mut scanner = scanner_for(demo, from.as_deref());
            let request = ScanRequest::post_repair(vin, device_name, demo);
            let outcome = match session.scan(scanner.as_mut(), &request) {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            print!(
                "{}",
                reporter.format(&outcome.record, outcome.comparison.as_ref(), lang)
            );
        }
        Command::History { action } => match action {
            HistoryAction::List => {
                let monthly = session.history().monthly_count(&Local::now());
                print!("{}", reporter.format_history(session.history(), monthly, lang));
            }
            HistoryAction::Stats => {
                println!("{}", session.history().monthly_count(&Local::now()));
            }
            HistoryAction::Delete { id } => {
                if session.history_mut().remove(id).is_none() {
                    return Err(format!("no record with id {id}").into());
                }
                session.persist()?;
            }
            HistoryAction::Clear => {
                session.history_mut().clear();
                session.persist()?;
            }
        },
        Command::Explain { codes } => {
            let faults: Vec<FaultCode> = codes
                .iter()
                .map(|code| FaultCode::from_code(code, lang))
                .collect();
            for fault in &faults {
                if !obd_doctor::catalog::is_well_formed(&fault.code) {
                    tracing::warn!(code = %fault.code, "code does not look like an OBD2 trouble code");
                }
            }
            let insights = explain_all(&LocalInsight, &faults, lang);
            print!("{}", reporter.format_insights(&insights, lang));
        }
        Command::Vin { vin } => {
            if !is_valid_vin(&vin) {
                tracing::warn!(vin = %vin, "VIN is not 17 valid characters");
            }
            let identity = session.lookup_vehicle(&vin, Utc::now());
            println!(
                "{} {} ({})",
                identity.make, identity.model, identity.year
            );
        }
        Command::Share { id } => {
            let record = match id {
                Some(id) => session.history().get(id),
                None => session.history().latest(),
            }
            .ok_or("no matching record in history")?;
            println!("{}", share_text(record, lang));
        }
        Command::Live { samples } => {
            let mut scanner = DemoScanner::new();
            for _ in 0..samples {
                let sample = scanner.live_sample();
                println!("{}", serde_json::to_string(&sample)?);
            }
        }
        Command::Chat { message, id } => {
            let record = match id {
                Some(id) => session.history().get(id),
                None => session.history().latest(),
            };
            println!(
                "{}",
                chat_reply(&ScriptedMechanic, &[], &message, record, lang)
            );
        }
    }
    Ok(())
}

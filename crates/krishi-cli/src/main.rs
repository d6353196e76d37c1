#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use krishi_core::{resolve_krishi_db_path, ExitCode, MachineError, ENV_KRISHI_LOG_LEVEL};
use krishi_ingest::{ingest_sources, IngestOptions};
use rusqlite::{Connection, OpenFlags};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "krishi")]
#[command(about = "Krishi climate & advisory store operations CLI")]
#[command(version)]
#[command(
    after_help = "Environment:\n  KRISHI_LOG_LEVEL   Log verbosity override\n  KRISHI_DB          Default store path"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Ingest {
        #[arg(long)]
        cyclone: PathBuf,
        #[arg(long)]
        groundwater: PathBuf,
        #[arg(long)]
        advisory: PathBuf,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    InspectDb {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long, default_value_t = 5)]
        sample_rows: usize,
    },
    States {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    Districts {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long = "state")]
        states: Vec<String>,
    },
    Years,
    Keywords {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    AvgGroundwater {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long = "state")]
        states: Vec<String>,
        #[arg(long = "year")]
        years: Vec<i64>,
    },
    CycloneSummary {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long = "year")]
        years: Vec<i64>,
    },
    Trend {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long = "district", required = true)]
        districts: Vec<String>,
    },
    Search {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long = "state")]
        states: Vec<String>,
        #[arg(long = "district")]
        districts: Vec<String>,
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    let json = cli.json;
    match run(cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            if json {
                let machine = MachineError::new("command_failed", &err);
                match serde_json::to_string(&machine) {
                    Ok(payload) => eprintln!("{payload}"),
                    Err(_) => eprintln!("{err}"),
                }
            } else {
                eprintln!("{err}");
            }
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let default_level = if quiet {
        "error"
    } else if verbose > 0 {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env(ENV_KRISHI_LOG_LEVEL)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), String> {
    let json = cli.json;
    match cli.command {
        Commands::Ingest {
            cyclone,
            groundwater,
            advisory,
            db,
        } => run_ingest(cyclone, groundwater, advisory, resolve_db(db), json),
        Commands::InspectDb { db, sample_rows } => inspect_db(&resolve_db(db), sample_rows, json),
        Commands::States { db } => emit_list(
            krishi_query::list_states(&resolve_db(db)).map_err(|e| e.to_string())?,
            json,
        ),
        Commands::Districts { db, states } => emit_list(
            krishi_query::list_districts(&resolve_db(db), &states).map_err(|e| e.to_string())?,
            json,
        ),
        Commands::Years => emit_list(krishi_query::filter_year_labels(), json),
        Commands::Keywords { db } => emit_list(
            krishi_query::list_keywords(&resolve_db(db)).map_err(|e| e.to_string())?,
            json,
        ),
        Commands::AvgGroundwater { db, states, years } => {
            avg_groundwater(&resolve_db(db), &states, &years, json)
        }
        Commands::CycloneSummary { db, years } => {
            let rows =
                krishi_query::cyclone_rows(&resolve_db(db), &years).map_err(|e| e.to_string())?;
            emit_rows(&rows, json)
        }
        Commands::Trend { db, districts } => {
            let rows = krishi_query::groundwater_trend(&resolve_db(db), &districts)
                .map_err(|e| e.to_string())?;
            emit_rows(&rows, json)
        }
        Commands::Search {
            db,
            states,
            districts,
            keywords,
        } => {
            let rows = krishi_query::advisory_search(&resolve_db(db), &states, &districts, &keywords)
                .map_err(|e| e.to_string())?;
            emit_rows(&rows, json)
        }
    }
}

fn resolve_db(db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(resolve_krishi_db_path)
}

fn emit_list(values: Vec<String>, json: bool) -> Result<(), String> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&values).map_err(|e| e.to_string())?
        );
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}

fn emit_rows<T: serde::Serialize>(rows: &[T], json: bool) -> Result<(), String> {
    if json {
        println!("{}", serde_json::to_string(rows).map_err(|e| e.to_string())?);
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row).map_err(|e| e.to_string())?);
        }
    }
    Ok(())
}

fn run_ingest(
    cyclone: PathBuf,
    groundwater: PathBuf,
    advisory: PathBuf,
    db: PathBuf,
    json: bool,
) -> Result<(), String> {
    let result = ingest_sources(&IngestOptions {
        cyclone_path: cyclone,
        groundwater_path: groundwater,
        advisory_path: advisory,
        db_path: db,
    })
    .map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            json!({ "db_path": result.db_path, "summary": result.summary })
        );
    } else {
        println!("store written: {}", result.db_path.display());
        println!("climate_rows={}", result.summary.climate_rows);
        println!("advisory_rows={}", result.summary.advisory_rows);
        println!("cyclone_years={}", result.summary.cyclone_years);
        println!("imputed_levels={}", result.summary.imputed_levels);
        println!(
            "districts_without_observations={}",
            result.summary.districts_without_observations
        );
        println!(
            "cyclone_sha256={}",
            result.summary.input_hashes.cyclone_sha256
        );
        println!(
            "groundwater_sha256={}",
            result.summary.input_hashes.groundwater_sha256
        );
        println!(
            "advisory_sha256={}",
            result.summary.input_hashes.advisory_sha256
        );
    }
    Ok(())
}

fn avg_groundwater(db: &Path, states: &[String], years: &[i64], json: bool) -> Result<(), String> {
    let avg =
        krishi_query::average_groundwater(db, states, years).map_err(|e| e.to_string())?;
    if json {
        println!("{}", json!({ "average_groundwater": avg }));
    } else {
        match avg {
            Some(value) => println!("average_groundwater={value:.2}"),
            None => println!("average_groundwater=none"),
        }
    }
    Ok(())
}

fn inspect_db(db: &Path, sample_rows: usize, json: bool) -> Result<(), String> {
    let conn = Connection::open_with_flags(db, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| format!("failed to open store {}: {e}", db.display()))?;
    let climate_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM climate_agri", [], |r| r.get(0))
        .map_err(|e| e.to_string())?;
    let advisory_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM kcc_telangana", [], |r| r.get(0))
        .map_err(|e| e.to_string())?;

    let mut stmt = conn
        .prepare(
            "SELECT district, year, groundwater_level FROM climate_agri
             ORDER BY district, year LIMIT ?1",
        )
        .map_err(|e| e.to_string())?;
    let sample = stmt
        .query_map([sample_rows as i64], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<f64>>(2)?,
            ))
        })
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            json!({
                "climate_rows": climate_count,
                "advisory_rows": advisory_count,
                "sample_rows": sample,
            })
        );
    } else {
        println!("climate_rows={climate_count}");
        println!("advisory_rows={advisory_count}");
        println!(
            "sample_rows={}",
            serde_json::to_string(&sample).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
// Suppress clippy warnings about unknown/renamed dylint lint names
#![allow(unknown_lints, renamed_and_removed_lints, max_lines_per_file)]
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

mod logging;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use kakurenbo::{load_schema_file, EntityType, MemoryStore, SqlFragment};
use logging::{default_log_dir, init_logging, parse_level, parse_rotation, LogConfig, LOG_FILENAME};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Print the SQL that selects an entity's deleted or visible rows
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Schema file (TOML) describing entities, relations and soft-delete options
    #[arg(short, long, env = "KAKURENBO_SCHEMA")]
    schema: PathBuf,

    /// Entity to query
    entity: String,

    /// Which side of the deleted-set to select
    #[arg(long, env = "KAKURENBO_SCOPE", value_enum, default_value_t = Scope::WithoutDeleted)]
    scope: Scope,

    /// Output format
    #[arg(long, env = "KAKURENBO_FORMAT", value_enum, default_value_t = Format::Sql)]
    format: Format,

    /// Enable JSON log format
    #[arg(long, env = "KAKURENBO_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "KAKURENBO_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Also write logs to a directory (default: ~/.kakurenbo/logs)
    #[arg(long, env = "KAKURENBO_LOG_DIR", num_args = 0..=1)]
    log_dir: Option<Option<PathBuf>>,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "KAKURENBO_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Scope {
    OnlyDeleted,
    WithoutDeleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Sql,
    Json,
}

#[derive(Serialize)]
struct ScopeOutput<'a> {
    entity: &'a str,
    scope: Scope,
    #[serde(flatten)]
    fragment: &'a SqlFragment,
}

fn write_sql<W: Write>(out: &mut W, fragment: &SqlFragment) -> std::io::Result<()> {
    writeln!(out, "{};", fragment.sql)?;
    for (i, param) in fragment.params.iter().enumerate() {
        writeln!(out, "-- ${} = {}", i.saturating_add(1), param)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args
        .log_dir
        .map(|dir| dir.unwrap_or_else(default_log_dir));
    let log_config = LogConfig {
        log_dir: log_dir.clone(),
        log_level: parse_level(&args.log_level),
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
    };
    if let Err(e) = init_logging(&log_config) {
        if let Some(dir) = &log_dir {
            eprintln!("Logs: {}", dir.join(LOG_FILENAME).display());
        }
        return Err(e);
    }

    let schema = load_schema_file(&args.schema)?;
    let engine = schema.build_engine(MemoryStore::new())?;
    let entity = EntityType::new(args.entity);
    let query = engine.query(&entity)?;
    let query = match args.scope {
        Scope::OnlyDeleted => query.only_deleted()?,
        Scope::WithoutDeleted => query.without_deleted()?,
    };
    let fragment = query.to_sql();
    info!(
        "Rendered {:?} scope of {} with {} parameters",
        args.scope,
        entity,
        fragment.params.len()
    );

    let mut out = std::io::stdout().lock();
    match args.format {
        Format::Sql => write_sql(&mut out, &fragment)?,
        Format::Json => {
            let output = ScopeOutput {
                entity: entity.as_str(),
                scope: args.scope,
                fragment: &fragment,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }
    Ok(())
}

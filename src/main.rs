use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use snipeit_inventory::config::Config;
use snipeit_inventory::reconcile::{
    reconcile_category, reconcile_entry, reconcile_model, CategorySpec, EntrySpec, ModelSpec,
    Outcome, State,
};
use snipeit_inventory::snipeit::categories::CategoryType;
use snipeit_inventory::snipeit::hardware::DEFAULT_STATUS_ID;
use snipeit_inventory::snipeit::SnipeClient;
use snipeit_inventory::VERSION;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Idempotently manage Snipe-IT categories, models and hardware entries
#[derive(Parser, Debug)]
#[command(name = "snipeit", version = VERSION, about, long_about = None)]
struct Args {
    /// Base URL of the Snipe-IT instance
    #[arg(long, env = "SNIPEIT_URL", global = true)]
    snipe_url: Option<String>,

    /// API key used as bearer token
    #[arg(long, env = "SNIPEIT_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Report what would change without changing anything
    #[arg(long, global = true)]
    check: bool,

    /// Config file (JSON or YAML); defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ensure a category exists (or not)
    Category {
        /// Unique per category type
        #[arg(long)]
        name: String,

        #[arg(long, value_enum)]
        category_type: CategoryType,

        #[arg(long, value_enum, default_value = "present")]
        state: State,
    },

    /// Ensure an asset model exists with the given category and manufacturer
    Model {
        #[arg(long)]
        name: String,

        /// Name of a category of type "asset"; required when state is present
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        manufacturer_id: Option<u64>,

        #[arg(long, value_enum, default_value = "present")]
        state: State,
    },

    /// Ensure a hardware entry exists with the given model and status
    Entry {
        /// Unique identifier of the entry
        #[arg(long)]
        asset_tag: String,

        /// Required when state is present
        #[arg(long)]
        model_name: Option<String>,

        /// Status label id (2 is "Ready to Deploy" on a fresh instance)
        #[arg(long, default_value_t = DEFAULT_STATUS_ID)]
        status_id: u64,

        #[arg(long, value_enum, default_value = "present")]
        state: State,
    },
}

impl Command {
    /// Key under which the record id is reported
    fn id_key(&self) -> &'static str {
        match self {
            Command::Category { .. } => "category_id",
            Command::Model { .. } => "model_id",
            Command::Entry { .. } => "asset_id",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Stdout carries the JSON result, so logs go to stderr or a file
fn setup_logging(
    level: LogLevel,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let (non_blocking, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("snipeit {} started with log level: {:?}", VERSION, level);

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level, args.log_file.as_ref()) {
        Ok(guard) => guard,
        Err(err) => {
            println!("{}", failure_json(&err));
            return ExitCode::FAILURE;
        }
    };

    match run(&args).await {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            println!("{}", failure_json(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<Value> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let url = config.effective_url(args.snipe_url.as_deref())?;
    let api_key = config.effective_api_key(args.api_key.as_deref())?;
    let client = SnipeClient::new(&url, &api_key, config.effective_timeout())?;
    tracing::info!("Using Snipe-IT at {} (check mode: {})", client.base_url(), args.check);

    let outcome = match &args.command {
        Command::Category {
            name,
            category_type,
            state,
        } => {
            let spec = CategorySpec {
                name: name.clone(),
                category_type: *category_type,
                state: *state,
            };
            reconcile_category(&client, &spec, args.check)
                .await
                .with_context(|| format!("Failed to reconcile category '{}'", name))?
        }
        Command::Model {
            name,
            category,
            manufacturer_id,
            state,
        } => {
            let spec = ModelSpec {
                name: name.clone(),
                category: category.clone(),
                manufacturer_id: *manufacturer_id,
                state: *state,
            };
            reconcile_model(&client, &spec, args.check)
                .await
                .with_context(|| format!("Failed to reconcile model '{}'", name))?
        }
        Command::Entry {
            asset_tag,
            model_name,
            status_id,
            state,
        } => {
            let spec = EntrySpec {
                asset_tag: asset_tag.clone(),
                model_name: model_name.clone(),
                status_id: *status_id,
                state: *state,
            };
            reconcile_entry(&client, &spec, args.check)
                .await
                .with_context(|| format!("Failed to reconcile entry '{}'", asset_tag))?
        }
    };

    tracing::info!("{:?}", outcome);
    Ok(result_json(args.command.id_key(), &outcome, args.check))
}

fn result_json(id_key: &str, outcome: &Outcome, check_mode: bool) -> Value {
    let mut result = json!({
        "changed": outcome.changed,
        "action": outcome.action,
        "check_mode": check_mode,
    });
    result[id_key] = json!(outcome.id);
    result
}

fn failure_json(err: &anyhow::Error) -> Value {
    json!({
        "failed": true,
        "changed": false,
        "msg": format!("{:#}", err),
    })
}

//! boundlog command line.
//!
//! # Commands
//!
//! ```text
//! boundlog [--config FILE] [--level L] render [INPUT] [--depth N] [--max-keys N] ...
//!     JSON from INPUT (or stdin) → serializer limits → indented JSON on stdout
//!
//! boundlog [--config FILE] consent status|agree [--dont-show-again]|cancel
//!     disclaimer state stored at consent.state_path
//! ```
//!
//! `BOUNDLOG_LEVEL` seeds the process-wide level override before any logger
//! is built; `--level` and `logging.level` are explicit and take precedence.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boundlog::config::{load_config, BoundlogConfig};
use boundlog::consent::{ConsentGate, FileConsentStore, GateView};
use boundlog::logging::{set_level_override, LogLevel, Logger};
use boundlog::serialize::{safe_stringify, ObjectRef, SerializeOptions, Value};

#[derive(Parser)]
#[command(name = "boundlog")]
#[command(about = "Bounded JSON rendering for diagnostic logging", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level for this run's loggers (debug, info, warn, error, silent)
    #[arg(short, long)]
    level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document through the serializer limits
    Render {
        /// Input file; stdin when omitted
        input: Option<PathBuf>,

        #[arg(long)]
        depth: Option<usize>,

        #[arg(long)]
        max_keys: Option<usize>,

        #[arg(long)]
        max_array_length: Option<usize>,

        #[arg(long)]
        max_string_length: Option<usize>,
    },
    /// Inspect or change the stored disclaimer consent
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
}

#[derive(Subcommand)]
enum ConsentAction {
    /// Show whether the disclaimer or the app would be displayed
    Status,
    /// Record agreement
    Agree {
        #[arg(long)]
        dont_show_again: bool,
    },
    /// Record refusal
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boundlog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(level) = std::env::var("BOUNDLOG_LEVEL") {
        set_level_override(level)?;
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BoundlogConfig::default(),
    };

    let logger_for = |name: &str| {
        let builder = Logger::builder(name).config(&config.logging);
        match cli.level {
            Some(level) => builder.level(level).build(),
            None => builder.build(),
        }
    };
    let logger = logger_for("cli");

    match cli.command {
        Commands::Render {
            input,
            depth,
            max_keys,
            max_array_length,
            max_string_length,
        } => {
            let mut options = config.logging.serialize;
            if let Some(depth) = depth {
                options = options.with_depth(depth);
            }
            if let Some(max_keys) = max_keys {
                options = options.with_max_keys(max_keys);
            }
            if let Some(max_array_length) = max_array_length {
                options = options.with_max_array_length(max_array_length);
            }
            if let Some(max_string_length) = max_string_length {
                options = options.with_max_string_length(max_string_length);
            }
            render(&logger, input, &options).await?;
        }
        Commands::Consent { action } => {
            let store = FileConsentStore::new(&config.consent.state_path);
            let mut gate = ConsentGate::open(store, logger_for("consent")).await?;
            let view = match action {
                ConsentAction::Status => gate.view(),
                ConsentAction::Agree { dont_show_again } => gate.agree(dont_show_again).await?,
                ConsentAction::Cancel => {
                    gate.cancel().await?;
                    gate.view()
                }
            };
            match view {
                GateView::MainApp => println!("agreed"),
                GateView::Modal {
                    default_dont_show_again,
                } => println!("disclaimer pending (dont_show_again default: {default_dont_show_again})"),
            }
        }
    }

    Ok(())
}

async fn render(
    logger: &Logger,
    input: Option<PathBuf>,
    options: &SerializeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match &input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };

    let details = ObjectRef::new();
    details.insert("source", input.as_ref().map(|path| path.display().to_string()));
    details.insert("bytes", text.len());
    details.insert("options", Value::capture(options));
    logger.debug("Rendering input", Some(&Value::from(details)), &[]);

    let document: serde_json::Value = match serde_json::from_str(&text) {
        Ok(document) => document,
        Err(e) => {
            logger.error("Input is not valid JSON", Some(&Value::from_error(&e)), &[]);
            return Err(e.into());
        }
    };

    println!("{}", safe_stringify(&Value::from(document), options));
    Ok(())
}

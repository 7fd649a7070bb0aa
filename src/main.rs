//! Weather Uncle - Singapore weather, air quality and traffic assistant.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weather_uncle::analysis::CheckKind;
use weather_uncle::bot::{BotError, BotRunner, Responder, TelegramTransport};
use weather_uncle::config::{BotConfig, ConfigLoader};
use weather_uncle::display;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CheckArg {
    Jogging,
    Children,
    Laundry,
    Picnic,
    Rain,
    Haze,
    All,
}

impl CheckArg {
    fn kinds(self) -> Vec<CheckKind> {
        match self {
            Self::Jogging => vec![CheckKind::Jogging],
            Self::Children => vec![CheckKind::ChildPlay],
            Self::Laundry => vec![CheckKind::Laundry],
            Self::Picnic => vec![CheckKind::Picnic],
            Self::Rain => vec![CheckKind::RainPrediction],
            Self::Haze => vec![CheckKind::HazeRisk],
            Self::All => CheckKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "weather-uncle",
    about = "Singapore weather, air quality and traffic assistant",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: search .weather-uncle.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot.
    Run,
    /// Fetch every feed and print the dashboard.
    Dashboard,
    /// Print one or all safety assessments.
    Check {
        #[arg(value_enum, default_value_t = CheckArg::All)]
        kind: CheckArg,
    },
    /// Ask a one-off question.
    Ask {
        /// The question, in plain words.
        question: String,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<BotConfig, BotError> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    Ok(loader.load()?)
}

fn credential_present(env: &str) -> bool {
    std::env::var(env).is_ok_and(|v| !v.trim().is_empty())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

async fn run_bot(config: &BotConfig, responder: Responder) {
    let telegram_ok = credential_present(&config.telegram.token_env);
    display::print_credential(&config.telegram.token_env, telegram_ok);
    display::print_credential(&config.ai.api_key_env, responder.has_model());

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown requested");
        signal_cancel.cancel();
    });

    match TelegramTransport::from_env(&config.telegram) {
        Ok(transport) => {
            BotRunner::new(Arc::new(transport), Arc::new(responder))
                .with_cancellation(cancel)
                .run()
                .await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Telegram transport unavailable, idling until shutdown");
            cancel.cancelled().await;
        }
    }
}

async fn run(cli: Cli) -> Result<(), BotError> {
    let config = load_config(cli.config)?;
    let responder = Responder::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&config, responder).await,
        Commands::Dashboard => display::print_card(&responder.dashboard().await),
        Commands::Check { kind } => {
            for kind in kind.kinds() {
                display::print_card(&responder.check(kind).await);
                println!();
            }
        }
        Commands::Ask { question } => {
            let reply = responder.answer(&question).await;
            display::print_reply(&question, &reply);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

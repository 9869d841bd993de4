//! Exceptional CLI - Day-off requests from your terminal

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{admin, auth, demo, list, request};

/// Exceptional - day-off requests from your terminal
#[derive(Parser)]
#[command(name = "exc", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the day-off server
    Login {
        /// Email address (prompted for when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Request a password reset email
    ResetPassword {
        /// Email address (prompted for when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// List your day-off requests
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request a day off
    Request {
        /// Date to request (YYYY-MM-DD)
        date: NaiveDate,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cancel one of your day-off requests
    Cancel {
        /// ID of the request to cancel
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Review and decide requests (superusers only)
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommands,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warnings only)
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => auth::run_login(email, password).await,
        Commands::Logout => auth::run_logout(),
        Commands::ResetPassword { email } => auth::run_reset_password(email).await,
        Commands::List { json } => list::run(json).await,
        Commands::Request { date, yes, json } => request::run_request(date, yes, json).await,
        Commands::Cancel { id, yes } => request::run_cancel(&id, yes).await,
        Commands::Admin { command } => admin::run(command).await,
        Commands::Demo { command } => demo::run(command),
    }
}

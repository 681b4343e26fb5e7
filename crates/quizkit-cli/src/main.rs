//! quizkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Command-line client for the quiz service")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the quiz service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List topics derived from the quiz catalog
    Topics,

    /// List quizzes
    Quizzes {
        /// Filter by topic id
        #[arg(long)]
        topic: Option<String>,

        /// Only active quizzes
        #[arg(long)]
        active: bool,
    },

    /// Show a quiz with its ordered question list
    Show {
        /// Quiz id
        #[arg(long)]
        quiz: String,
    },

    /// Play a quiz: start a session, answer every question, submit
    Play {
        /// Quiz id
        #[arg(long)]
        quiz: String,
    },

    /// Show results and per-question review for a submitted session
    Results {
        /// Session id
        #[arg(long)]
        session: String,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Topics => commands::topics::execute(cli.config, cli.base_url).await,
        Commands::Quizzes { topic, active } => {
            commands::quizzes::execute(cli.config, cli.base_url, topic, active).await
        }
        Commands::Show { quiz } => commands::show::execute(cli.config, cli.base_url, quiz).await,
        Commands::Play { quiz } => commands::play::execute(cli.config, cli.base_url, quiz).await,
        Commands::Results { session } => {
            commands::results::execute(cli.config, cli.base_url, session).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

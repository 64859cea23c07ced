mod agent;
mod chat;
mod classify;
mod config;
mod markdown;
mod openai;
mod repl;
mod respond;
mod search;
mod session;

pub const USER_AGENT: &str = concat!("courtside/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::{info, warn};

use chat::Chat;
use config::{Config, DEFAULT_MAX_TURNS};
use openai::OpenAiClient;
use respond::Orchestrator;
use search::{DuckDuckGo, WebSearchTool};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "courtside", version, about = "Basketball results chatbot with web search")]
struct Cli {
    /// Model identifier (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Maximum model round-trips per answer
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a single question and exit
    Ask {
        /// Question text
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courtside=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        warn!(error = %e, "failed to load .env");
    }

    let config = match Config::from_env() {
        Ok(config) => config.with_model(cli.model).with_max_turns(cli.max_turns),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    let orchestrator = Orchestrator::new(
        OpenAiClient::new(http.clone(), &config),
        WebSearchTool::new(DuckDuckGo::new(http)),
        config.model.clone(),
        config.max_turns,
    );
    let mut chat = Chat::new(orchestrator);

    info!(model = %config.model, "starting courtside");

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    match cli.command {
        Some(Command::Ask { message }) => {
            repl::ask(&mut chat, &message, &mut stdout, &mut stderr).await?;
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run_interactive(&mut chat, stdin, &mut stdout, &mut stderr).await?;
        }
    }

    Ok(())
}

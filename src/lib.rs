pub mod cli;
pub mod config;
pub mod health;
pub mod history;
pub mod models;
pub mod normalize;
pub mod protocol;
pub mod session;
pub mod transport;

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use cli::Args;
use config::{ConfigError, EndpointConfig};
use health::HealthError;
use session::{ChatSession, SessionOptions};
use transport::HttpTransport;

/// Failures that end the process before the question loop starts. Every
/// later error is handled inside the loop.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("backend health check failed: {0}")]
    Unreachable(#[from] HealthError),
    #[error("could not read startup input: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run(args: Args) -> Result<(), StartupError> {
    info!("--- Core Configuration ---");
    info!("Base URL: {}", args.base_url.as_deref().unwrap_or("(prompted)"));
    info!("Log Format: {}", args.log_format);
    info!(
        "Log Path: {}",
        args.log_path.as_deref().unwrap_or("(default for format)")
    );
    info!("Health Timeout: {}s", args.health_timeout_secs);
    info!("Chat Timeout: {}s", args.chat_timeout_secs);
    if let Some(top_k) = args.top_k {
        info!("Retrieval Hint top_k: {}", top_k);
    }
    info!("-------------------------");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let base_url = match args.base_url.clone() {
        Some(url) => url,
        None => prompt_for_base_url(&mut input).await?,
    };
    let endpoints = EndpointConfig::new(&base_url)?;

    let transport = Arc::new(HttpTransport::new());
    let health = health::probe(
        transport.as_ref(),
        &endpoints,
        Duration::from_secs(args.health_timeout_secs),
    )
    .await?;
    println!("Connected to RAG backend at {}", endpoints.base_url());
    if let Some(loaded) = health.model_loaded {
        println!("Model loaded: {}", loaded);
    }
    if let Some(count) = health.documents_indexed {
        println!("Documents indexed: {}", count);
    }
    println!("Type a question, 'log' for the history, or 'exit' to quit.");

    let log = history::create_session_log(&args)?;
    let options = SessionOptions {
        top_k: args.top_k,
        chat_timeout: Duration::from_secs(args.chat_timeout_secs),
    };
    let mut session = ChatSession::new(endpoints, transport, log, options);
    session.run(&mut input).await;

    Ok(())
}

async fn prompt_for_base_url<R>(input: &mut Lines<R>) -> Result<String, StartupError>
where
    R: AsyncBufRead + Unpin,
{
    print!("Enter the RAG backend base URL (e.g. https://xxxx.ngrok-free.app): ");
    let _ = std::io::stdout().flush();
    match input.next_line().await? {
        Some(line) => Ok(line),
        None => Err(ConfigError::EmptyUrl.into()),
    }
}

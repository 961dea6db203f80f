use clap::Parser;

/// Every knob is optional: run with no flags and the client prompts for the
/// backend URL and uses the defaults below.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Interactive client for a RAG question-answering backend", long_about = None)]
pub struct Args {
    /// Base URL of the RAG backend (e.g. https://xxxx.ngrok-free.app).
    /// Prompted for interactively when not provided.
    #[arg(long, env = "RAG_BASE_URL")]
    pub base_url: Option<String>,

    /// Retrieval breadth hint forwarded to the backend as `top_k`.
    #[arg(long, env = "RAG_TOP_K")]
    pub top_k: Option<u32>,

    /// Session log persistence style (append, buffered).
    #[arg(long, env = "LOG_FORMAT", default_value = "append")]
    pub log_format: String,

    /// Path of the conversation log file. Defaults to conversation_log.txt
    /// for the append style and conversation_log.json for the buffered one.
    #[arg(long, env = "LOG_PATH")]
    pub log_path: Option<String>,

    /// Timeout in seconds for the startup health probe.
    #[arg(long, env = "HEALTH_TIMEOUT_SECS", default_value = "10")]
    pub health_timeout_secs: u64,

    /// Timeout in seconds for each chat request (the alternate-payload
    /// retry counts as its own request).
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "60")]
    pub chat_timeout_secs: u64,
}

use clap::Parser;
use dotenv::dotenv;
use log::error;

use rag_console::cli::Args;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(err) = rag_console::run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

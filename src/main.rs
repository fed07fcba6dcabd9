use clap::{Parser, Subcommand};
use std::sync::Arc;

use ragchat::api::create_router;
use ragchat::api::models::ChatResponse;
use ragchat::config::Config;
use ragchat::pipeline::ChatPipeline;

#[derive(Debug, Parser)]
#[command(name = "ragchat", about = "Chat backend that grounds answers in live web results")]
struct Cli {
    /// Generation endpoint, overrides OLLAMA_API_URL
    #[arg(long, global = true)]
    ollama_url: Option<String>,

    /// Model name, overrides OLLAMA_MODEL_NAME
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the chat API (default)
    Serve {
        /// Address to listen on, overrides RAGCHAT_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Answer a single message and print the response as JSON
    Ask { message: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.ollama_url {
        config = config.with_ollama_api_url(url);
    }
    if let Some(model) = cli.model {
        config = config.with_ollama_model_name(model);
    }

    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(config.max_log_level())
        .with_target(true)
        .init();

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config = config.with_bind_addr(bind);
            }
            let bind_addr = config.bind_addr.clone();
            let pipeline = Arc::new(ChatPipeline::new(config)?);

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, create_router(pipeline)).await?;
        }
        Command::Ask { message } => {
            if message.trim().is_empty() {
                anyhow::bail!("message must not be empty");
            }
            let pipeline = ChatPipeline::new(config)?;
            let response = pipeline.answer(&message).await;
            println!("{}", serde_json::to_string_pretty(&ChatResponse { response })?);
        }
    }
    Ok(())
}

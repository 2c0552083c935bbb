use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use vocab_config::browser::Backend;

pub mod controller;
pub mod events;
pub mod io;
pub mod logging;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "vocab", version, about = "Dictionary lookups and translations")]
struct Cli {
    /// JSON config file. Environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Browser backend: chromium or http
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one or more words and print each entry as JSON
    Lookup {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Translate text between languages
    Translate {
        text: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Read words from stdin until `:quit` or end of input
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.json_logs);

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.browser.backend = backend;
    }

    let state = Arc::new(AppState::new(config)?);

    let result = match cli.command {
        Command::Lookup { words } => lookup(&state, &words).await,
        Command::Translate { text, from, to } => {
            translate(&state, &text, from.as_deref(), to.as_deref()).await
        }
        Command::Repl => repl(Arc::clone(&state)).await,
    };

    state.dictionary.close().await;
    result
}

async fn lookup(state: &AppState, words: &[String]) -> anyhow::Result<()> {
    for word in words {
        let entry = state.dictionary.lookup_word(word).await;
        println!("{}", serde_json::to_string_pretty(&entry)?);
    }

    Ok(())
}

async fn translate(
    state: &AppState,
    text: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> anyhow::Result<()> {
    let result = state.dictionary.translate_text(text, from, to).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn repl(state: Arc<AppState>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    let drained = async {
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!("Session task failed: {e}");
                    return Err(e);
                }
                Err(e) => tracing::error!("Session task panicked: {e}"),
            }
        }
        Ok(())
    };

    let result = tokio::select! {
        result = drained => result,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            Ok(())
        }
    };

    controller.shutdown();
    tasks.shutdown().await;
    result
}

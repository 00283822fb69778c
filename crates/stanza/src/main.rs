//! Stanza - line alternatives for collaborative poem writing.
//!
//! `stanza serve` runs the HTTP API; `stanza generate` prints one batch of
//! alternatives for a poem read from the argument or stdin.

use anyhow::Context;
use clap::{Parser, Subcommand};
use stanza::{LogFormat, StanzaConfig, generate_once, init_tracing, run_server};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "stanza")]
#[command(about = "Stanza - distinct next-line alternatives for a poem in progress")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults to ./stanza.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve,
    /// Generate alternatives once and print them as JSON
    Generate {
        /// Poem text; read from stdin when omitted
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format)?;

    let config = StanzaConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => run_server(&config).await?,
        Command::Generate { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buffer)
                        .await
                        .context("Failed to read poem from stdin")?;
                    buffer
                }
            };
            let alternatives = generate_once(&config, &text).await?;
            println!("{}", serde_json::to_string_pretty(&alternatives)?);
        }
    }

    Ok(())
}

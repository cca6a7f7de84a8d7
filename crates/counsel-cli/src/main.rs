use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod repl;

#[derive(Parser)]
#[command(name = "counsel")]
#[command(about = "Counsel CLI - safety-first counseling dialogue with rehearsal", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/counsel/config.toml)
    #[arg(long, global = true, env = "COUNSEL_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive counseling session
    Chat {
        /// Request a rehearsal about this topic on the first turn
        #[arg(long)]
        topic: Option<String>,
    },
    /// Run the local risk cascade over text (no external calls)
    CheckRisk {
        /// Text to check; joined with spaces
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the loaded role-play templates
    Templates,
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.json_logs);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Chat { topic } => commands::chat::run(config_path, topic).await?,
        Commands::CheckRisk { text, json } => commands::check_risk::run(config_path, &text.join(" "), json)?,
        Commands::Templates => commands::templates::run(config_path).await?,
        Commands::Config { init } => commands::config::run(config_path, init)?,
    }

    Ok(())
}

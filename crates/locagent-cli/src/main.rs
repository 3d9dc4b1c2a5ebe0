//! locagent - run location behavior agent tasks from the command line

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use locagent::config::Config;
use locagent::lexicon;
use locagent_cli::commands::{AnalyzeCommand, LexiconCommand, RunCommand, load_toolbox};
use locagent_cli::error::CliResult;
use locagent_cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "locagent")]
#[command(about = "Rank locations and write reviews as a simulated city resident")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(long, short = 'd', global = true, help = "Path to dataset JSON file")]
    pub dataset: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Run recommendation or review-writing tasks")]
    Run(RunCommand),

    #[clap(about = "Show a resident's preference summary")]
    Analyze(AnalyzeCommand),

    #[clap(about = "Ensure the sentiment lexicon is present")]
    Lexicon(LexiconCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    init_logging();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!("Config loaded: {:?}", config);

    match &cli.command {
        Command::Lexicon(cmd) => cmd.execute(&config, format).await,
        Command::Analyze(cmd) => {
            let toolbox = load_toolbox(cli.dataset.as_deref(), &config)?;
            cmd.execute(&toolbox, format)
        }
        Command::Run(cmd) => {
            if let Err(e) = lexicon::ensure_present(&config.lexicon).await {
                tracing::warn!("Sentiment lexicon unavailable: {}", e);
            }
            let toolbox = Arc::new(load_toolbox(cli.dataset.as_deref(), &config)?);
            cmd.execute(&config, toolbox, format).await
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,locagent=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

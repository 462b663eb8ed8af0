use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use scout::agent::{Agent, DEFAULT_MAX_STEPS, EXHAUSTED_MESSAGE};
use scout::providers::configs::{OpenAiProviderConfig, ProviderConfig};
use scout::providers::openai::OpenAiProvider;
use scout::RunOutcome;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The request for the research assistant
    prompt: String,

    /// Model to use (overrides OPENAI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum number of model calls before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Log every model call and tool dispatch to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "scout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config =
        OpenAiProviderConfig::from_env().context("Failed to load provider configuration")?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    tracing::info!(model = %config.model, host = %config.host, "using OpenAI provider");

    let provider = OpenAiProvider::new(config)?;
    let agent = Agent::new(Box::new(provider)).with_max_steps(cli.max_steps);

    let result = agent.reply(&cli.prompt).await?;
    match result.outcome {
        RunOutcome::Final(text) => println!("{}", text),
        RunOutcome::Exhausted => println!("{}", style(EXHAUSTED_MESSAGE).yellow()),
    }

    Ok(())
}

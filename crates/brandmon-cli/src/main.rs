mod monitor;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "brandmon")]
#[command(about = "Monitor brand mentions across LinkedIn, Instagram, YouTube and X")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search, scrape and summarize recent posts mentioning a brand
    Monitor {
        /// Brand name to search for
        #[arg(long)]
        brand: String,

        /// Results per platform (1-5)
        #[arg(long, default_value_t = 5)]
        limit: usize,

        /// LLM provider (groq or ollama); defaults to LLM_PROVIDER
        #[arg(long)]
        provider: Option<brandmon_core::LlmProvider>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the resolved configuration with secrets redacted
    Config,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = brandmon_core::load_app_config()?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Monitor {
            brand,
            limit,
            provider,
            format,
        } => {
            let provider = provider.unwrap_or(config.llm_provider);
            monitor::run_monitor(config, &brand, limit, provider, format).await
        }
        Commands::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod report;
mod run;
mod stats;

#[derive(Debug, Parser)]
#[command(name = "prospect-cli")]
#[command(about = "Daily influencer prospection pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, filter, screen, and persist qualifying profiles.
    Run {
        /// Target number of approved profiles.
        #[arg(long, default_value_t = 20)]
        count: usize,
        /// Report format(s) to write.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output_format: OutputFormat,
        /// Collect and screen without writing history or reports.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print history store statistics.
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Markdown,
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = prospect_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            count,
            output_format,
            dry_run,
        } => run::execute(&config, count, output_format, dry_run).await,
        Commands::Stats => stats::execute(&config),
    }
}

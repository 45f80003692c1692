mod analyse;
mod history;

use clap::{Parser, Subcommand};
use codetally_core::Source;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "codetally")]
#[command(about = "Aggregate coding-practice statistics across platforms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every listed account and print the combined report as JSON
    Analyse(analyse::AnalyseArgs),
    /// Print recently stored reports
    History {
        /// Maximum number of reports to show (1-100)
        #[arg(long, default_value_t = codetally_db::DEFAULT_HISTORY_LIMIT)]
        limit: i64,
        /// Print the stored reports as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the supported platforms
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = codetally_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyse(args) => analyse::run_analyse(&config, &args).await?,
        Commands::History { limit, json } => {
            let pool = history::connect(&config).await?;
            history::run_history(&pool, limit, json).await?;
        }
        Commands::Platforms => print_platforms(),
    }

    Ok(())
}

fn print_platforms() {
    println!("{:<12}{:<16}URL", "ID", "NAME");
    for source in Source::ALL {
        println!(
            "{:<12}{:<16}{}",
            source.as_str(),
            source.display_name(),
            source.url_format()
        );
    }
}

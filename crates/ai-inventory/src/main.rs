//! ai-inventory - Search API over the federal AI use-case inventory

mod cli;

use ai_inventory_core::source::github::{
    DEFAULT_API_BASE, DEFAULT_FILE_PATH, DEFAULT_REPO, DEFAULT_TOKEN_ENV,
};
use ai_inventory_core::{
    DataFetcher, GitHubConfig, GitHubSource, RecordSource, SearchFilters, StaticSource,
    TokenSource,
};
use ai_inventory_web::ApiStyle;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ai-inventory",
    version,
    about = "Search API over the federal AI use-case inventory",
    long_about = "Serves a read-only JSON API over the federal AI use-case inventory spreadsheet.\n\
                  \n\
                  The spreadsheet is fetched from GitHub (requires a token), cached for an hour,\n\
                  and replaced by a built-in sample dataset when it cannot be fetched.\n\
                  \n\
                  Examples:\n\
                    ai-inventory                              # Serve the search API on :5001\n\
                    ai-inventory --api-style generic serve    # Serve the generic filter API\n\
                    ai-inventory search \"fraud\" --json        # One-off search\n\
                    ai-inventory metadata                     # List filter values\n\
                  \n\
                  Environment Variables:\n\
                    GITHUB_TOKEN                 # Access token for the inventory repository\n\
                    RUST_LOG                     # Log filter (default: info)\n\
                  \n\
                  A .env file in the working directory is loaded first."
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    #[command(flatten)]
    server: ServerArgs,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct ServerArgs {
    /// Address to listen on
    #[arg(long, global = true, env = "AI_INVENTORY_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, global = true, env = "AI_INVENTORY_PORT", default_value = "5001")]
    port: u16,

    /// Use-case API contract: search or generic
    #[arg(long, global = true, env = "AI_INVENTORY_API_STYLE", default_value = "search")]
    api_style: ApiStyle,
}

#[derive(Args)]
struct SourceArgs {
    /// GitHub repository holding the inventory (owner/name)
    #[arg(long, global = true, env = "AI_INVENTORY_REPO", default_value = DEFAULT_REPO)]
    repo: String,

    /// Path of the spreadsheet inside the repository
    #[arg(long, global = true, env = "AI_INVENTORY_FILE_PATH", default_value = DEFAULT_FILE_PATH)]
    file_path: String,

    /// GitHub API root
    #[arg(long, global = true, env = "AI_INVENTORY_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Environment variable holding the access token
    #[arg(long, global = true, default_value = DEFAULT_TOKEN_ENV)]
    token_env: String,

    /// Seconds before cached data is refetched
    #[arg(long, global = true, env = "AI_INVENTORY_CACHE_TTL_SECS", default_value = "3600")]
    cache_ttl_secs: u64,

    /// Timeout for each request to GitHub, in seconds
    #[arg(long, global = true, env = "AI_INVENTORY_TIMEOUT_SECS", default_value = "60")]
    timeout_secs: u64,

    /// Serve the built-in sample dataset without contacting GitHub
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the HTTP API (default)
    Serve,
    /// Search use cases and print the results
    Search {
        /// Text to look for in name, purpose and outputs
        query: Option<String>,
        /// Agency name, abbreviation, or "Name (ABBR)" label
        #[arg(long)]
        agency: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Max results
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Disable ANSI colors
        #[arg(long, env = "AI_INVENTORY_NO_COLOR")]
        no_color: bool,
    },
    /// Print distinct agencies, topics and statuses
    Metadata {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env-backed flags see it
    let dotenv = dotenvy::dotenv();

    init_tracing();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "Failed to load .env file");
        }
    }

    let cli = Cli::parse();
    let fetcher = Arc::new(build_fetcher(&cli.source)?);

    match cli.mode.unwrap_or(Mode::Serve) {
        Mode::Serve => {
            let addr = SocketAddr::new(cli.server.host, cli.server.port);
            println!("Inventory API ({}) on http://{}/api/*", cli.server.api_style, addr);
            ai_inventory_web::run(fetcher, addr, cli.server.api_style).await?;
        }
        Mode::Search {
            query,
            agency,
            topic,
            status,
            limit,
            json,
            no_color,
        } => {
            let filters = SearchFilters {
                query,
                agency,
                topic,
                status,
            };
            run_search(&fetcher, &filters, limit, json, no_color).await;
        }
        Mode::Metadata { json } => {
            let metadata = fetcher.get_metadata().await;
            println!("{}", cli::format_metadata(&metadata, json));
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_fetcher(args: &SourceArgs) -> Result<DataFetcher> {
    let source: Arc<dyn RecordSource> = if args.offline {
        Arc::new(StaticSource::sample())
    } else {
        let config = GitHubConfig {
            repo: args.repo.clone(),
            file_path: args.file_path.clone(),
            api_base: args.api_base.clone(),
            token: TokenSource::Env(args.token_env.clone()),
            timeout: Duration::from_secs(args.timeout_secs),
        };
        Arc::new(GitHubSource::new(config).context("Failed to create GitHub client")?)
    };

    Ok(DataFetcher::new(
        source,
        Duration::from_secs(args.cache_ttl_secs),
    ))
}

async fn run_search(
    fetcher: &DataFetcher,
    filters: &SearchFilters,
    limit: usize,
    json: bool,
    no_color: bool,
) {
    let outcome = fetcher.fetch_with_origin().await;
    let results = filters.apply(&outcome.records);
    let shown = &results[..limit.min(results.len())];

    println!("{}", cli::format_records_table(shown, json, no_color));

    if !json {
        eprintln!(
            "\n{} of {} matches ({} records from {})",
            shown.len(),
            results.len(),
            outcome.records.len(),
            outcome.origin.as_str()
        );
    }
}

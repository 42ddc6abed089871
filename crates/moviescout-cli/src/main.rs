use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{availability, browse, config, overrides, Context};
use movie_discovery_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviescout")]
#[command(about = "MovieScout - Find movies and where to stream them")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to a daily-rotated file (logging.file, or logs/moviescout.log in the config dir)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog, or list popular movies when no query is given
    Search {
        /// Search terms
        query: Option<String>,
    },
    /// Show the most searched terms
    Trending {
        /// Number of entries (defaults to analytics.trending_limit)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show where movies can be streamed
    #[command(long_about = "Resolve the streaming platforms of one or more movies in the configured region. Platforms with a saved identifier get a direct link; the rest link to the platform's search page.")]
    Availability {
        /// Catalog (TMDB) movie ids
        #[arg(required = true)]
        movie_ids: Vec<u64>,

        /// Title to build links with, skipping the catalog lookup (single id only)
        #[arg(long)]
        title: Option<String>,

        /// Region code overriding catalog.region
        #[arg(long)]
        region: Option<String>,
    },
    /// View or edit per-movie platform identifiers
    Override {
        #[command(subcommand)]
        cmd: OverrideCommands,
    },
    /// Configure credentials and settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum OverrideCommands {
    /// Show saved identifiers for a movie
    Show { movie_id: u64 },

    /// Save identifiers for a movie; prompts for every platform when no flags are given
    Set {
        movie_id: u64,
        #[arg(long)]
        netflix: Option<String>,
        #[arg(long)]
        prime: Option<String>,
        #[arg(long)]
        hotstar: Option<String>,
        #[arg(long)]
        zee5: Option<String>,
        #[arg(long)]
        sonyliv: Option<String>,
        #[arg(long)]
        mxplayer: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks secrets)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the TMDB read-access token
    Tmdb {
        /// Token (prompted when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Configure the Appwrite document store used by overrides and analytics
    Appwrite {
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        database_id: Option<String>,
        /// API key for document writes (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Set the region whose providers are shown
    Region {
        /// Two-letter region code, e.g. IN or US
        code: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let settings = commands::load_config(&paths)?;
    let log_file = logging::requested_log_file(cli.log_file, &settings.logging, &paths);
    logging::init_logging(cli.verbose, cli.quiet, &settings.logging, log_file).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => {
            let ctx = Context::load(&paths, settings)?;
            browse::run_search(query, &ctx, &output).await
        }
        Commands::Trending { limit } => {
            let ctx = Context::load(&paths, settings)?;
            browse::run_trending(limit, &ctx, &output).await
        }
        Commands::Availability {
            movie_ids,
            title,
            region,
        } => {
            let ctx = Context::load(&paths, settings)?;
            availability::run_availability(movie_ids, title, region, &ctx, &output).await
        }
        Commands::Override { cmd } => {
            let ctx = Context::load(&paths, settings)?;
            match cmd {
                OverrideCommands::Show { movie_id } => overrides::run_show(movie_id, &ctx, &output).await,
                OverrideCommands::Set {
                    movie_id,
                    netflix,
                    prime,
                    hotstar,
                    zee5,
                    sonyliv,
                    mxplayer,
                } => {
                    let args = overrides::OverrideArgs {
                        netflix,
                        prime,
                        hotstar,
                        zee5,
                        sonyliv,
                        mxplayer,
                    };
                    overrides::run_set(movie_id, args, &ctx, &output).await
                }
            }
        }
        Commands::Config { cmd } => config::run_config(cmd, &paths, settings, &output).await,
    }
}

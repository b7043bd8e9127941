use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod output;

use commands::{catalog, clear, collections, config, ratings, CollectionKind};

#[derive(Parser)]
#[command(name = "reelkeep")]
#[command(about = "Reelkeep - browse the movie catalog and keep your own shortlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    #[command(long_about = "Search the movie catalog by title. An empty query lists currently popular movies instead.")]
    Search {
        /// Title to search for
        query: String,
    },

    /// Browse the catalog with filters and pagination
    Discover {
        /// Sort order (e.g. popularity.desc, vote_average.desc, release_date.desc)
        #[arg(long)]
        sort_by: Option<String>,

        /// Result page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Restrict to a genre id (see `reelkeep genres`)
        #[arg(long)]
        genre: Option<u64>,

        /// Restrict to a release year
        #[arg(long)]
        year: Option<u32>,

        /// Minimum vote average (0-10)
        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Show one movie: details, cast, similar titles, and reviews
    #[command(long_about = "Fetch details, credits, similar movies, and reviews for one movie. The four requests run concurrently; sections that fail are skipped with a warning. Your stored rating and collection membership are shown alongside.")]
    Movie {
        /// Catalog movie id
        id: u64,
    },

    /// List the catalog's movie genres
    Genres,

    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },

    /// Manage your favorites
    Favorites {
        #[command(subcommand)]
        cmd: CollectionCommands,
    },

    /// Rate a movie from 1 to 10
    Rate {
        /// Catalog movie id
        id: u64,

        /// Rating value (1-10)
        rating: u8,
    },

    /// List all stored ratings
    Ratings,

    /// Remove the watchlist, favorites, and all ratings
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// View or change configuration and the API token
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum CollectionCommands {
    /// List saved entries in the order they were added
    List,
    /// Fetch a movie from the catalog and save it
    Add {
        /// Catalog movie id
        id: u64,
    },
    /// Remove a saved entry (no-op when absent)
    Remove {
        /// Catalog movie id
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (token masked)
    Show,
    /// Store the TMDB API read access token
    SetToken {
        /// Token value (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => catalog::run_search(&query, &output).await,
        Commands::Discover {
            sort_by,
            page,
            genre,
            year,
            min_rating,
        } => catalog::run_discover(sort_by, page, genre, year, min_rating, &output).await,
        Commands::Movie { id } => catalog::run_movie(id, &output).await,
        Commands::Genres => catalog::run_genres(&output).await,
        Commands::Watchlist { cmd } => {
            collections::run_collection(CollectionKind::Watchlist, cmd, &output).await
        }
        Commands::Favorites { cmd } => {
            collections::run_collection(CollectionKind::Favorites, cmd, &output).await
        }
        Commands::Rate { id, rating } => ratings::run_rate(id, rating, &output).await,
        Commands::Ratings => ratings::run_ratings(&output).await,
        Commands::Clear { yes } => clear::run_clear(yes, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output).await
        }
    }
}

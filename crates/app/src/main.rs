use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use gigbook_config::Config;
use gigbook_models::{DateFormat, format_datetime, group_by_location};
use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;

mod error;
mod web;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_HASH: &str = env!("GIGBOOK_GIT_HASH");

fn version_string() -> String {
    format!("{VERSION} ({GIT_HASH})")
}

// --- CLI definition ---

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "gigbook")]
#[command(about = "Venue, artist and show listings")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIGBOOK_GIT_HASH"), ")"))]
struct Cli {
    /// Log level (overrides config)
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    /// Display log timestamps in UTC (default: local time)
    #[arg(long, global = true)]
    utc: bool,

    /// Database URL (overrides config)
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List venues grouped by city and state
    ListVenues,
    /// List artists
    ListArtists,
    /// List all shows
    ListShows,
}

/// Layers CLI flags over the loaded config.
fn merge_cli(mut config: Config, cli: &Cli) -> Config {
    if let Some(level) = &cli.log_level {
        config.log_level = level.to_string();
    }
    if cli.utc {
        config.utc = true;
    }
    if let Some(url) = &cli.db_url {
        config.db_url = url.clone();
    }
    if let Commands::Serve { port: Some(port) } = &cli.command {
        config.port = *port;
    }
    config
}

// --- Logging ---

fn init_logging(config: &Config) {
    let filter = EnvFilter::new(&config.log_level);

    if config.utc {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(OffsetTime::new(
                time::UtcOffset::UTC,
                time::macros::format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
                ),
            ))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(LocalTimer)
            .init();
    }
}

struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

// --- Server ---

async fn run_server(config: &Config, pool: SqlitePool) -> anyhow::Result<()> {
    info!("gigbook v{}", version_string());

    let app = web::router(pool, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Main ---

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = merge_cli(Config::load(), &cli);
    init_logging(&config);

    let pool = gigbook_db::connect(&config.db_url).await?;
    gigbook_db::migrate(&pool).await?;
    let now = Local::now().naive_local();

    match cli.command {
        Commands::Serve { .. } => {
            run_server(&config, pool).await?;
        }
        Commands::ListVenues => {
            let areas = group_by_location(gigbook_db::list_venues(&pool, now).await?);
            if areas.is_empty() {
                println!("No venues listed. Post one at /venues/create.");
            } else {
                let mut total = 0;
                for area in &areas {
                    println!("{}, {}", area.city, area.state);
                    for v in &area.venues {
                        println!("  {:<6} {:<40} {} upcoming", v.id, v.name, v.num_upcoming_shows);
                    }
                    total += area.venues.len();
                }
                println!("\n{} venue(s) in {} area(s)", total, areas.len());
            }
        }
        Commands::ListArtists => {
            let artists = gigbook_db::list_artists(&pool, now).await?;
            if artists.is_empty() {
                println!("No artists listed. Post one at /artists/create.");
            } else {
                println!("{:<6} {:<40} {}", "ID", "Name", "Upcoming");
                println!("{}", "-".repeat(60));
                for a in &artists {
                    println!("{:<6} {:<40} {}", a.id, a.name, a.num_upcoming_shows);
                }
                println!("\n{} artist(s) total", artists.len());
            }
        }
        Commands::ListShows => {
            let shows = gigbook_db::list_shows(&pool).await?;
            if shows.is_empty() {
                println!("No shows listed.");
            } else {
                println!("{:<6} {:<26} {:<30} {}", "ID", "Start", "Artist", "Venue");
                println!("{}", "-".repeat(100));
                for s in &shows {
                    let marker = if s.start_time >= now { "" } else { " (past)" };
                    println!(
                        "{:<6} {:<26} {:<30} {}{}",
                        s.id,
                        format_datetime(&s.start_time, DateFormat::Medium),
                        s.artist_name,
                        s.venue_name,
                        marker,
                    );
                }
                println!("\n{} show(s) total", shows.len());
            }
        }
    }

    Ok(())
}

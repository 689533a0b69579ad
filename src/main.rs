use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_catalog_server::config::{self, DEFAULT_BIND_ADDRESS, DEFAULT_MOVIES_FILE, DEFAULT_PORT};
use movie_catalog_server::{
    run_server, JsonFilePersistence, MoviePersistence, MovieStore, NullPersistence,
    PersistenceBackend, RequestsLoggingLevel, SeedData, ServerConfig,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: IpAddr,

    /// Where the catalog is kept between runs.
    #[clap(long, default_value = "file")]
    pub persistence: PersistenceBackend,

    /// The JSON document holding the catalog, used by the file persistence.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_MOVIES_FILE)]
    pub movies_file: PathBuf,

    /// Movies to start with when nothing has been persisted yet.
    #[clap(long, default_value = "empty")]
    pub seed: SeedData,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            bind_address: args.bind_address,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            persistence: args.persistence,
            movies_file: args.movies_file.clone(),
            seed: args.seed,
        }
    }
}

fn make_persistence(app_config: &config::AppConfig) -> Box<dyn MoviePersistence> {
    match app_config.persistence {
        PersistenceBackend::File => Box::new(JsonFilePersistence::new(&app_config.movies_file)),
        PersistenceBackend::None => Box::new(NullPersistence),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  listen: {}", app_config.listen_address());
    info!("  persistence: {}", app_config.persistence);
    if app_config.persistence == PersistenceBackend::File {
        info!("  movies_file: {:?}", app_config.movies_file);
    }
    info!("  seed: {}", app_config.seed);

    let movie_store = MovieStore::open(make_persistence(&app_config), app_config.seed);
    info!(
        "Catalog has {} movies, next id is {}",
        movie_store.len(),
        movie_store.next_id()
    );

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        bind_address: app_config.bind_address,
        port: app_config.port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
    };

    let result = run_server(server_config, movie_store).await;
    info!("HTTP server stopped: {:?}", result);
    result
}

mod file_config;

pub use file_config::FileConfig;

use crate::catalog::SeedData;
use crate::persistence::PersistenceBackend;
use crate::server::RequestsLoggingLevel;
use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_MOVIES_FILE: &str = "docs/movies.json";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub bind_address: IpAddr,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub persistence: PersistenceBackend,
    pub movies_file: PathBuf,
    pub seed: SeedData,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            port: DEFAULT_PORT,
            bind_address: IpAddr::from([127, 0, 0, 1]),
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            persistence: PersistenceBackend::default(),
            movies_file: PathBuf::from(DEFAULT_MOVIES_FILE),
            seed: SeedData::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: IpAddr,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub persistence: PersistenceBackend,
    pub movies_file: PathBuf,
    pub seed: SeedData,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let bind_address = match file.bind_address {
            Some(address) => address
                .parse::<IpAddr>()
                .map_err(|err| anyhow!("Invalid bind_address '{}': {}", address, err))?,
            None => cli.bind_address,
        };

        let logging_level = match file.logging_level {
            Some(level) => parse_value::<RequestsLoggingLevel>("logging_level", &level)?,
            None => cli.logging_level.clone(),
        };

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let persistence = match file.persistence {
            Some(backend) => parse_value::<PersistenceBackend>("persistence", &backend)?,
            None => cli.persistence,
        };

        let movies_file = file
            .movies_file
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.movies_file.clone());

        let seed = match file.seed {
            Some(seed) => parse_value::<SeedData>("seed", &seed)?,
            None => cli.seed,
        };

        Ok(Self {
            port,
            bind_address,
            logging_level,
            frontend_dir_path,
            persistence,
            movies_file,
            seed,
        })
    }

    pub fn listen_address(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.bind_address, self.port)
    }
}

/// Parses a TOML string value using clap's ValueEnum, ignoring case.
fn parse_value<T: ValueEnum>(key: &str, value: &str) -> Result<T> {
    T::from_str(value, true).map_err(|_| {
        let accepted: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();
        anyhow!(
            "Invalid {} '{}', expected one of: {}",
            key,
            value,
            accepted.join(", ")
        )
    })
}

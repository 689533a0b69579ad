use super::RequestsLoggingLevel;
use std::net::IpAddr;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub bind_address: IpAddr,
    pub port: u16,
    /// When set, static files are served from here and unknown paths fall
    /// back to its index.html.
    pub frontend_dir_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            frontend_dir_path: None,
        }
    }
}

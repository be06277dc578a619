//! Server configuration.

use std::path::PathBuf;

/// Default TCP port for client connections
pub const DEFAULT_PORT: u16 = 8189;

/// Default host address to bind to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default directory for uploaded images
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Relay server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to bind to
    pub port: u16,
    /// Directory where uploaded images are stored
    pub upload_dir: PathBuf,
    /// Whether lines typed on stdin are broadcast as administrator messages
    pub admin_input: bool,
}

impl ServerConfig {
    /// Address string passed to `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            admin_input: true,
        }
    }
}

//! Configuration management for imghost.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables (`PORT`, plus `IMGHOST_`-prefixed settings)
//! - Sensible defaults for all settings
//!
//! # Example
//!
//! ```ignore
//! use imghost::config::Config;
//!
//! let config = Config::parse();
//! println!("Listening on {}", config.bind_address());
//! println!("Uploads stored in {}", config.upload_dir.display());
//! ```
//!
//! # Environment Variables
//!
//! - `PORT` - Server port (default: 3000)
//! - `IMGHOST_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMGHOST_UPLOAD_DIR` - Storage directory (default: uploads)
//! - `IMGHOST_PUBLIC_DIR` - Static client assets (default: public)
//! - `IMGHOST_MAX_FILE_SIZE` - Per-file limit in bytes (default: 10 MiB)
//! - `IMGHOST_MAX_FILES` - Files per multi-upload (default: 10)
//! - `IMGHOST_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::Parser;

use crate::server::RouterConfig;
use crate::storage::{DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default storage directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default directory of static client assets.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// =============================================================================
// CLI Arguments
// =============================================================================

/// imghost - A minimal image hosting server.
///
/// Accepts image uploads over HTTP, stores them in a local directory under
/// generated names and serves them back from static URLs.
#[derive(Parser, Debug, Clone)]
#[command(name = "imghost")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMGHOST_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Directory uploaded images are stored in. Created if missing.
    #[arg(long, default_value = DEFAULT_UPLOAD_DIR, env = "IMGHOST_UPLOAD_DIR")]
    pub upload_dir: PathBuf,

    /// Directory of static client assets served for unmatched paths.
    ///
    /// Ignored if the directory does not exist.
    #[arg(long, default_value = DEFAULT_PUBLIC_DIR, env = "IMGHOST_PUBLIC_DIR")]
    pub public_dir: PathBuf,

    // =========================================================================
    // Upload Limits
    // =========================================================================
    /// Maximum size of a single uploaded file in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "IMGHOST_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Maximum number of files per multi-upload request.
    #[arg(long, default_value_t = DEFAULT_MAX_FILES, env = "IMGHOST_MAX_FILES")]
    pub max_files: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "IMGHOST_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(
                "Upload directory is required. Set --upload-dir or IMGHOST_UPLOAD_DIR".to_string(),
            );
        }

        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }

        if self.max_files == 0 {
            return Err("max_files must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router configuration from these settings.
    pub fn router_config(&self) -> RouterConfig {
        let mut router_config = RouterConfig::default()
            .with_max_file_size(self.max_file_size)
            .with_max_files(self.max_files)
            .with_public_dir(self.public_dir.clone())
            .with_tracing(!self.no_tracing);

        if let Some(ref origins) = self.cors_origins {
            router_config = router_config.with_cors_origins(origins.clone());
        }

        router_config
    }
}

// =============================================================================
// Tests
// =============================================================================

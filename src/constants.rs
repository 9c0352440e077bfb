//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the binary name and default endpoints.

/// The binary name of the application (used in command examples and file names).
pub const APP_BINARY_NAME: &str = "dcss-shell";

/// Default WebTiles server address (the stock local server port).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "dcss-shell";

/// Log file written by the interactive host.
pub const LOG_FILE_NAME: &str = "dcss-shell.log";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "DCSS_SHELL_CONFIG_DIR";

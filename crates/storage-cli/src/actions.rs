//! Action type definitions for CLI commands.

use clap::Subcommand;

/// Configuration management actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init,

    /// Show the current configuration
    Show,

    /// Get a single configuration value
    Get {
        /// Key path (e.g., "storage.bucket")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Key path (e.g., "general.user_id")
        key: String,

        /// New value
        value: String,
    },

    /// Print the configuration file location
    Path,
}

//! CLI argument definitions and parsing.
//!
//! - `Cli` - Main CLI entry point
//! - `StorageArgs` - Global overrides for the storage location and user
//! - `Commands` - Available subcommands

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::actions::ConfigAction;

/// Cloud Storage - a private file tree per user on top of an object store.
#[derive(Parser, Debug)]
#[command(name = "cloud-storage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Storage overrides
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty); defaults to `general.default_format`
    #[arg(long = "format", global = true)]
    pub format: Option<String>,
}

/// Options that override the `[general]` and `[storage]` configuration.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageArgs {
    /// User whose tree to operate on
    #[arg(short, long, global = true, env = "CLOUD_STORAGE_USER")]
    pub user: Option<u64>,

    /// Directory holding the object store
    #[arg(long, global = true, env = "CLOUD_STORAGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Bucket name
    #[arg(long, global = true)]
    pub bucket: Option<String>,
}

/// Available CLI subcommands.
///
/// Paths are relative to the user's root. Directory paths end with `/`;
/// the root itself is the empty string.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a file or directory.
    Stat {
        /// Resource path (e.g., "docs/" or "docs/a.txt")
        path: String,
    },

    /// List the direct children of a directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// cloud-storage ls
    /// cloud-storage ls photos/2024/
    /// ```
    Ls {
        /// Directory path (default: root)
        #[arg(default_value = "")]
        path: String,
    },

    /// Find files and folders whose name contains a query.
    Search {
        /// Case-sensitive substring to look for
        query: String,
    },

    /// Remove a file or a directory with everything inside it.
    Rm {
        /// Resource path
        path: String,
    },

    /// Move or rename a file or directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Rename
    /// cloud-storage mv notes.txt todo.txt
    ///
    /// # Move into another folder, keeping the name
    /// cloud-storage mv notes.txt docs/notes.txt
    ///
    /// # Move a file back to the root
    /// cloud-storage mv docs/notes.txt
    /// ```
    Mv {
        /// Current path
        from: String,

        /// New path (omit to move a file to the root)
        #[arg(default_value = "")]
        to: String,
    },

    /// Upload local files or directories.
    ///
    /// Directories are uploaded recursively under their own name.
    Upload {
        /// Local files or directories
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Destination directory (default: root)
        #[arg(short, long, default_value = "")]
        to: String,
    },

    /// Create an empty directory.
    Mkdir {
        /// Directory path ending with `/`
        path: String,
    },

    /// Download a file, or a directory as a zip archive.
    Download {
        /// Resource path (empty for the whole tree)
        #[arg(default_value = "")]
        path: String,

        /// Local directory to write into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Manage CLI configuration.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// cloud-storage completions bash > /etc/bash_completion.d/cloud-storage
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_ls_defaults_to_root() {
        let cli = Cli::parse_from(["cloud-storage", "ls"]);
        assert!(matches!(cli.command, Commands::Ls { ref path } if path.is_empty()));
        assert!(!cli.verbose);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "cloud-storage",
            "stat",
            "docs/",
            "--user",
            "42",
            "--bucket",
            "files",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.storage.user, Some(42));
        assert_eq!(cli.storage.bucket.as_deref(), Some("files"));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_mv_without_destination() {
        let cli = Cli::parse_from(["cloud-storage", "mv", "docs/a.txt"]);
        match cli.command {
            Commands::Mv { from, to } => {
                assert_eq!(from, "docs/a.txt");
                assert_eq!(to, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_upload_multiple_sources() {
        let cli = Cli::parse_from(["cloud-storage", "upload", "a.txt", "photos", "--to", "in/"]);
        match cli.command {
            Commands::Upload { sources, to } => {
                assert_eq!(sources, vec![PathBuf::from("a.txt"), PathBuf::from("photos")]);
                assert_eq!(to, "in/");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_upload_requires_source() {
        assert!(Cli::try_parse_from(["cloud-storage", "upload"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_set() {
        let cli = Cli::parse_from(["cloud-storage", "config", "set", "general.user_id", "7"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Set { ref key, ref value }
            } if key == "general.user_id" && value == "7"
        ));
    }

    #[test]
    fn test_cli_parse_download_output() {
        let cli = Cli::parse_from(["cloud-storage", "download", "docs/", "-o", "/tmp/out"]);
        assert!(matches!(
            cli.command,
            Commands::Download { ref path, ref output }
                if path == "docs/" && output == &PathBuf::from("/tmp/out")
        ));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

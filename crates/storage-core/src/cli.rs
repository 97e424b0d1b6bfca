//! CLI-specific types and utilities.
//!
//! Strong types for CLI concepts shared by front ends of the storage
//! service.
//!
//! # Examples
//!
//! ```
//! use cloud_storage_core::cli::{ExitCode, OutputFormat};
//!
//! let format = OutputFormat::Pretty;
//! assert_eq!(format.as_str(), "pretty");
//!
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// All formats carry the same information with different presentation.
///
/// # Examples
///
/// ```
/// use cloud_storage_core::cli::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Pretty-printed output with colors for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::ConfigError {
                message: format!("invalid output format: '{s}' (expected: json, text, or pretty)"),
            }),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use cloud_storage_core::cli::ExitCode;
/// use cloud_storage_core::Error;
///
/// let err = Error::ResourceNotFound { resource: "docs/".to_string() };
/// assert_eq!(ExitCode::from_error(&err), ExitCode::NOT_FOUND);
/// assert!(!ExitCode::NOT_FOUND.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General or infrastructure error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// The requested resource does not exist (exit code 5).
    pub const NOT_FOUND: Self = Self(5);

    /// The request collided with existing content (exit code 6).
    pub const CONFLICT: Self = Self(6);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Maps a storage error to its exit code.
    #[must_use]
    pub const fn from_error(err: &Error) -> Self {
        if err.is_invalid_input() || err.is_config_error() {
            Self::INVALID_INPUT
        } else if err.is_not_found() {
            Self::NOT_FOUND
        } else if err.is_conflict() {
            Self::CONFLICT
        } else {
            Self::ERROR
        }
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    #[test]
    fn test_output_format_from_str_valid() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(
            "Pretty".parse::<OutputFormat>().unwrap(),
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let result = "xml".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("xml"));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::ERROR.as_i32(), 1);
        assert_eq!(ExitCode::INVALID_INPUT.as_i32(), 2);
        assert_eq!(ExitCode::NOT_FOUND.as_i32(), 5);
        assert_eq!(ExitCode::CONFLICT.as_i32(), 6);
    }

    #[test]
    fn test_exit_code_from_error() {
        let cases = [
            (
                Error::InvalidPath {
                    path: "/x".to_string(),
                },
                ExitCode::INVALID_INPUT,
            ),
            (
                Error::ParentDirectoryNotFound {
                    path: "a/b/".to_string(),
                },
                ExitCode::NOT_FOUND,
            ),
            (
                Error::ResourceAlreadyExists {
                    resource: "a.txt".to_string(),
                },
                ExitCode::CONFLICT,
            ),
            (
                Error::Store(StoreError::Backend {
                    message: "down".to_string(),
                }),
                ExitCode::ERROR,
            ),
        ];

        for (err, expected) in &cases {
            assert_eq!(ExitCode::from_error(err), *expected, "{err}");
        }
    }

    #[test]
    fn test_exit_code_into_i32() {
        let code: i32 = ExitCode::CONFLICT.into();
        assert_eq!(code, 6);
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
        assert_eq!(ExitCode::from_i32(5), ExitCode::NOT_FOUND);
    }
}

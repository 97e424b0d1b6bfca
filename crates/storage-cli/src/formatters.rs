//! Output formatters for CLI commands.
//!
//! Every command renders its result through [`format_output`], so the three
//! output modes stay consistent across commands.

use anyhow::{Context, Result};
use cloud_storage_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use cloud_storage_cli::formatters::format_output;
/// use cloud_storage_core::ResourceDescriptor;
/// use cloud_storage_core::cli::OutputFormat;
///
/// let file = ResourceDescriptor::file("docs/", "a.txt", 3);
/// let output = format_output(&file, OutputFormat::Json)?;
/// assert!(output.contains("\"FILE\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Formats `data` and writes it to stdout.
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    let formatted = format_output(data, format).context("failed to format output")?;
    println!("{formatted}");
    Ok(())
}

/// Whether a serialized record looks like a `ResourceDescriptor`.
fn is_descriptor(fields: &serde_json::Map<String, serde_json::Value>) -> bool {
    ["path", "name", "type"].iter().all(|k| fields.contains_key(*k))
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One line per record with tab-separated values, suitable for `cut` and
/// `awk`. Descriptors print as `TYPE<tab>full path<tab>size`; other records
/// print their values in key order.
pub mod text {
    use super::{Result, Serialize, is_descriptor};
    use serde_json::Value;

    /// Format data as tab-separated lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let lines: Vec<String> = match &value {
            Value::Array(items) => items.iter().map(line).collect(),
            other => vec![line(other)],
        };
        Ok(lines.join("\n"))
    }

    fn line(value: &Value) -> String {
        match value {
            Value::Object(fields) if is_descriptor(fields) => {
                let field = |key: &str| fields.get(key).map(scalar).unwrap_or_default();
                format!(
                    "{}\t{}{}\t{}",
                    field("type"),
                    field("path"),
                    field("name"),
                    field("size")
                )
            }
            Value::Object(fields) => fields
                .values()
                .map(scalar)
                .collect::<Vec<_>>()
                .join("\t"),
            other => scalar(other),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, is_descriptor};
    use serde_json::{Map, Value};

    /// Format data as colorized, human-readable output.
    ///
    /// Resource descriptors render as one line each; other records render
    /// as `key: value` blocks.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(match &value {
            Value::Array(items) if items.is_empty() => "(empty)".dimmed().to_string(),
            Value::Array(items) => items.iter().map(item).collect::<Vec<_>>().join("\n"),
            other => item(other),
        })
    }

    fn item(value: &Value) -> String {
        match value {
            Value::Object(fields) if is_descriptor(fields) => descriptor(fields),
            Value::Object(fields) => fields
                .iter()
                .map(|(key, val)| format!("{}: {}", key.blue().bold(), scalar(val)))
                .collect::<Vec<_>>()
                .join("\n"),
            other => scalar(other),
        }
    }

    fn descriptor(fields: &Map<String, Value>) -> String {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or_default();
        let full = format!("{}{}", text("path"), text("name"));

        if text("type") == "DIRECTORY" {
            let shown = if full.is_empty() { "/".to_string() } else { format!("{full}/") };
            format!("{}  {}", "dir ".yellow(), shown.blue().bold())
        } else {
            let size = fields
                .get("size")
                .and_then(Value::as_u64)
                .map_or_else(String::new, |s| format!("  {}", format!("{s} B").cyan()));
            format!("{}  {}{size}", "file".green(), full)
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_storage_core::ResourceDescriptor;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Moved {
        from: String,
        count: u32,
    }

    fn listing() -> Vec<ResourceDescriptor> {
        vec![
            ResourceDescriptor::directory("docs/", "old"),
            ResourceDescriptor::file("docs/", "a.txt", 12),
        ]
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&listing()).unwrap();
        assert!(output.contains("\"type\": \"DIRECTORY\""));
        assert!(output.contains("\"size\": 12"));
    }

    #[test]
    fn test_text_format_one_line_per_record() {
        let output = text::format(&listing()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "DIRECTORY\tdocs/old\t");
        assert_eq!(lines[1], "FILE\tdocs/a.txt\t12");
    }

    #[test]
    fn test_text_format_single_record() {
        let output = text::format(&Moved {
            from: "a.txt".to_string(),
            count: 3,
        })
        .unwrap();
        assert_eq!(output, "3\ta.txt");
    }

    #[test]
    fn test_pretty_format_descriptors() {
        colored::control::set_override(false);
        let output = pretty::format(&listing()).unwrap();
        assert!(output.contains("dir   docs/old/"));
        assert!(output.contains("file  docs/a.txt  12 B"));
    }

    #[test]
    fn test_pretty_format_root_directory() {
        colored::control::set_override(false);
        let output = pretty::format(&ResourceDescriptor::root()).unwrap();
        assert!(output.ends_with('/'));
    }

    #[test]
    fn test_pretty_format_empty_list() {
        colored::control::set_override(false);
        let empty: Vec<ResourceDescriptor> = Vec::new();
        assert_eq!(pretty::format(&empty).unwrap(), "(empty)");
    }

    #[test]
    fn test_pretty_format_plain_record() {
        colored::control::set_override(false);
        let output = pretty::format(&Moved {
            from: "a.txt".to_string(),
            count: 3,
        })
        .unwrap();
        assert!(output.contains("from: a.txt"));
        assert!(output.contains("count: 3"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = listing();
        assert!(format_output(&data, OutputFormat::Json).unwrap().starts_with('['));
        assert!(!format_output(&data, OutputFormat::Text).unwrap().contains('{'));
    }
}

//! Shared output formatting for CLI commands.
//!
//! Supports JSON and YAML serialization plus fixed-width tables; table
//! layouts stay with the command that owns them.

use anyhow::{Context, Result};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            _ => {
                anyhow::bail!("Unsupported output format: '{}'. Use 'json', 'yaml', or 'table'.", s)
            }
        }
    }
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize to YAML")?;
    println!("{}", yaml);
    Ok(())
}

/// Print data in the requested non-table format
pub fn print_serialized<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
        OutputFormat::Table => {
            anyhow::bail!("Table format requires a layout specific to the data type")
        }
    }
}

/// Truncate string to maximum character count with ellipsis. Counts chars
/// rather than bytes so multi-byte names never split mid-character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a table header followed by a separator sized to its columns
pub fn print_table_header(columns: &[(&str, usize)]) {
    println!();
    let mut header = String::new();
    for &(name, width) in columns {
        header.push_str(&format!("{name:<width$} "));
    }
    println!("{}", header.trim_end());

    let total_width: usize = columns.iter().map(|(_, w)| w + 1).sum();
    println!("{}", "-".repeat(total_width.saturating_sub(1)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("YAML").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_print_serialized() {
        let data = TestData { name: "test".to_string(), value: 42 };
        assert!(print_serialized(&data, OutputFormat::Json).is_ok());
        assert!(print_serialized(&data, OutputFormat::Yaml).is_ok());
        assert!(print_serialized(&data, OutputFormat::Table).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 5), "hi");
        assert_eq!(truncate("hello", 3), "...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // two bytes per char; byte-index slicing would land mid-character
        assert_eq!(truncate("öööööööööö", 18), "öööööööööö");
        assert_eq!(truncate("ööööööööööööööööööööö", 10), "ööööööö...");
        assert_eq!(truncate("faturalandırma-servisi", 12), "faturalan...");
    }
}

// Output formatting for CLI

use std::io::Write;

use serde_json::Value;

use crate::cli::config::OutputFormat;
use crate::cli::CliResult;

/// Format and output reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Output one report
    pub fn output_report(&self, report: &Value, writer: &mut impl Write) -> CliResult<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(report)?)?;
            }
            OutputFormat::KeyValue => {
                self.output_key_value(report, writer)?;
            }
            OutputFormat::Table => {
                self.output_table(report, writer)?;
            }
        }
        Ok(())
    }

    /// Output as key-value pairs
    fn output_key_value(&self, report: &Value, writer: &mut impl Write) -> CliResult<()> {
        for (key, value) in flatten(report) {
            writeln!(writer, "{}: {}", key, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Output as table
    fn output_table(&self, report: &Value, writer: &mut impl Write) -> CliResult<()> {
        let rows = flatten(report);
        let max_key_len = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        for (key, value) in &rows {
            writeln!(
                writer,
                "{:<width$} {}",
                format!("{}:", key),
                value,
                width = max_key_len + 1
            )?;
        }
        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        Ok(())
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Flatten nested objects into `a.b` keys and arrays into `a[i]` keys, keeping order.
fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(String::new(), value, &mut rows);
    rows
}

fn flatten_into(prefix: String, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(obj) if !obj.is_empty() => {
            for (key, child) in obj {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(path, child, rows);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            for (index, child) in arr.iter().enumerate() {
                flatten_into(format!("{}[{}]", prefix, index), child, rows);
            }
        }
        leaf => rows.push((prefix, format_value(leaf))),
    }
}

/// Format a JSON leaf for display
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(unknown)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    }
}

//! Output formatters for analysis results

mod github;
mod json;
mod raw;
mod table;

pub use github::GithubFormatter;
pub use json::JsonFormatter;
pub use raw::RawFormatter;
pub use table::TableFormatter;

use std::str::FromStr;

use crate::issue::IssueCollection;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `file:line:message` line per issue
    Raw,
    /// Issues grouped by file, with totals
    Json,
    /// Human-readable table
    #[default]
    Table,
    /// GitHub Actions annotations
    Github,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["raw", "json", "table", "github"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(OutputFormat::Raw),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "github" => Ok(OutputFormat::Github),
            other => Err(format!(
                "unknown output format `{}`, expected one of: {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Trait for output formatters
pub trait Formatter {
    /// Format the issues and return the output string
    fn format(&self, issues: &IssueCollection) -> String;
}

/// Format issues using the specified format
pub fn format_issues(issues: &IssueCollection, format: OutputFormat) -> String {
    match format {
        OutputFormat::Raw => RawFormatter.format(issues),
        OutputFormat::Json => JsonFormatter.format(issues),
        OutputFormat::Table => TableFormatter.format(issues),
        OutputFormat::Github => GithubFormatter.format(issues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("GitHub".parse::<OutputFormat>(), Ok(OutputFormat::Github));
        assert_eq!("raw".parse::<OutputFormat>(), Ok(OutputFormat::Raw));
        assert!("xml".parse::<OutputFormat>().unwrap_err().contains("table"));
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}

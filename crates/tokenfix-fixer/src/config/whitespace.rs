//! Whitespace configuration: indentation unit and line ending

use serde::{Deserialize, Serialize};

/// Indentation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndentStyle {
    /// Use spaces for indentation
    Spaces(usize),
    /// Use tabs for indentation
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(4)
    }
}

impl IndentStyle {
    /// Indentation text for one level
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }

    /// Get the number of columns one level occupies
    pub fn width(&self) -> usize {
        match self {
            IndentStyle::Spaces(n) => *n,
            IndentStyle::Tabs => 4,
        }
    }

    /// Parse a configured value
    /// e.g., "    " -> Spaces(4), "2" -> Spaces(2), "\t" or "tab" -> Tabs
    pub fn from_config(s: &str) -> Self {
        let trimmed = s.trim_matches(|c| c == ' ');
        if s == "\t" || s == "\\t" || trimmed.eq_ignore_ascii_case("tab") || trimmed.eq_ignore_ascii_case("tabs") {
            return IndentStyle::Tabs;
        }
        if let Ok(n) = trimmed.parse::<usize>() {
            return IndentStyle::Spaces(n.max(1));
        }

        let spaces = s.chars().filter(|c| *c == ' ').count();
        IndentStyle::Spaces(if spaces > 0 { spaces } else { 4 })
    }
}

impl From<String> for IndentStyle {
    fn from(s: String) -> Self {
        IndentStyle::from_config(&s)
    }
}

impl From<IndentStyle> for String {
    fn from(style: IndentStyle) -> Self {
        match style {
            IndentStyle::Spaces(n) => n.to_string(),
            IndentStyle::Tabs => "tab".to_string(),
        }
    }
}

/// Line ending style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,
    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Parse a configured value
    /// e.g., "\n" or "lf" -> Lf, "\r\n" or "crlf" -> CrLf
    pub fn from_config(s: &str) -> Self {
        if s.contains("\\r\\n") || s.contains("\r\n") || s.eq_ignore_ascii_case("crlf") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// Combined whitespace configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitespaceConfig {
    pub indent: IndentStyle,
    pub line_ending: LineEnding,
}

impl WhitespaceConfig {
    pub fn new(indent: IndentStyle, line_ending: LineEnding) -> Self {
        Self { indent, line_ending }
    }
}

//! Analysis configuration
//!
//! Deserialized from the `[analyze]` table of `.tokenfix.toml`; every field
//! has a default so an empty table is a valid configuration.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::issue::Issue;
use crate::logging;

/// Default threshold for a single function-like
pub const DEFAULT_MAX_FUNCTION_COMPLEXITY: u32 = 8;

/// Default threshold for the summed methods of a class-like
pub const DEFAULT_MAX_CLASS_COMPLEXITY: u32 = 50;

/// A pattern of issues to drop from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreError {
    /// Message regex, optionally wrapped in `#...#` or `/.../`; an invalid
    /// regex is matched as plain text
    pub message: String,
    /// Path glob or path fragment the issue's file must match
    #[serde(default)]
    pub path: Option<String>,
    /// Identifier the issue must carry
    #[serde(default)]
    pub identifier: Option<String>,
}

impl IgnoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            identifier: None,
        }
    }

    /// Describe why `issue` matches, `None` if it does not
    fn matches(&self, issue: &Issue) -> Option<String> {
        if let Some(identifier) = &self.identifier {
            if issue.identifier.as_deref() != Some(identifier.as_str()) {
                return None;
            }
        }

        if let Some(path) = &self.path {
            if !path_matches(path, &issue.file) {
                return None;
            }
        }

        let pattern = self
            .message
            .trim_start_matches(['#', '/'])
            .trim_end_matches(['#', '/']);
        let matched = match Regex::new(pattern) {
            Ok(re) => re.is_match(&issue.message),
            Err(_) => issue.message.contains(&self.message),
        };

        matched.then(|| format!("message pattern: {}", self.message))
    }
}

fn path_matches(pattern: &str, path: &Path) -> bool {
    if pattern.contains(['*', '?', '[']) {
        if let Ok(glob) = glob::Pattern::new(pattern) {
            return glob.matches_path(path);
        }
    }
    path.to_string_lossy().contains(pattern)
}

/// Configuration of an analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Highest score a function-like may have without an issue
    pub max_function_complexity: u32,
    /// Highest summed score a class-like may have without an issue
    pub max_class_complexity: u32,
    /// Issues to drop from the report
    pub ignore_errors: Vec<IgnoreError>,
    /// Glob patterns or path prefixes of files to skip
    pub exclude: Vec<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            max_function_complexity: DEFAULT_MAX_FUNCTION_COMPLEXITY,
            max_class_complexity: DEFAULT_MAX_CLASS_COMPLEXITY,
            ignore_errors: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl AnalyzeConfig {
    /// Check if a path is excluded from analysis
    pub fn is_excluded(&self, path: &Path) -> bool {
        for exclude in &self.exclude {
            if path.starts_with(exclude) || path_matches(exclude, path) {
                logging::log(&format!(
                    "EXCLUDED: {} (matched: {})",
                    path.display(),
                    exclude
                ));
                return true;
            }
        }
        false
    }

    /// Check if an issue should be dropped from the report
    pub fn should_ignore(&self, issue: &Issue) -> bool {
        for ignore in &self.ignore_errors {
            if let Some(reason) = ignore.matches(issue) {
                logging::log_issue_filtered(issue, &reason);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn issue(message: &str, file: &str) -> Issue {
        Issue::error("function_like_cognitive_complexity", message, PathBuf::from(file), 3, 5)
            .with_identifier("complexity.functionLike")
    }

    #[test]
    fn test_defaults() {
        let config = AnalyzeConfig::default();
        assert_eq!(config.max_function_complexity, 8);
        assert_eq!(config.max_class_complexity, 50);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: AnalyzeConfig = serde_json::from_str(
            r##"{"max_function_complexity": 12, "ignore_errors": [{"message": "#legacy#", "path": "src/Legacy/*"}]}"##,
        )
        .unwrap();

        assert_eq!(config.max_function_complexity, 12);
        assert_eq!(config.max_class_complexity, 50);
        assert_eq!(config.ignore_errors[0].path.as_deref(), Some("src/Legacy/*"));
    }

    #[test]
    fn test_regex_message_pattern() {
        let config = AnalyzeConfig {
            ignore_errors: vec![IgnoreError::new(r##"#for "App\\Legacy::.*"#"##)],
            ..AnalyzeConfig::default()
        };

        assert!(config.should_ignore(&issue(
            "Cognitive complexity for \"App\\Legacy::run\" is 12, keep it under 8",
            "src/Legacy.php"
        )));
        assert!(!config.should_ignore(&issue(
            "Cognitive complexity for \"App\\Modern::run\" is 12, keep it under 8",
            "src/Modern.php"
        )));
    }

    #[test]
    fn test_path_and_identifier_restrict_the_pattern() {
        let config = AnalyzeConfig {
            ignore_errors: vec![IgnoreError {
                message: "Cognitive complexity".to_string(),
                path: Some("src/Legacy/*.tokens.json".to_string()),
                identifier: Some("complexity.functionLike".to_string()),
            }],
            ..AnalyzeConfig::default()
        };

        assert!(config.should_ignore(&issue("Cognitive complexity for \"a\"", "src/Legacy/A.tokens.json")));
        assert!(!config.should_ignore(&issue("Cognitive complexity for \"a\"", "src/Other/A.tokens.json")));

        let class_issue = issue("Cognitive complexity for \"A\" class", "src/Legacy/A.tokens.json")
            .with_identifier("complexity.classLike");
        assert!(!config.should_ignore(&class_issue));
    }

    #[test]
    fn test_invalid_regex_matches_as_text() {
        let config = AnalyzeConfig {
            ignore_errors: vec![IgnoreError::new("is 9, keep (it")],
            ..AnalyzeConfig::default()
        };
        assert!(config.should_ignore(&issue("Cognitive complexity for \"f\" is 9, keep (it under 8", "a")));
    }

    #[test]
    fn test_is_excluded() {
        let config = AnalyzeConfig {
            exclude: vec!["vendor".to_string(), "**/*.generated.tokens.json".to_string()],
            ..AnalyzeConfig::default()
        };

        assert!(config.is_excluded(Path::new("vendor/lib/a.tokens.json")));
        assert!(config.is_excluded(Path::new("src/Api.generated.tokens.json")));
        assert!(!config.is_excluded(Path::new("src/Api.tokens.json")));
    }
}

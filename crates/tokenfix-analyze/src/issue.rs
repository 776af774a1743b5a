//! Diagnostics reported by analysis rules

use std::path::PathBuf;

use serde::Serialize;

/// Severity level for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed
    Error,
    /// Warning - should be reviewed
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single issue found during analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// The rule that found this issue (e.g., "function_like_cognitive_complexity")
    pub check_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// File where the issue was found
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Stable machine-readable identifier (e.g., "complexity.functionLike")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Optional tip for fixing the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl Issue {
    fn new(
        severity: Severity,
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            severity,
            message: message.into(),
            file,
            line,
            column,
            identifier: None,
            tip: None,
        }
    }

    /// Create a new error issue
    pub fn error(
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self::new(Severity::Error, check_id, message, file, line, column)
    }

    /// Create a new warning issue
    pub fn warning(
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self::new(Severity::Warning, check_id, message, file, line, column)
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a tip for fixing
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }
}

/// Collection of issues from analysis
#[derive(Debug, Default)]
pub struct IssueCollection {
    issues: Vec<Issue>,
}

impl IssueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Number of distinct files with at least one issue
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&PathBuf> = self.issues.iter().map(|i| &i.file).collect();
        files.sort();
        files.dedup();
        files.len()
    }

    /// Sort issues by file, then line, then column
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.column.cmp(&b.column))
        });
    }
}

impl FromIterator<Issue> for IssueCollection {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_creation() {
        let issue = Issue::error(
            "function_like_cognitive_complexity",
            "Cognitive complexity for \"run\" is 9, keep it under 8",
            PathBuf::from("/test.php"),
            10,
            5,
        )
        .with_identifier("complexity.functionLike")
        .with_tip("Extract nested blocks into methods");

        assert_eq!(issue.check_id, "function_like_cognitive_complexity");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.line, 10);
        assert_eq!(issue.identifier.as_deref(), Some("complexity.functionLike"));
    }

    #[test]
    fn test_issue_collection() {
        let mut collection = IssueCollection::new();
        collection.add(Issue::error("test", "Error 1", PathBuf::from("/a.php"), 1, 1));
        collection.add(Issue::warning("test", "Warning 1", PathBuf::from("/b.php"), 2, 1));
        collection.add(Issue::error("test", "Error 2", PathBuf::from("/a.php"), 7, 1));

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.error_count(), 2);
        assert_eq!(collection.warning_count(), 1);
        assert_eq!(collection.file_count(), 2);
    }

    #[test]
    fn test_sort_orders_by_file_then_line() {
        let mut collection: IssueCollection = vec![
            Issue::error("test", "late", PathBuf::from("/b.php"), 1, 1),
            Issue::error("test", "second", PathBuf::from("/a.php"), 9, 1),
            Issue::error("test", "first", PathBuf::from("/a.php"), 2, 4),
        ]
        .into_iter()
        .collect();

        collection.sort();
        let messages: Vec<&str> = collection.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "late"]);
    }
}

//! Raw output format
//!
//! One `file:line:message` line per issue, no header and no summary.

use super::Formatter;
use crate::issue::IssueCollection;

pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut sorted: Vec<_> = issues.issues().iter().collect();
        sorted.sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.line.cmp(&b.line)));

        sorted
            .into_iter()
            .map(|issue| format!("{}:{}:{}\n", issue.file.display(), issue.line, issue.message))
            .collect()
    }
}

//! Debug log for fix and analysis runs
//!
//! A single process-wide log file, opened by `init_logger`. Every helper is a
//! no-op until then, so library code can log unconditionally.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::issue::Issue;

/// Global logger instance
static LOGGER: Mutex<Option<DebugLogger>> = Mutex::new(None);

/// Logger writing timestamped lines to a file
pub struct DebugLogger {
    file: File,
    path: PathBuf,
}

impl DebugLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self {
            file,
            path: log_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }

    /// Log a subsection
    pub fn subsection(&mut self, title: &str) {
        let separator = "-".repeat(40);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger, defaulting to a timestamped file in /tmp
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(format!("/tmp/tokenfix-{}.log", timestamp))
        });

    let logger = DebugLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

fn with_logger(write: impl FnOnce(&mut DebugLogger)) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            write(logger);
        }
    }
}

/// Log a message to the global logger
pub fn log(message: &str) {
    with_logger(|logger| logger.log(message));
}

/// Log a section header
pub fn section(title: &str) {
    with_logger(|logger| logger.section(title));
}

/// Log a subsection
pub fn subsection(title: &str) {
    with_logger(|logger| logger.subsection(title));
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    LOGGER.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Log configuration loading
pub fn log_config_load(path: &Path) {
    section("CONFIGURATION LOADING");
    log(&format!("Loading config from: {}", path.display()));
}

/// Log summary of configuration
pub fn log_config_summary(
    fixers: &[&str],
    max_function_complexity: u32,
    max_class_complexity: u32,
    exclude_count: usize,
    ignore_errors_count: usize,
) {
    section("CONFIGURATION SUMMARY");
    log(&format!("Enabled fixers: {}", fixers.join(", ")));
    log(&format!("Function complexity threshold: {}", max_function_complexity));
    log(&format!("Class complexity threshold: {}", max_class_complexity));
    log(&format!("Exclude patterns: {}", exclude_count));
    log(&format!("Ignore error patterns: {}", ignore_errors_count));
}

/// Log the fixers that changed a file
pub fn log_fixer_applied(file: &Path, fixers: &[&str]) {
    if fixers.is_empty() {
        log(&format!("UNCHANGED: {}", file.display()));
    } else {
        log(&format!("FIXED: {} by {}", file.display(), fixers.join(", ")));
    }
}

/// Log a computed complexity score
pub fn log_complexity(name: &str, score: u32, threshold: u32) {
    let verdict = if score > threshold { "OVER" } else { "ok" };
    log(&format!(
        "complexity {} = {} (threshold {}, {})",
        name, score, threshold, verdict
    ));
}

/// Log an issue dropped by an ignore pattern
pub fn log_issue_filtered(issue: &Issue, reason: &str) {
    log(&format!(
        "FILTERED: {}:{} - {}",
        issue.file.display(),
        issue.line,
        issue.message
    ));
    if let Some(id) = &issue.identifier {
        log(&format!("  Identifier: {}", id));
    }
    log(&format!("  Matched by: {}", reason));
}

/// Log analysis start
pub fn log_analysis_start(files_count: usize) {
    section("ANALYSIS START");
    log(&format!("Analyzing {} files", files_count));
}

/// Log analysis complete
pub fn log_analysis_complete(total_errors: usize, filtered_errors: usize) {
    section("ANALYSIS COMPLETE");
    log(&format!("Total errors found: {}", total_errors));
    log(&format!("Errors filtered by ignore patterns: {}", filtered_errors));
    log(&format!(
        "Errors reported: {}",
        total_errors.saturating_sub(filtered_errors)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_writes_timestamped_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let mut logger = DebugLogger::new(&path).unwrap();
        logger.section("ANALYSIS START");
        logger.log("Analyzing 2 files");
        assert_eq!(logger.path(), path.as_path());

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("] ANALYSIS START"));
        assert!(lines[3].starts_with('['));
        assert!(lines[3].ends_with("Analyzing 2 files"));
    }
}

//! tokenfix-analyze: cognitive complexity analysis over token streams
//!
//! This crate provides:
//!
//! - Function-like and class-like discovery in a flat token stream
//! - The cognitive complexity engine and the rules reporting on it
//! - Token dump reading and writing
//! - Multiple output formats (raw, json, table, github)
//! - A debug file logger shared with the fixer front end
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tokenfix_analyze::{output::OutputFormat, AnalyzeConfig, Analyzer};
//!
//! let analyzer = Analyzer::new(AnalyzeConfig::default());
//! let issues = analyzer.analyze_paths(&[Path::new("build/tokens")]).unwrap();
//! println!("{}", tokenfix_analyze::output::format_issues(&issues, OutputFormat::Table));
//! ```

pub mod config;
pub mod dump;
pub mod issue;
pub mod logging;
pub mod output;
pub mod rules;

pub use config::{AnalyzeConfig, IgnoreError};
pub use issue::{Issue, IssueCollection, Severity};

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tokenfix_core::{BlockError, BlockFinder, TokenStream};

use rules::function_like::Symbols;
use rules::{RuleContext, RuleRegistry};

/// Identifier of issues reporting a file that could not be analyzed
pub const ANALYZE_ERROR: &str = "analyze.error";

/// Main analyzer that runs the registered rules
pub struct Analyzer {
    config: AnalyzeConfig,
    registry: RuleRegistry,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: AnalyzeConfig) -> Self {
        Self {
            config,
            registry: RuleRegistry::with_builtin_rules(),
        }
    }

    /// Create analyzer with default configuration
    pub fn with_defaults() -> Self {
        Self::new(AnalyzeConfig::default())
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Analyze a single token dump
    pub fn analyze_file(&self, path: &Path) -> Result<IssueCollection, AnalyzeError> {
        let stream = dump::read_token_dump(path)?;
        self.analyze_stream(path, &stream)
    }

    /// Analyze a stream, reporting issues against `path`
    pub fn analyze_stream(&self, path: &Path, stream: &TokenStream) -> Result<IssueCollection, AnalyzeError> {
        let issues = self.run_rules(path, stream)?;
        Ok(issues
            .into_iter()
            .filter(|issue| !self.config.should_ignore(issue))
            .collect())
    }

    fn run_rules(&self, path: &Path, stream: &TokenStream) -> Result<Vec<Issue>, AnalyzeError> {
        let blocks = BlockFinder::scan(stream).map_err(|source| AnalyzeError::MalformedStream {
            path: path.to_path_buf(),
            source,
        })?;
        let symbols = Symbols::collect(stream, &blocks);

        let ctx = RuleContext {
            file_path: path,
            stream,
            blocks: &blocks,
            symbols: &symbols,
            config: &self.config,
        };

        Ok(self
            .registry
            .all_rules()
            .into_iter()
            .flat_map(|rule| rule.check(&ctx))
            .collect())
    }

    /// Analyze multiple paths (token dumps or directories holding them)
    ///
    /// A file that cannot be read or is malformed is reported as an
    /// [`ANALYZE_ERROR`] issue and does not stop the run.
    pub fn analyze_paths(&self, paths: &[&Path]) -> Result<IssueCollection, AnalyzeError> {
        if paths.is_empty() {
            return Err(AnalyzeError::NoPaths);
        }

        let files = dump::collect_token_dumps(paths, |path| self.config.is_excluded(path));
        logging::log_analysis_start(files.len());

        let results: Vec<(usize, Vec<Issue>)> = files
            .par_iter()
            .map(|file| self.analyze_collected(file))
            .collect();

        let mut combined = IssueCollection::new();
        let mut total = 0;
        for (found, issues) in results {
            total += found;
            combined.extend(issues);
        }

        logging::log_analysis_complete(total, total - combined.len());
        combined.sort();
        Ok(combined)
    }

    /// Issues found in `file` before filtering, and the ones kept
    fn analyze_collected(&self, file: &Path) -> (usize, Vec<Issue>) {
        logging::log(&format!("Analyzing: {}", file.display()));

        let found = dump::read_token_dump(file).and_then(|stream| self.run_rules(file, &stream));
        let issues = match found {
            Ok(issues) => issues,
            Err(err) => {
                logging::log(&format!("ERROR: {}: {}", file.display(), err));
                let issue = Issue::error(ANALYZE_ERROR, err.to_string(), file.to_path_buf(), 1, 1)
                    .with_identifier(ANALYZE_ERROR);
                vec![issue]
            }
        };

        let found = issues.len();
        let kept = issues
            .into_iter()
            .filter(|issue| !self.config.should_ignore(issue))
            .collect();
        (found, kept)
    }
}

/// Errors that can occur during analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid token dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed token stream in {}: {source}", path.display())]
    MalformedStream {
        path: PathBuf,
        #[source]
        source: BlockError,
    },

    #[error("No paths given for analysis")]
    NoPaths,
}

//! File processing logic for tokenfix

use std::path::Path;

use anyhow::{Context, Result};
use tokenfix_analyze::{dump, logging};
use tokenfix_core::BlockFinder;
use tokenfix_fixer::{FixerConfig, FixerRegistry};

/// Result of processing a single token dump
pub struct ProcessResult {
    /// Fixers that changed the stream, in the order they ran
    pub applied: Vec<&'static str>,
    /// Source text of the stream before fixing
    pub old_source: String,
    /// Source text after fixing
    pub new_source: String,
    /// Token dump to write back, only if the stream changed
    pub new_dump: Option<String>,
}

/// Run the named fixers over one token dump, without writing anything
pub fn process_file(
    path: &Path,
    registry: &FixerRegistry,
    fixers: &[&str],
    config: &FixerConfig,
) -> Result<ProcessResult> {
    let mut stream = dump::read_token_dump(path)
        .with_context(|| format!("Failed to load token dump: {}", path.display()))?;

    // fixers assume a balanced stream
    BlockFinder::scan(&stream).with_context(|| format!("Malformed token stream: {}", path.display()))?;

    let old_source = stream.code();
    let applied = registry.fix(&mut stream, fixers, config)?;
    logging::log_fixer_applied(path, &applied);

    let new_dump = if applied.is_empty() {
        None
    } else {
        Some(dump::to_token_dump(&stream)?)
    };

    Ok(ProcessResult {
        applied,
        old_source,
        new_source: stream.code(),
        new_dump,
    })
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

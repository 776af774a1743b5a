//! Token dumps: token streams stored as JSON arrays of `{kind, content}`

use std::fs;
use std::path::{Path, PathBuf};

use tokenfix_core::{Token, TokenStream};
use walkdir::WalkDir;

use crate::AnalyzeError;

/// File name suffix of token dumps
pub const TOKEN_DUMP_SUFFIX: &str = ".tokens.json";

/// Read a token dump into a stream
pub fn read_token_dump(path: &Path) -> Result<TokenStream, AnalyzeError> {
    let content = fs::read_to_string(path)?;
    parse_token_dump(&content)
}

pub fn parse_token_dump(content: &str) -> Result<TokenStream, AnalyzeError> {
    let tokens: Vec<Token> = serde_json::from_str(content)?;
    Ok(TokenStream::new(tokens))
}

/// Serialize a stream as a token dump
pub fn to_token_dump(stream: &TokenStream) -> Result<String, AnalyzeError> {
    let mut json = serde_json::to_string_pretty(stream.tokens())?;
    json.push('\n');
    Ok(json)
}

/// Write a stream back to `path` as a token dump
pub fn write_token_dump(path: &Path, stream: &TokenStream) -> Result<(), AnalyzeError> {
    fs::write(path, to_token_dump(stream)?)?;
    Ok(())
}

pub fn is_token_dump(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(TOKEN_DUMP_SUFFIX))
}

/// Collect token dumps under `paths`, in sorted order
///
/// Files given explicitly are taken as they are; directories are walked for
/// files ending in [`TOKEN_DUMP_SUFFIX`]. `is_excluded` applies to both.
pub fn collect_token_dumps(paths: &[&Path], is_excluded: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if !is_excluded(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() && is_token_dump(entry_path) && !is_excluded(entry_path) {
                    files.push(entry_path.to_path_buf());
                }
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

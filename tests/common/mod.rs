/*!
 * Common test utilities for the crictag test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crictag::RunPaths;

// Re-export the stub Ollama server
pub mod stub_server;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Three-segment transcript used across tests
pub const SAMPLE_TRANSCRIPT: &str = r#"[
    {"start": 0.0, "end": 2.1, "text": "Huge six over long on!"},
    {"start": 2.1, "end": 4.0, "text": "Overstepped again, that's a no ball.", "speaker": "commentator_2"},
    {"start": 4.0, "end": 6.5, "text": "Covers are coming on, rain has stopped play."}
]"#;

/// Writes the sample transcript and returns paths for a run inside `dir`
pub fn sample_run(dir: &Path) -> Result<RunPaths> {
    let input = create_test_file(dir, "transcript_clean.json", SAMPLE_TRANSCRIPT)?;
    Ok(RunPaths {
        input,
        output_json: dir.join("out").join("transcript_labeled.json"),
        output_csv: dir.join("out").join("transcript_labeled.csv"),
    })
}

/// Reads a labeled JSON output as generic values
pub fn read_json(path: &Path) -> Result<Vec<serde_json::Value>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Reads a CSV output as raw lines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
}

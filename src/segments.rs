use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;

// @module: Commentary segment model and transcript loading

/// One timestamped commentary unit from the input transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentarySegment {
    // @field: Start time in seconds, integer or float as written in the input
    pub start: Number,

    // @field: End time in seconds
    pub end: Number,

    // @field: Commentary text
    pub text: String,
}

impl CommentarySegment {
    /// Build a segment from float times. Non-finite times are stored as `0`.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start: seconds(start),
            end: seconds(end),
            text: text.into(),
        }
    }

    // @creates: Labeled copy of this segment
    pub fn with_label(&self, label: impl Into<String>) -> LabeledSegment {
        LabeledSegment {
            start: self.start.clone(),
            end: self.end.clone(),
            text: self.text.clone(),
            label: label.into(),
        }
    }
}

/// A commentary segment together with its validated label.
///
/// Field order is the output column order: `start,end,text,label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSegment {
    pub start: Number,
    pub end: Number,
    pub text: String,
    pub label: String,
}

fn seconds(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0u64))
}

/// Parse a transcript from a JSON string.
///
/// The document must be an array of objects carrying at least `start`, `end`
/// and `text`; any extra keys are ignored.
pub fn parse_segments(content: &str) -> Result<Vec<CommentarySegment>, AppError> {
    serde_json::from_str(content)
        .map_err(|e| AppError::Input(format!("invalid transcript JSON: {}", e)))
}

/// Load a transcript from a JSON file
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<CommentarySegment>, AppError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| AppError::Input(format!("failed to open {:?}: {}", path, e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::Input(format!("invalid transcript JSON in {:?}: {}", path, e)))
}

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::AppError;
use crate::segments::LabeledSegment;

// @module: File and directory utilities

/// CSV header, in output column order
pub const CSV_HEADER: [&str; 4] = ["start", "end", "text", "label"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), AppError> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .map_err(|e| AppError::File(format!("Failed to create directory {:?}: {}", path, e)))?;
        }
        Ok(())
    }

    // @creates: Parent directory of a file path
    pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<(), AppError> {
        match path.as_ref().parent() {
            Some(parent) => Self::ensure_dir(parent),
            None => Ok(()),
        }
    }

    /// Write a value as pretty JSON (4-space indent, UTF-8, non-ASCII kept as-is)
    pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<(), AppError> {
        let path = path.as_ref();
        Self::ensure_parent_dir(path)?;

        let file = File::create(path)
            .map_err(|e| AppError::Output(format!("Failed to create {:?}: {}", path, e)))?;
        let mut writer = BufWriter::new(file);

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|e| AppError::Output(format!("Failed to write JSON to {:?}: {}", path, e)))?;

        writer
            .flush()
            .map_err(|e| AppError::Output(format!("Failed to flush {:?}: {}", path, e)))
    }

    /// Write labeled segments as CSV with a `start,end,text,label` header
    pub fn write_labeled_csv<P: AsRef<Path>>(path: P, segments: &[LabeledSegment]) -> Result<(), AppError> {
        let path = path.as_ref();
        Self::ensure_parent_dir(path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        // Written explicitly so an empty run still gets a header row
        writer.write_record(CSV_HEADER)?;
        for segment in segments {
            writer.serialize(segment)?;
        }

        writer
            .flush()
            .map_err(|e| AppError::Output(format!("Failed to flush {:?}: {}", path, e)))
    }
}

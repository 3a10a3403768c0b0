/*!
 * # crictag - Cricket commentary labeling with a local LLM
 *
 * A Rust library for classifying timestamped cricket commentary into a fixed
 * label vocabulary using a locally hosted Ollama model.
 *
 * ## Features
 *
 * - Load commentary transcripts (`[{start, end, text}, ...]`)
 * - Classify each segment with a single label via Ollama `/api/generate`
 * - Validate answers against a configurable controlled vocabulary
 * - Pace requests to the inference service
 * - Write labeled output as JSON and CSV
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `labels`: Controlled vocabulary and answer normalization
 * - `prompts`: Classification prompt template
 * - `segments`: Commentary segment model and transcript loading
 * - `pacing`: Request rate limiting
 * - `providers`: Inference provider clients:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Scripted provider for tests
 * - `labeler`: The per-segment labeling loop
 * - `file_utils`: JSON and CSV output
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod labeler;
pub mod labels;
pub mod pacing;
pub mod prompts;
pub mod providers;
pub mod segments;

// Re-export main types for easier usage
pub use app_config::{Config, FailurePolicy};
pub use app_controller::{Controller, RunPaths};
pub use errors::{AppError, LabelingError, ProviderError};
pub use labeler::{Labeler, LabelingReport, SegmentFailure};
pub use labels::{LabelSet, UNKNOWN_LABEL};
pub use segments::{CommentarySegment, LabeledSegment};

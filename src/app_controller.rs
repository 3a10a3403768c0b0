use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::labeler::{Labeler, LabelingReport};
use crate::providers::{Ollama, Provider};
use crate::segments::load_segments;

// @module: Application controller for commentary labeling

/// Input and output locations for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    /// Transcript to label
    pub input: PathBuf,
    /// Labeled JSON output
    pub output_json: PathBuf,
    /// Labeled CSV output
    pub output_csv: PathBuf,
}

impl RunPaths {
    /// Default locations inside a data directory
    pub fn in_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            input: data_dir.join("transcript_clean.json"),
            output_json: data_dir.join("transcript_labeled.json"),
            output_csv: data_dir.join("transcript_labeled.csv"),
        }
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Show a progress bar on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Disable the stderr progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Run the workflow against the configured Ollama server
    pub async fn run(&self, paths: &RunPaths) -> Result<LabelingReport> {
        let provider = Ollama::new(&self.config.provider.endpoint, self.config.provider.timeout_secs)
            .context("Failed to create Ollama client")?;
        self.run_with_provider(provider, paths).await
    }

    /// Run the workflow with any provider: load, label, then write JSON and CSV
    pub async fn run_with_provider<P: Provider>(&self, provider: P, paths: &RunPaths) -> Result<LabelingReport> {
        let start_time = Instant::now();

        let segments = load_segments(&paths.input)
            .with_context(|| format!("Failed to load transcript: {:?}", paths.input))?;
        info!("Loaded {} segments from {:?}", segments.len(), paths.input);

        if self.config.labeling.check_connection && !segments.is_empty() {
            if let Err(e) = provider.test_connection().await {
                warn!("Inference service check failed ({}), continuing anyway", e);
            }
        }

        let mut labeler = Labeler::from_config(provider, &self.config)?;
        let progress = self.progress_bar(segments.len() as u64);
        let report = labeler.run_with_progress(&segments, &progress).await;
        progress.finish_and_clear();

        FileManager::write_json(&paths.output_json, &report.labeled)
            .with_context(|| format!("Failed to save labeled JSON: {:?}", paths.output_json))?;
        info!("Labeled transcript saved to {:?}", paths.output_json);

        FileManager::write_labeled_csv(&paths.output_csv, &report.labeled)
            .with_context(|| format!("Failed to save labeled CSV: {:?}", paths.output_csv))?;
        info!("CSV saved to {:?}", paths.output_csv);

        info!(
            "Labeled {} of {} segments ({} failed) in {:.1}s",
            report.labeled.len(),
            segments.len(),
            report.skipped(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(report)
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            progress.set_style(style.progress_chars("#>-"));
        }
        progress
    }
}

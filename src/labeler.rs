/*!
 * The labeling loop.
 *
 * Each segment is sent to the provider one at a time: render prompt, call
 * the provider, normalize the answer against the `LabelSet`, record the
 * result and print a progress line. A failed call never aborts the run; it is
 * logged, recorded in the report and handled according to the
 * `FailurePolicy`.
 */

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::app_config::{Config, FailurePolicy};
use crate::errors::LabelingError;
use crate::labels::{LabelSet, UNKNOWN_LABEL};
use crate::pacing::RequestPacer;
use crate::prompts::PromptTemplate;
use crate::providers::{GenerationRequest, Provider};
use crate::segments::{CommentarySegment, LabeledSegment};

/// A segment whose inference call failed
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFailure {
    /// Zero-based position in the input
    pub index: usize,
    /// Commentary text of the failed segment
    pub text: String,
    /// Error description
    pub reason: String,
}

/// Outcome of a labeling run
#[derive(Debug, Clone, Default)]
pub struct LabelingReport {
    /// Labeled segments, in input order
    pub labeled: Vec<LabeledSegment>,
    /// Segments whose inference call failed, in input order
    pub failures: Vec<SegmentFailure>,
}

impl LabelingReport {
    /// Segments that are missing from `labeled`
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

/// Labels commentary segments with a provider
#[derive(Debug)]
pub struct Labeler<P: Provider> {
    provider: P,
    labels: LabelSet,
    template: PromptTemplate,
    model: String,
    temperature: Option<f32>,
    on_failure: FailurePolicy,
    pacer: RequestPacer,
}

impl<P: Provider> Labeler<P> {
    /// Create a labeler with default template, no pacing and the skip policy
    pub fn new(provider: P, labels: LabelSet, model: impl Into<String>) -> Self {
        Self {
            provider,
            labels,
            template: PromptTemplate::default(),
            model: model.into(),
            temperature: None,
            on_failure: FailurePolicy::Skip,
            pacer: RequestPacer::unlimited(),
        }
    }

    /// Create a labeler from configuration
    pub fn from_config(provider: P, config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider, config.label_set()?, config.provider.model.clone())
            .with_template(config.prompt_template()?)
            .with_temperature(config.provider.temperature)
            .with_failure_policy(config.labeling.on_failure)
            .with_pacer(RequestPacer::per_minute(config.provider.requests_per_minute)))
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_failure_policy(mut self, on_failure: FailurePolicy) -> Self {
        self.on_failure = on_failure;
        self
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Build the request for one segment
    pub fn build_request(&self, segment: &CommentarySegment) -> GenerationRequest {
        let request = GenerationRequest::new(self.model.clone(), self.template.render(&self.labels, &segment.text));
        match self.temperature {
            Some(temperature) => request.temperature(temperature),
            None => request,
        }
    }

    /// Classify a single segment.
    ///
    /// Provider failures are returned; an unrecognised answer is not a failure
    /// and yields `UNKNOWN`.
    pub async fn label_segment(&self, segment: &CommentarySegment) -> Result<LabeledSegment, LabelingError> {
        let response = self.provider.complete(self.build_request(segment)).await?;
        let raw = P::extract_text(&response);
        let label = self.labels.normalize(&raw);
        debug!("Raw answer {:?} -> {}", raw, label);
        Ok(segment.with_label(label))
    }

    /// Label every segment in order without a progress bar
    pub async fn run(&mut self, segments: &[CommentarySegment]) -> LabelingReport {
        self.run_with_progress(segments, &ProgressBar::hidden()).await
    }

    /// Label every segment in order, advancing `progress` once per segment
    pub async fn run_with_progress(&mut self, segments: &[CommentarySegment], progress: &ProgressBar) -> LabelingReport {
        let total = segments.len();
        let mut report = LabelingReport::default();

        for (index, segment) in segments.iter().enumerate() {
            self.pacer.wait().await;

            match self.label_segment(segment).await {
                Ok(labeled) => {
                    progress.suspend(|| println!("{}", progress_line(index, total, &labeled.label, &segment.text)));
                    report.labeled.push(labeled);
                }
                Err(e) => {
                    progress.suspend(|| {
                        println!("{}", failure_line(&segment.text, &e));
                        warn!("Segment {}/{} failed: {}", index + 1, total, e);
                    });
                    report.failures.push(SegmentFailure {
                        index,
                        text: segment.text.clone(),
                        reason: e.to_string(),
                    });

                    if self.on_failure == FailurePolicy::MarkUnknown {
                        progress.suspend(|| println!("{}", progress_line(index, total, UNKNOWN_LABEL, &segment.text)));
                        report.labeled.push(segment.with_label(UNKNOWN_LABEL));
                    }
                }
            }

            progress.inc(1);
        }

        report
    }
}

/// Format the per-segment progress line, e.g. `[3/10] SIX <- Huge six!`
pub fn progress_line(index: usize, total: usize, label: &str, text: &str) -> String {
    format!("[{}/{}] {} <- {}", index + 1, total, label, text)
}

/// Format the diagnostic printed alongside progress lines when a segment fails
pub fn failure_line(text: &str, error: &LabelingError) -> String {
    format!("Error labeling: {}: {}", text, error)
}

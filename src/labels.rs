/*!
 * Controlled label vocabulary.
 *
 * A `LabelSet` is built once at start-up from configuration and shared by
 * both the prompt (which lists the labels) and the validator (which checks
 * the model's answer against them), so the two can never drift apart.
 */

use std::collections::HashSet;

use crate::errors::LabelingError;

/// Sentinel label used whenever the model answer is not a known label
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Default cricket vocabulary, in prompt order
pub const DEFAULT_LABELS: &[&str] = &[
    "SIX",
    "FOUR",
    "WICKET",
    "LBW",
    "RUN OUT",
    "WIDE",
    "NO BALL",
    "FREE HIT",
    "EXTRA",
    "DOT BALL",
    "SINGLE",
    "DOUBLE",
    "THREE",
    "BREAK",
    "STRATEGY BREAK",
    "COMMENTARY",
    "SCORE UPDATE",
    UNKNOWN_LABEL,
    // Events
    "APPEAL",
    "MISS",
    "EDGE",
    "REVIEW",
    "FIELDING EFFORT",
    "DROPPED CATCH",
    "BALL CONTACT",
    // Informational
    "MILESTONE",
    "BOWLING CHANGE",
    "CAPTAINCY DECISION",
    "INJURY",
    "PLAYER INTRO",
    "WEATHER INTERRUPTION",
];

/// Immutable, ordered set of permitted labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    /// Labels in prompt order
    ordered: Vec<String>,
    /// Fast membership lookup
    members: HashSet<String>,
}

impl LabelSet {
    /// Build a label set from configured labels.
    ///
    /// Labels are trimmed and uppercased, duplicates keep their first position,
    /// and the `UNKNOWN` sentinel is appended when missing.
    pub fn new<I, S>(labels: I) -> Result<Self, LabelingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut members = HashSet::new();

        for label in labels {
            let label = label.as_ref().trim().to_uppercase();
            if label.is_empty() {
                return Err(LabelingError::InvalidLabels("labels must not be blank".to_string()));
            }
            if members.insert(label.clone()) {
                ordered.push(label);
            }
        }

        if ordered.iter().all(|l| l == UNKNOWN_LABEL) {
            return Err(LabelingError::InvalidLabels(
                "at least one label besides UNKNOWN is required".to_string(),
            ));
        }

        if members.insert(UNKNOWN_LABEL.to_string()) {
            ordered.push(UNKNOWN_LABEL.to_string());
        }

        Ok(Self { ordered, members })
    }

    /// Check exact membership (case-sensitive)
    pub fn contains(&self, label: &str) -> bool {
        self.members.contains(label)
    }

    /// Map a raw model answer onto the vocabulary.
    ///
    /// The answer is trimmed and uppercased, then must match a label exactly;
    /// anything else becomes `UNKNOWN`.
    pub fn normalize(&self, raw: &str) -> String {
        let candidate = raw.trim().to_uppercase();
        if self.members.contains(&candidate) {
            candidate
        } else {
            UNKNOWN_LABEL.to_string()
        }
    }

    /// Labels in prompt order
    pub fn labels(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Render the vocabulary as a bracketed list of quoted labels,
    /// e.g. `['SIX', 'FOUR', 'RUN OUT']`
    pub fn to_prompt_list(&self) -> String {
        let quoted: Vec<String> = self.ordered.iter().map(|l| format!("'{}'", l)).collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        let ordered: Vec<String> = DEFAULT_LABELS.iter().map(|l| l.to_string()).collect();
        let members = ordered.iter().cloned().collect();
        Self { ordered, members }
    }
}

/*!
 * Prompt template for commentary classification.
 */

use crate::errors::LabelingError;
use crate::labels::LabelSet;

/// Classification prompt template with `{labels}` and `{text}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default classification prompt.
    pub const CRICKET_CLASSIFIER: &'static str = "You are a cricket commentary classification assistant.\n\n\
Label the following cricket commentary into one word from this list:\n\
{labels}.\n\
Only reply with one of the labels exactly as it appears in the list.\n\n\
- Focus on the commentary line. Use context only to disambiguate meaning if necessary and apply some sentiment analysis to predict the label.\n\
Commentary: \"{text}\"";

    /// Create a new prompt template; it must contain a `{text}` placeholder.
    pub fn new(template: &str) -> Result<Self, LabelingError> {
        if !template.contains("{text}") {
            return Err(LabelingError::InvalidTemplate(
                "template must contain a {text} placeholder".to_string(),
            ));
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Create the default cricket classifier template.
    pub fn cricket_classifier() -> Self {
        Self {
            template: Self::CRICKET_CLASSIFIER.to_string(),
        }
    }

    /// Render the template for one commentary segment.
    ///
    /// Labels are substituted first so that commentary text containing a
    /// literal `{labels}` is left untouched.
    pub fn render(&self, labels: &LabelSet, text: &str) -> String {
        self.template
            .replace("{labels}", &labels.to_prompt_list())
            .replace("{text}", text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::cricket_classifier()
    }
}

use std::fmt;

use crate::models::ExtractedText;

const INSTRUCTIONS: &str = "Based ONLY on the following text, answer the user's question. \
Do not use any outside knowledge. If the information is not present, state that. ";

/// Prompt that embeds page text and asks the model to answer only from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingPrompt(String);

impl GroundingPrompt {
    /// Fill the template: instructions, then the `TEXT` section, then the
    /// `USER'S QUESTION` section. Inserted text is not escaped.
    pub fn build(text: &ExtractedText, question: &str) -> Self {
        Self(format!(
            "{INSTRUCTIONS}\n\nTEXT:\n{}\n\nUSER'S QUESTION:\n{question}",
            text.as_str()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroundingPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

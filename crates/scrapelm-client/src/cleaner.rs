use scrapelm_core::error::AppError;
use scrapelm_core::models::ExtractedText;
use scrapelm_core::traits::Cleaner;
use scraper::{Html, Node};

/// Elements whose whole subtree never contributes text.
const EXCLUDED_TAGS: [&str; 4] = ["script", "style", "noscript", "head"];

/// HTML-to-text cleaner backed by scraper (html5ever).
///
/// Parses the document and keeps only visible text, in document order,
/// separated by single spaces.
#[derive(Debug, Clone, Default)]
pub struct HtmlTextCleaner;

impl HtmlTextCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Cleaner for HtmlTextCleaner {
    fn clean(&self, html: &str) -> Result<ExtractedText, AppError> {
        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            tracing::debug!(
                errors = document.errors.len(),
                "Recovered from markup errors while parsing"
            );
        }
        Ok(extract_text(&document))
    }
}

/// Reduce a parsed document to normalized text.
///
/// Pre-order, left-to-right walk with an explicit stack so deeply nested
/// documents cannot overflow the call stack.
pub fn extract_text(document: &Html) -> ExtractedText {
    let mut buffer = String::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) if EXCLUDED_TAGS.contains(&element.name()) => continue,
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    buffer.push_str(trimmed);
                    buffer.push(' ');
                }
            }
            _ => {}
        }
        // Reversed so the first child is popped first.
        stack.extend(node.children().rev());
    }

    ExtractedText::normalize(&buffer)
}

pub mod cleaner;
pub mod fetcher;
pub mod llm;

pub use cleaner::{HtmlTextCleaner, extract_text};
pub use fetcher::ReqwestFetcher;
pub use llm::OllamaClient;

pub mod analysis;
pub mod cache;
pub mod detector;
pub mod document;
pub mod evidence;
pub mod extraction;
pub mod llm;
pub mod report;
pub mod scoring;
pub mod seniority;
pub mod timeline;

pub use analysis::{AnalysisRequest, AnalysisService};
pub use cache::ExtractionCache;
pub use extraction::ClaimExtractor;
pub use llm::LlmClient;

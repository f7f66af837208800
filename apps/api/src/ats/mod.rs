// ATS analysis: PDF text extraction, prompt rendering, the two model calls,
// and export of the rewritten resume.
// All model calls go through llm_client::TextGenerator.

pub mod extractor;
pub mod feedback;
pub mod handlers;
pub mod pipeline;
pub mod prompts;

pub mod chunker;
pub mod llm_provider;
pub mod pdf;
pub mod pipeline;
pub mod summarizer;

//! Request pipeline: resolve the input, extract, chunk, summarize, join.

use tracing::Instrument;
use uuid::Uuid;

use crate::services::chunker::{self, DEFAULT_MAX_CHARS};
use crate::services::pdf;
use crate::services::summarizer::Summarizer;

/// Placeholder emitted in place of a chunk whose summary could not be produced.
pub const ERROR_MARKER: &str = "[Error in summarization]";

pub const NO_INPUT_MESSAGE: &str = "Please upload a PDF or enter some text above.";
pub const NO_TEXT_MESSAGE: &str = "No text found to summarize.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    Upload { filename: String, bytes: Vec<u8> },
    Pasted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSummary {
    Summarized(String),
    Failed,
}

impl ChunkSummary {
    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkSummary::Failed)
    }

    fn as_line(&self) -> &str {
        match self {
            ChunkSummary::Summarized(text) => text.trim(),
            ChunkSummary::Failed => ERROR_MARKER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    NoInput,
    NoText,
    Done {
        summary: String,
        chunks: Vec<ChunkSummary>,
    },
}

/// An upload always wins; pasted text counts only when it is not blank.
pub fn resolve_input(
    upload: Option<(String, Vec<u8>)>,
    pasted: Option<String>,
) -> Option<DocumentInput> {
    if let Some((filename, bytes)) = upload {
        return Some(DocumentInput::Upload { filename, bytes });
    }

    pasted
        .filter(|text| !text.trim().is_empty())
        .map(DocumentInput::Pasted)
}

pub async fn summarize_document(
    summarizer: &dyn Summarizer,
    input: Option<DocumentInput>,
) -> SummaryOutcome {
    let request_id = Uuid::new_v4();

    let Some(input) = input else {
        tracing::info!(%request_id, "No input provided");
        return SummaryOutcome::NoInput;
    };

    let text = match input {
        DocumentInput::Upload { filename, bytes } => {
            match pdf::extract_text_blocking(bytes, &filename).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(%request_id, "Treating unreadable PDF '{filename}' as empty: {e:#}");
                    String::new()
                }
            }
        }
        DocumentInput::Pasted(text) => text,
    };

    if text.trim().is_empty() {
        tracing::info!(%request_id, "Resolved document has no text");
        return SummaryOutcome::NoText;
    }

    let chunks = chunker::chunk_text(&text, DEFAULT_MAX_CHARS);
    tracing::info!(
        %request_id,
        summarizer = %summarizer.describe(),
        "Summarizing {} chars in {} chunk(s)",
        text.chars().count(),
        chunks.len()
    );

    let results = summarize_chunks(summarizer, &chunks)
        .instrument(tracing::info_span!("summarize", %request_id))
        .await;
    let failed = results.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        tracing::warn!(%request_id, "{failed} of {} chunk(s) failed to summarize", results.len());
    }

    SummaryOutcome::Done {
        summary: join_summaries(&results),
        chunks: results,
    }
}

/// Summarize chunks one after another, preserving their order. A failing
/// chunk is recorded and the remaining chunks are still attempted.
pub async fn summarize_chunks(summarizer: &dyn Summarizer, chunks: &[String]) -> Vec<ChunkSummary> {
    let mut results = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        match summarizer.summarize(chunk).await {
            Ok(summary) => {
                tracing::debug!("Chunk {index} summarized ({} chars)", summary.len());
                results.push(ChunkSummary::Summarized(summary));
            }
            Err(e) => {
                tracing::warn!("Chunk {index} failed to summarize: {e}");
                results.push(ChunkSummary::Failed);
            }
        }
    }

    results
}

pub fn join_summaries(results: &[ChunkSummary]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(result.as_line());
        out.push('\n');
    }
    out.trim().to_string()
}

use serde::Serialize;

use crate::services::pipeline::{NO_INPUT_MESSAGE, NO_TEXT_MESSAGE, SummaryOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Done,
    NoInput,
    NoText,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SummarizeResponse {
    pub status: SummaryStatus,
    pub message: Option<String>,
    pub summary: Option<String>,
    pub chunk_count: usize,
    pub failed_chunks: usize,
}

impl From<SummaryOutcome> for SummarizeResponse {
    fn from(outcome: SummaryOutcome) -> Self {
        match outcome {
            SummaryOutcome::NoInput => Self::status_only(SummaryStatus::NoInput, NO_INPUT_MESSAGE),
            SummaryOutcome::NoText => Self::status_only(SummaryStatus::NoText, NO_TEXT_MESSAGE),
            SummaryOutcome::Done { summary, chunks } => Self {
                status: SummaryStatus::Done,
                message: None,
                summary: Some(summary),
                chunk_count: chunks.len(),
                failed_chunks: chunks.iter().filter(|c| c.is_failed()).count(),
            },
        }
    }
}

impl SummarizeResponse {
    fn status_only(status: SummaryStatus, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            summary: None,
            chunk_count: 0,
            failed_chunks: 0,
        }
    }
}

/// Shape of the multipart form accepted by `POST /api/summarize`.
#[cfg(feature = "openapi")]
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct SummarizeForm {
    /// PDF document; takes priority over `text`.
    #[schema(format = Binary)]
    pub file: Option<String>,
    pub text: Option<String>,
}

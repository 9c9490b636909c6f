use utoipa::OpenApi;

use crate::dto::summary::{SummarizeForm, SummarizeResponse, SummaryStatus};
use crate::errors::ErrorResponse;
use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Document Summarizer API",
        version = "0.1.0",
        description = "Chunked abstractive summarization of pasted text or uploaded PDFs."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::summarize::summarize,
    ),
    components(
        schemas(
            HealthResponse,
            SummarizeForm, SummarizeResponse, SummaryStatus,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Summarize", description = "Document summarization"),
    )
)]
pub struct ApiDoc;

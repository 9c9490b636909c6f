use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::dto::summary::SummarizeResponse;
use crate::errors::AppError;
use crate::services::pipeline;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const TEXT_FIELD: &str = "text";

fn is_pdf(content_type: &str, filename: &str) -> bool {
    content_type == "application/pdf" || filename.to_lowercase().ends_with(".pdf")
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body too large".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart data: {e}"))
    }
}

/// Summarize an uploaded PDF (`file`) or pasted text (`text`).
///
/// The three pipeline outcomes are all `200`; only malformed requests are
/// errors.
#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/summarize", tag = "Summarize", request_body(content = crate::dto::summary::SummarizeForm, content_type = "multipart/form-data"), responses((status = 200, body = SummarizeResponse), (status = 400, body = crate::errors::ErrorResponse), (status = 413, body = crate::errors::ErrorResponse))))]
pub async fn summarize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError> {
    let max_file_size = state.config.upload.max_file_size_bytes();

    let mut upload = None;
    let mut pasted = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty, unnamed part when no file was chosen.
                if data.is_empty() && filename.is_empty() {
                    continue;
                }

                if !is_pdf(&content_type, &filename) {
                    return Err(AppError::Validation(
                        "Only PDF files are supported".to_string(),
                    ));
                }

                if data.len() > max_file_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File too large. Maximum size is {} MB",
                        state.config.upload.max_file_size_mb
                    )));
                }

                let filename = if filename.is_empty() {
                    "upload.pdf".to_string()
                } else {
                    filename
                };
                upload = Some((filename, data.to_vec()));
            }
            TEXT_FIELD => {
                pasted = Some(field.text().await.map_err(multipart_error)?);
            }
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    let input = pipeline::resolve_input(upload, pasted);
    let outcome = pipeline::summarize_document(state.summarizer.as_ref(), input).await;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::{AppConfig, ServerConfig, SummarizerConfig, UploadConfig};
    use crate::routes::app;
    use crate::services::pdf::fixtures::blank_pdf;
    use crate::services::summarizer::{Summarizer, SummarizerError};
    use crate::state::AppState;

    const BOUNDARY: &str = "summarizer-test-boundary";

    struct ShoutingSummarizer;

    #[async_trait]
    impl Summarizer for ShoutingSummarizer {
        async fn summarize(&self, chunk: &str) -> Result<String, SummarizerError> {
            Ok(chunk.to_uppercase())
        }

        fn describe(&self) -> String {
            "test/shout".to_string()
        }
    }

    fn test_app(max_file_size_mb: usize) -> Router {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            summarizer: SummarizerConfig {
                provider: "test".into(),
                model: "shout".into(),
                endpoint: String::new(),
                api_key: None,
                request_timeout_secs: 1,
            },
            upload: UploadConfig { max_file_size_mb },
        };
        app(AppState::new(config, Arc::new(ShoutingSummarizer)))
    }

    enum Part<'a> {
        Text(&'a str),
        File {
            filename: &'a str,
            content_type: &'a str,
            data: &'a [u8],
        },
    }

    fn multipart_body(parts: &[(&str, Part<'_>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, part) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    filename,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_form(app: Router, parts: &[(&str, Part<'_>)]) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(multipart_body(parts)))
                    .expect("request"),
            )
            .await
            .expect("router response");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json body");
        (status, json)
    }

    #[tokio::test]
    async fn test_pasted_text_is_summarized() {
        let (status, json) = post_form(
            test_app(1),
            &[("text", Part::Text("first paragraph\nsecond paragraph"))],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "done");
        assert_eq!(json["summary"], "FIRST PARAGRAPH\nSECOND PARAGRAPH");
        assert_eq!(json["chunk_count"], 1);
        assert_eq!(json["failed_chunks"], 0);
    }

    #[tokio::test]
    async fn test_blank_form_asks_for_input() {
        let (status, json) = post_form(
            test_app(1),
            &[
                (
                    "file",
                    Part::File {
                        filename: "",
                        content_type: "application/octet-stream",
                        data: b"",
                    },
                ),
                ("text", Part::Text("   ")),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_input");
        assert_eq!(json["message"], "Please upload a PDF or enter some text above.");
        assert!(json["summary"].is_null());
    }

    #[tokio::test]
    async fn test_textless_pdf_reports_no_text() {
        let pdf = blank_pdf(1);
        let (status, json) = post_form(
            test_app(1),
            &[
                (
                    "file",
                    Part::File {
                        filename: "scan.pdf",
                        content_type: "application/pdf",
                        data: &pdf,
                    },
                ),
                ("text", Part::Text("ignored because a file was uploaded")),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_text");
        assert_eq!(json["message"], "No text found to summarize.");
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let (status, json) = post_form(
            test_app(1),
            &[(
                "file",
                Part::File {
                    filename: "notes.txt",
                    content_type: "text/plain",
                    data: b"hello",
                },
            )],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Only PDF files are supported");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let big = vec![b'%'; 1024 * 1024 + 1];
        let (status, _) = post_form(
            test_app(1),
            &[(
                "file",
                Part::File {
                    filename: "big.pdf",
                    content_type: "application/pdf",
                    data: &big,
                },
            )],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_index_page_and_health() {
        let app = test_app(1);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/api/summarize"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["summarizer"], "test/shout");
    }
}

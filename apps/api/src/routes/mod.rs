pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keyword matching
        .route("/match", post(matching::handle_match))
        // Transcript analysis and question generation
        .route("/extract-context", post(analysis::handle_extract_context))
        .route(
            "/generate-questions",
            post(analysis::handle_generate_questions),
        )
        // Job description documents
        .route(
            "/get-job-description",
            post(documents::handle_get_job_description),
        )
        .route(
            "/get-job-description-local",
            get(documents::handle_get_job_description_local),
        )
        .route("/get-job-description-and-cv", post(analysis::handle_compare))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::documents::store::TextStore;
    use crate::documents::test_support::docx_bytes;
    use crate::llm_client::{Completer, LlmError, Sampling};
    use crate::matching::annotator::RuleAnnotator;
    use crate::matching::extractor::KeywordExtractor;
    use crate::matching::vocabulary::Vocabulary;

    const BOUNDARY: &str = "----cvmatch-test-boundary";

    struct FixedCompleter(&'static str);

    #[async_trait]
    impl Completer for FixedCompleter {
        async fn complete(&self, _prompt: &str, _sampling: &Sampling) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, Vec<u8>),
    }

    fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState {
            extractor: Arc::new(KeywordExtractor::new(
                Arc::new(RuleAnnotator),
                Vocabulary::default(),
            )),
            completer: Arc::new(FixedCompleter("First line\n\nSecond line\n")),
            store: TextStore::new(dir.path()),
        };
        (build_router(state), dir)
    }

    fn multipart_request(uri: &str, parts: Vec<Part<'_>>) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, value: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_match_reports_shared_keywords() {
        let (app, _dir) = test_app();
        let cv = docx_bytes(&["Developer with 6 years of experience in python and sql"]);
        let request = multipart_request(
            "/match",
            vec![
                Part::File("cv_file", "resume.docx", cv),
                Part::Text("job_description", "We want python, sql and leadership"),
            ],
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);

        let similar: Vec<&str> = body["similar_keywords"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(similar.contains(&"python"));
        assert!(similar.contains(&"sql"));

        let score = body["match_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(body["is_match"].as_bool().unwrap(), score >= 50.0);
    }

    #[tokio::test]
    async fn test_match_with_empty_job_description_is_422() {
        let (app, _dir) = test_app();
        let request = multipart_request(
            "/match",
            vec![
                Part::File("cv_file", "resume.docx", docx_bytes(&["Python"])),
                Part::Text("job_description", ""),
            ],
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_match_with_unsupported_file_is_415() {
        let (app, _dir) = test_app();
        let request = multipart_request(
            "/match",
            vec![
                Part::File("cv_file", "resume.txt", b"python".to_vec()),
                Part::Text("job_description", "python"),
            ],
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_match_without_cv_file_is_400() {
        let (app, _dir) = test_app();
        let request = multipart_request("/match", vec![Part::Text("job_description", "python")]);

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("cv_file"));
    }

    #[tokio::test]
    async fn test_extract_context() {
        let (app, _dir) = test_app();
        let request = json_request(
            "/extract-context",
            json!({"transcript": "She led a team of 5 engineers for 2 years."}),
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"]["entities"], json!(["5", "2 years"]));
        assert!(body["context"]["phrases"]
            .as_array()
            .unwrap()
            .contains(&json!("a team")));
    }

    #[tokio::test]
    async fn test_extract_context_rejects_blank_transcript() {
        let (app, _dir) = test_app();
        let request = json_request("/extract-context", json!({"transcript": "  "}));
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_questions() {
        let (app, _dir) = test_app();
        let request = json_request(
            "/generate-questions",
            json!({"context": "Talked about Kafka", "job_description": "Data engineer"}),
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"], json!(["First line", "Second line"]));
    }

    #[tokio::test]
    async fn test_generate_questions_requires_job_description() {
        let (app, _dir) = test_app();
        let request = json_request(
            "/generate-questions",
            json!({"context": "Talked about Kafka", "job_description": ""}),
        );
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_job_description_from_upload() {
        let (app, _dir) = test_app();
        let request = multipart_request(
            "/get-job-description",
            vec![Part::File(
                "job_description_file",
                "jd.docx",
                docx_bytes(&["Rust engineer", "Remote"]),
            )],
        );

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "Rust engineer\nRemote\n");
    }

    #[tokio::test]
    async fn test_local_job_description_after_comparison() {
        let (app, _dir) = test_app();

        let request = Request::builder()
            .uri("/get-job-description-local")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let request = multipart_request(
            "/get-job-description-and-cv",
            vec![
                Part::File("job_description_file", "jd.docx", docx_bytes(&["Rust engineer"])),
                Part::File("cv_file", "cv.docx", docx_bytes(&["Jane Doe"])),
            ],
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobDescriptionSummary"], json!(["First line", "Second line"]));
        assert_eq!(body["cvSummary"], json!(["First line", "Second line"]));
        assert_eq!(body["analysis"], json!(["First line", "Second line"]));

        let request = Request::builder()
            .uri("/get-job-description-local")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "Rust engineer\n");
        assert!(body["saved_at"].is_string());
    }
}

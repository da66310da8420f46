//! End-to-end tests for the HTTP surface.
//!
//! The full router runs against a wiremock stand-in for the completions API,
//! so every test exercises the real pipeline: multipart intake, persistence,
//! the upstream call, typed parsing, cost accounting, and response shaping.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use bankstat::api::{router, AppState};
use bankstat::AnalysisConfig;
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────

const PDF_BYTES: &[u8] = b"%PDF-1.7\nfake statement body\n%%EOF";

fn test_server(mock_uri: &str, upload_dir: &Path) -> TestServer {
    let config = AnalysisConfig::builder()
        .api_key("test-key")
        .api_base_url(mock_uri)
        .upload_dir(upload_dir)
        .build()
        .expect("test config must validate");
    TestServer::new(router(AppState::new(config))).expect("failed to build test server")
}

fn pdf_form(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(PDF_BYTES)
            .file_name(filename)
            .mime_type("application/pdf"),
    )
}

/// A completions reply whose message content is `content`.
fn completion_reply(content: &str, prompt: u64, completion: u64, total: u64) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gemini-2.5-flash-lite",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content}
        }],
        "usage": {
            "prompt_tokens": prompt,
            "completion_tokens": completion,
            "total_tokens": total
        }
    })
}

async fn mock_completions(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

// ── GET / ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_reports_running() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server("http://unused.invalid", dir.path());

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("running"));
}

// ── Upload validation ────────────────────────────────────────────────────

#[tokio::test]
async fn missing_file_field_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server("http://unused.invalid", dir.path());

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = server.post("/bank-statement-analysis").multipart(form).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({"detail": "No file uploaded"}));
}

#[tokio::test]
async fn file_without_filename_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server("http://unused.invalid", dir.path());

    // A bytes part with no filename is not an upload.
    let form = MultipartForm::new().add_part("file", Part::bytes(PDF_BYTES));
    let response = server.post("/bank-statement-analysis").multipart(form).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({"detail": "No file uploaded"}));
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_without_api_call() {
    let dir = tempfile::tempdir().unwrap();
    // No mock mounted: an upstream call would fail loudly.
    let server = test_server("http://unused.invalid", dir.path());

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(&b"just some text"[..])
            .file_name("statement.pdf")
            .mime_type("application/pdf"),
    );
    let response = server.post("/bank-statement-analysis").multipart(form).await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Uploaded file is not a PDF"})
    );
}

// ── Classification outcomes ──────────────────────────────────────────────

#[tokio::test]
async fn negative_classification_collapses_to_message() {
    let mock = MockServer::start().await;
    // Even when the model leaks extra fields, the response must not.
    let content = json!({
        "is_bank_statement": false,
        "bank_name": "Some Bank",
        "transactions": [],
        "analysis": null
    });
    mock_completions(
        &mock,
        ResponseTemplate::new(200)
            .set_body_json(completion_reply(&content.to_string(), 900, 40, 940)),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("letter.pdf"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "is_bank_statement": false,
            "message": "Given file is not a bank statement"
        })
    );
}

#[tokio::test]
async fn positive_classification_returns_full_report() {
    let mock = MockServer::start().await;
    let content = json!({
        "is_bank_statement": true,
        "bank_name": "State Bank of India",
        "account_name": "A. Kumar",
        "CIF_ID": "90210",
        "IFSC": "SBIN0001234",
        "statement_period": {"from": "2024-01-01", "to": "2024-01-31"},
        "transactions": [
            {"date": "2024-01-03", "description": "UPI/grocery",
             "debit": 450.5, "credit": null, "balance": 12000.0}
        ],
        "analysis": "Spending is modest relative to income."
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        // The request must carry the fixed model, deterministic sampling,
        // and forced JSON output.
        .and(body_partial_json(json!({
            "model": "gemini-2.5-flash-lite",
            "temperature": 0.0,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_reply(&content.to_string(), 1000, 500, 1500)),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["is_bank_statement"], true);

    let details = body["bank_details"].as_object().unwrap();
    assert_eq!(details.len(), 5);
    assert_eq!(details["bank_name"], "State Bank of India");
    assert_eq!(details["CIF_ID"], "90210");
    assert_eq!(details["IFSC"], "SBIN0001234");
    assert_eq!(details["statement_period"]["from"], "2024-01-01");

    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(body["transactions"][0]["debit"], 450.5);
    assert_eq!(
        body["analysis"],
        "Spending is modest relative to income."
    );

    // Lite-model pricing at 1000/500 tokens.
    assert_eq!(body["costing"]["model"], "gemini-2.5-flash-lite");
    assert_eq!(body["costing"]["cost"]["currency"], "USD");
    assert_eq!(body["costing"]["cost"]["input_cost"], 0.0001);
    assert_eq!(body["costing"]["cost"]["output_cost"], 0.0002);
    assert_eq!(body["costing"]["cost"]["total_cost"], 0.0003);
    assert_eq!(body["costing"]["usage"]["total_tokens"], 1500);

    // The upload was persisted under its original name.
    let saved = dir.path().join("statement.pdf");
    assert_eq!(std::fs::read(saved).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn total_tokens_is_passed_through_not_recomputed() {
    let mock = MockServer::start().await;
    // 100 + 50 ≠ 175: providers report adjusted totals; we echo theirs.
    mock_completions(
        &mock,
        ResponseTemplate::new(200).set_body_json(completion_reply(
            &json!({"is_bank_statement": true}).to_string(),
            100,
            50,
            175,
        )),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["costing"]["usage"]["prompt_tokens"], 100);
    assert_eq!(body["costing"]["usage"]["completion_tokens"], 50);
    assert_eq!(body["costing"]["usage"]["total_tokens"], 175);
}

// ── Failure paths ────────────────────────────────────────────────────────

#[tokio::test]
async fn non_json_reply_is_502() {
    let mock = MockServer::start().await;
    mock_completions(
        &mock,
        ResponseTemplate::new(200).set_body_json(completion_reply(
            "Sorry, I cannot process this document.",
            10,
            10,
            20,
        )),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Model reply was not valid JSON"})
    );
}

#[tokio::test]
async fn non_object_reply_is_500_invalid_model_response() {
    let mock = MockServer::start().await;
    mock_completions(
        &mock,
        ResponseTemplate::new(200)
            .set_body_json(completion_reply("[1, 2, 3]", 10, 10, 20)),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    response.assert_status_internal_server_error();
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Invalid model response"})
    );
}

#[tokio::test]
async fn upstream_error_status_is_502() {
    let mock = MockServer::start().await;
    mock_completions(
        &mock,
        ResponseTemplate::new(503).set_body_string("model overloaded"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Model API call failed"})
    );
}

// ── Idempotence ──────────────────────────────────────────────────────────

#[tokio::test]
async fn reupload_overwrites_and_yields_identical_response() {
    let mock = MockServer::start().await;
    let content = json!({"is_bank_statement": true, "bank_name": "HDFC"});
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_reply(&content.to_string(), 200, 100, 300)),
        )
        .expect(2)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());

    let first = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;
    let second = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("statement.pdf"))
        .await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(first.json::<Value>(), second.json::<Value>());

    // Still exactly one file on disk.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

// ── Filename handling ────────────────────────────────────────────────────

#[tokio::test]
async fn traversal_filenames_stay_inside_upload_dir() {
    let mock = MockServer::start().await;
    mock_completions(
        &mock,
        ResponseTemplate::new(200).set_body_json(completion_reply(
            &json!({"is_bank_statement": false}).to_string(),
            10,
            10,
            20,
        )),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&mock.uri(), dir.path());
    let response = server
        .post("/bank-statement-analysis")
        .multipart(pdf_form("../../escape.pdf"))
        .await;

    response.assert_status_ok();
    assert!(dir.path().join("escape.pdf").exists());
    assert!(!dir.path().parent().unwrap().join("escape.pdf").exists());
}

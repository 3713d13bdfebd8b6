use std::io::Write;

use mockito::Matcher;
use serde_json::json;

use super::*;

#[test]
fn it_rejects_invalid_base_urls() {
    assert!(matches!(
        HttpBackendClient::new("not a url"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        HttpBackendClient::new("ftp://127.0.0.1:8000"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
}

#[test]
fn it_trims_trailing_slashes_from_base_url() {
    let client = HttpBackendClient::new("http://127.0.0.1:8000/").unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    assert_eq!(client.endpoint("/chat"), "http://127.0.0.1:8000/chat");
}

#[tokio::test]
async fn it_asks_a_question() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(
            json!({ "question": "What are your strongest skills?" }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "answer": "React and TypeScript" }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let answer = client.ask("What are your strongest skills?").await.unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "React and TypeScript");
}

#[tokio::test]
async fn it_maps_error_statuses_with_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(502)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "Failed to reach OpenRouter" }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let err = client.ask("hello").await.unwrap_err();

    match err {
        ClientError::Status { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail.as_deref(), Some("Failed to reach OpenRouter"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn it_reports_malformed_answers_as_decode_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(json!({ "reply": "missing answer field" }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let err = client.ask("hello").await.unwrap_err();

    assert_eq!(err.category(), "decode");
}

#[tokio::test]
async fn it_reports_unreachable_backends_as_transport_errors() {
    let client = HttpBackendClient::new("http://127.0.0.1:1").unwrap();
    let err = client.ask("hello").await.unwrap_err();

    assert_eq!(err.category(), "transport");
}

#[tokio::test]
async fn it_uploads_a_resume_as_multipart() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload-resume")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="resume.pdf""#.to_string()),
            Matcher::Regex("Content-Type: application/pdf".to_string()),
            Matcher::Regex("%PDF-1.4 fake resume".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({ "ok": true, "message": "Resume uploaded", "chars": 120 }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let upload = ResumeUpload::new("resume.pdf", b"%PDF-1.4 fake resume".to_vec());
    client.upload_resume(upload).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn it_ignores_the_upload_response_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload-resume")
        .with_status(201)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let upload = ResumeUpload::new("resume.pdf", b"%PDF".to_vec());

    assert!(client.upload_resume(upload).await.is_ok());
}

#[tokio::test]
async fn it_fails_rejected_uploads() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/upload-resume")
        .with_status(400)
        .with_body(json!({ "detail": "Only PDF files are allowed" }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    let upload = ResumeUpload::new("resume.pdf", b"%PDF".to_vec());
    let err = client.upload_resume(upload).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 400, .. }));
    assert_eq!(
        err.to_string(),
        "backend responded with status 400: Only PDF files are allowed"
    );
}

#[tokio::test]
async fn it_reads_uploads_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.4").unwrap();

    let upload = ResumeUpload::from_path(file.path()).await.unwrap();

    assert!(upload.file_name.ends_with(".pdf"));
    assert_eq!(upload.content_type, "application/pdf");
    assert_eq!(upload.bytes, b"%PDF-1.4".to_vec());
}

#[tokio::test]
async fn it_checks_backend_health() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!({ "status": "Backend running" }).to_string())
        .create_async()
        .await;

    let client = HttpBackendClient::new(&server.url()).unwrap();
    client.health_check().await.unwrap();

    mock.assert_async().await;
}

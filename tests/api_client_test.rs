//! HTTP-level tests for `TutorClient` over the reqwest transport.

use mathtutor::api::{TutorApi, TutorClient};
use mathtutor::error::{ApiError, ErrorCategory};
use mathtutor::models::{ConversationEntry, FeedbackOutcome, FeedbackRequest, Rating, Source};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn answer() -> ConversationEntry {
    ConversationEntry::new("2+2", "4", Source::DirectAnswer, "t1")
}

#[tokio::test]
async fn test_ask_posts_question_and_student() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"question": "What is 2+2?", "student_id": "student1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "What is 2+2?",
            "solution": "Step 1: **4**",
            "source": "knowledge_base",
            "thread_id": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TutorClient::with_url(&server.uri());
    let entry = client.ask("What is 2+2?", "student1").await.unwrap();

    assert_eq!(entry.source, Source::KnowledgeBase);
    assert_eq!(entry.solution, "Step 1: **4**");
    assert_eq!(entry.thread_id, "abc");
}

#[tokio::test]
async fn test_ask_sends_question_untrimmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .and(body_json(json!({"question": "  x + 1 = 2 ", "student_id": "s"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "  x + 1 = 2 ",
            "solution": "x = 1",
            "source": "direct_answer",
            "thread_id": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = TutorClient::with_url(&server.uri())
        .ask("  x + 1 = 2 ", "s")
        .await
        .unwrap();
    assert_eq!(entry.thread_id, "7");
}

#[tokio::test]
async fn test_ask_guardrail_rejection_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Input blocked: only math questions."})),
        )
        .mount(&server)
        .await;

    let err = TutorClient::with_url(&server.uri())
        .ask("tell me a joke", "student1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), Some("Input blocked: only math questions."));
    assert_eq!(err.category(), ErrorCategory::Server);
    assert_eq!(
        ConversationEntry::failure("tell me a joke", err.detail()).solution,
        "Error: Input blocked: only math questions."
    );
}

#[tokio::test]
async fn test_ask_server_error_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = TutorClient::with_url(&server.uri())
        .ask("2+2", "student1")
        .await
        .unwrap_err();
    assert_eq!(err.detail(), None);
    assert_eq!(err.to_string(), "Request failed with status code 502");
}

#[tokio::test]
async fn test_ask_unreachable_backend() {
    let err = TutorClient::with_url("http://127.0.0.1:1")
        .ask("2+2", "student1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.category(), ErrorCategory::Network);
}

#[tokio::test]
async fn test_feedback_refined_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback/"))
        .and(body_json(json!({
            "question": "2+2",
            "original_solution": "4",
            "feedback_text": "show the steps",
            "rating": "bad",
            "thread_id": "t1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "2+2",
            "solution": "Step 1: 2+2\nStep 2: **4**",
            "source": "refined",
            "thread_id": "t1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = FeedbackRequest::for_entry(&answer(), Rating::Bad, "show the steps");
    let outcome = TutorClient::with_url(&server.uri())
        .send_feedback(&request)
        .await
        .unwrap();

    let refined = outcome.refined().unwrap();
    assert_eq!(refined.source, Source::Refined);
    assert_eq!(refined.solution, "Step 1: 2+2\nStep 2: **4**");
}

#[tokio::test]
async fn test_feedback_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Feedback received",
            "source": "feedback"
        })))
        .mount(&server)
        .await;

    let request = FeedbackRequest::for_entry(&answer(), Rating::Good, "");
    let outcome = TutorClient::with_url(&server.uri())
        .send_feedback(&request)
        .await
        .unwrap();

    match outcome {
        FeedbackOutcome::Acknowledged(ack) => {
            assert_eq!(ack.status.as_deref(), Some("Feedback received"));
        }
        other => panic!("expected ack, got {:?}", other),
    }
}

#[tokio::test]
async fn test_feedback_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db down"})))
        .mount(&server)
        .await;

    let request = FeedbackRequest::for_entry(&answer(), Rating::Bad, "x");
    let err = TutorClient::with_url(&server.uri())
        .send_feedback(&request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 500: db down");
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Hello": "Math Agent API is running"})),
        )
        .mount(&server)
        .await;

    assert!(TutorClient::with_url(&server.uri()).health_check().await.unwrap());
}

use api::hackrx;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use vertex_client::{ModelError, TextModel};

/// Records every prompt it receives and replies with a fixed string.
struct CannedModel {
    reply: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextModel for CannedModel {
    async fn query(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call the way a broken upstream would.
struct FailingModel;

#[async_trait]
impl TextModel for FailingModel {
    async fn query(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        })
    }
}

/// Echoes its prompt back inside the answers array.
struct EchoModel;

#[async_trait]
impl TextModel for EchoModel {
    async fn query(&self, prompt: &str) -> Result<String, ModelError> {
        Ok(serde_json::to_string(&json!({"answers": [prompt]})).unwrap())
    }
}

fn post_run(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/hackrx/run")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_fields_return_400_without_calling_the_model() {
    let payloads = vec![
        json!({}),
        json!({"questions": ["q"]}),
        json!({"documents": "https://example.com/doc.pdf"}),
        json!({"documents": "", "questions": ["q"]}),
        json!({"documents": "https://example.com/doc.pdf", "questions": []}),
    ];

    for payload in payloads {
        let model = CannedModel::new("unused");
        let app = api::app(model.clone());

        let response = app.oneshot(post_run(&payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(
            body,
            json!({"error": "Missing 'documents' or 'questions' in payload"})
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn prompt_is_the_preamble_plus_the_pretty_payload() {
    let model = CannedModel::new("{\"answers\": [\"covered\"]}");
    let app = api::app(model.clone());

    let payload = json!({
        "documents": "https://example.com/policy.pdf",
        "questions": ["What is covered?"]
    });

    let response = app.oneshot(post_run(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        format!(
            "{}\n{}",
            hackrx::PROMPT,
            "{\n    \"documents\": \"https://example.com/policy.pdf\",\n    \"questions\": [\n        \"What is covered?\"\n    ]\n}"
        )
    );
}

#[tokio::test]
async fn fenced_reply_is_unwrapped_into_the_response_body() {
    let model = CannedModel::new("```json\n{\"answers\": [\"a\", \"b\"]}\n```");
    let app = api::app(model);

    let payload = json!({
        "documents": "https://example.com/policy.pdf",
        "questions": ["q1", "q2"]
    });

    let response = app.oneshot(post_run(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"answers": ["a", "b"]}));
}

#[tokio::test]
async fn unparseable_reply_returns_500() {
    let model = CannedModel::new("I could not find an answer to that.");
    let app = api::app(model);

    let payload = json!({
        "documents": "https://example.com/policy.pdf",
        "questions": ["q"]
    });

    let response = app.oneshot(post_run(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn model_failure_returns_502_with_the_reason() {
    let app = api::app(Arc::new(FailingModel));

    let payload = json!({
        "documents": "https://example.com/policy.pdf",
        "questions": ["q"]
    });

    let response = app.oneshot(post_run(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "model service returned 429: quota exceeded"
    );
}

#[tokio::test]
async fn concurrent_requests_get_their_own_answers() {
    let app = api::app(Arc::new(EchoModel));

    let first = json!({
        "documents": "https://example.com/a.pdf",
        "questions": ["first question"]
    });
    let second = json!({
        "documents": "https://example.com/b.pdf",
        "questions": ["second question"]
    });

    let (res_a, res_b) = tokio::join!(
        app.clone().oneshot(post_run(&first)),
        app.clone().oneshot(post_run(&second)),
    );

    let body_a = response_json(res_a.unwrap()).await;
    let body_b = response_json(res_b.unwrap()).await;

    let echoed_a = body_a["answers"][0].as_str().unwrap();
    let echoed_b = body_b["answers"][0].as_str().unwrap();

    assert!(echoed_a.contains("first question"));
    assert!(!echoed_a.contains("second question"));
    assert!(echoed_b.contains("second question"));
    assert!(!echoed_b.contains("first question"));
}

#[tokio::test]
async fn index_serves_the_landing_page() {
    let app = api::app(CannedModel::new("unused"));

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/hackrx/run"));
}

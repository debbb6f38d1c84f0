//! Integration tests for `LlmSummarizer` against a wiremock chat endpoint.

use std::sync::Arc;

use brandmon_core::app_config::LlmEndpoint;
use brandmon_core::{AppConfig, LlmProvider, Platform};
use brandmon_monitor::{
    extract, LlmSummarizer, NormalizedRecord, Summarizer, SummarizerError, SummaryRequest,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_config(server: &MockServer, groq_key: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        bright_data_username: "user".to_string(),
        bright_data_password: "pass".to_string(),
        bright_data_api_key: "key".to_string(),
        bright_data_api_url: "https://api.brightdata.com".to_string(),
        proxy_host: "brd.superproxy.io".to_string(),
        proxy_port: 33335,
        search_url: "https://www.google.com/search".to_string(),
        search_recency: "w".to_string(),
        scrape_poll_interval_secs: 10,
        scrape_timeout_secs: 60,
        request_timeout_secs: 5,
        llm_provider: LlmProvider::Ollama,
        llm_temperature: 0.2,
        groq: LlmEndpoint {
            base_url: format!("{}/groq/v1", server.uri()),
            model: "llama3-70b-8192".to_string(),
            api_key: groq_key.map(str::to_string),
        },
        ollama: LlmEndpoint {
            base_url: format!("{}/ollama/v1/", server.uri()),
            model: "deepseek-r1".to_string(),
            api_key: None,
        },
        log_level: "info".to_string(),
    })
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

fn linkedin_records() -> Vec<NormalizedRecord> {
    let raw = json!({
        "url": "https://www.linkedin.com/posts/acme-1",
        "headline": "Acme ships v2",
        "post_text": "Acme v2 is out today",
        "user_id": "jane"
    });
    let serde_json::Value::Object(raw) = raw else {
        unreachable!()
    };
    vec![extract(Platform::LinkedIn, &raw)]
}

const REPORT: &str = r#"{"content":[{"title":"Acme announces v2","link":"https://www.linkedin.com/posts/acme-1","bullet_points":["Acme v2 is out today"]}]}"#;

async fn mount_writer(server: &MockServer, prefix: &str, reply: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("{prefix}/chat/completions")))
        .and(body_partial_json(json!({ "response_format": { "type": "json_schema" } })))
        .respond_with(reply)
        .with_priority(1)
        .mount(server)
        .await;
}

async fn mount_analysis(server: &MockServer, prefix: &str, reply: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("{prefix}/chat/completions")))
        .respond_with(reply)
        .mount(server)
        .await;
}

#[tokio::test]
async fn groq_two_stage_summary_produces_report() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/groq/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({ "model": "llama3-70b-8192", "stream": false })))
        .respond_with(chat_reply("Post 1 by jane announces Acme v2."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groq/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "platform_report", "strict": true }
            }
        })))
        .respond_with(chat_reply(REPORT))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = LlmSummarizer::new(test_config(&server, Some("gsk-test"))).unwrap();
    let records = linkedin_records();
    let report = summarizer
        .summarize(SummaryRequest {
            platform: Platform::LinkedIn,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Groq,
        })
        .await
        .expect("summary should succeed");

    assert_eq!(report.content.len(), 1);
    assert_eq!(report.content[0].title, "Acme announces v2");
    assert_eq!(report.content[0].link, "https://www.linkedin.com/posts/acme-1");

    // The writer stage sees the analysis, the analysis stage sees the records.
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    let analysis = bodies
        .iter()
        .find(|b| b.get("response_format").is_none())
        .unwrap();
    let writer = bodies
        .iter()
        .find(|b| b.get("response_format").is_some())
        .unwrap();
    assert!(analysis["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("https://www.linkedin.com/posts/acme-1"));
    assert!(writer["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("Post 1 by jane announces Acme v2."));
}

#[tokio::test]
async fn ollama_needs_no_key_and_reasoning_is_stripped() {
    let server = MockServer::start().await;

    mount_analysis(
        &server,
        "/ollama/v1",
        chat_reply("<think>let me look</think>Acme v2 launch post."),
    )
    .await;
    mount_writer(
        &server,
        "/ollama/v1",
        chat_reply(&format!("<think>format it</think>\n```json\n{REPORT}\n```")),
    )
    .await;

    let summarizer = LlmSummarizer::new(test_config(&server, None)).unwrap();
    let records = linkedin_records();
    let report = summarizer
        .summarize(SummaryRequest {
            platform: Platform::LinkedIn,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Ollama,
        })
        .await
        .expect("summary should succeed");
    assert_eq!(report.content.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| !r.headers.contains_key("authorization")));
    let writer: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let prompt = writer["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.ends_with("Acme v2 launch post."));
    assert!(!prompt.contains("<think>"));
}

#[tokio::test]
async fn writer_output_not_matching_schema_is_rejected() {
    let server = MockServer::start().await;

    mount_analysis(&server, "/ollama/v1", chat_reply("analysis")).await;
    mount_writer(
        &server,
        "/ollama/v1",
        chat_reply(r#"{"posts":[{"post_title":"x"}]}"#),
    )
    .await;

    let summarizer = LlmSummarizer::new(test_config(&server, None)).unwrap();
    let records = linkedin_records();
    let err = summarizer
        .summarize(SummaryRequest {
            platform: Platform::LinkedIn,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Ollama,
        })
        .await
        .expect_err("invalid report should fail");
    assert!(
        matches!(err, SummarizerError::SchemaValidation { .. }),
        "expected SchemaValidation, got: {err:?}"
    );
}

#[tokio::test]
async fn api_error_status_is_surfaced() {
    let server = MockServer::start().await;

    mount_analysis(
        &server,
        "/ollama/v1",
        ResponseTemplate::new(500).set_body_string("model not loaded"),
    )
    .await;

    let summarizer = LlmSummarizer::new(test_config(&server, None)).unwrap();
    let records = linkedin_records();
    let err = summarizer
        .summarize(SummaryRequest {
            platform: Platform::Instagram,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Ollama,
        })
        .await
        .expect_err("500 should fail");
    match err {
        SummarizerError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn empty_analysis_is_an_empty_response() {
    let server = MockServer::start().await;

    mount_analysis(&server, "/ollama/v1", chat_reply("<think>nothing here</think>")).await;
    mount_writer(&server, "/ollama/v1", chat_reply(REPORT)).await;

    let summarizer = LlmSummarizer::new(test_config(&server, None)).unwrap();
    let records = linkedin_records();
    let err = summarizer
        .summarize(SummaryRequest {
            platform: Platform::YouTube,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Ollama,
        })
        .await
        .expect_err("empty analysis should fail");
    assert!(
        matches!(err, SummarizerError::EmptyResponse { stage: "analysis" }),
        "expected EmptyResponse, got: {err:?}"
    );
}

#[tokio::test]
async fn groq_without_key_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(chat_reply(REPORT))
        .expect(0)
        .mount(&server)
        .await;

    let summarizer = LlmSummarizer::new(test_config(&server, None)).unwrap();
    let records = linkedin_records();
    let err = summarizer
        .summarize(SummaryRequest {
            platform: Platform::X,
            brand_name: "Acme",
            records: &records,
            provider: LlmProvider::Groq,
        })
        .await
        .expect_err("missing key should fail");
    match err {
        SummarizerError::Configuration(message) => assert!(message.contains("GROQ_API_KEY")),
        other => panic!("expected Configuration, got: {other:?}"),
    }
}

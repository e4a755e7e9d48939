//! HTTP 适配器：LLM、HTTP TTS、网页、视频字幕（wiremock 模拟服务端）

use podcastgen::application::ports::{
    GenerationError, GenerationRequest, SourceError, SourceLoaderPort, SynthesisRequest,
    TextGeneratorPort, TtsEnginePort, TtsError,
};
use podcastgen::infrastructure::{
    HttpTtsClient, HttpTtsClientConfig, OpenAiCompatClient, OpenAiCompatClientConfig,
    WebPageLoader, YoutubeTranscriptLoader,
};
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn llm_client(server: &MockServer) -> OpenAiCompatClient {
    OpenAiCompatClient::new(OpenAiCompatClientConfig {
        base_url: server.uri(),
        api_key: Some("gsk_test".to_string()),
        model: "llama-3.1-8b-instant".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_chat_completion_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_json(json!({
            "model": "llama-3.1-8b-instant",
            "messages": [{"role": "user", "content": "写一个大纲"}],
            "max_tokens": 8000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "1. 开场"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = llm_client(&server)
        .generate(&GenerationRequest {
            prompt: "写一个大纲".to_string(),
            max_tokens: 8000,
        })
        .await
        .unwrap();
    assert_eq!(text, "1. 开场");
}

#[tokio::test]
async fn test_chat_completion_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = llm_client(&server)
        .generate(&GenerationRequest {
            prompt: "x".to_string(),
            max_tokens: 10,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::RateLimited));
}

#[tokio::test]
async fn test_chat_completion_empty_choices_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = llm_client(&server)
        .generate(&GenerationRequest {
            prompt: "x".to_string(),
            max_tokens: 10,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_http_tts_writes_audio_to_destination() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tts/infer"))
        .and(body_json(json!({"text": "你好", "voice": "zh-CN-XiaoxiaoNeural"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("segment_0.mp3");
    let client = HttpTtsClient::new(HttpTtsClientConfig::new(server.uri())).unwrap();

    assert!(client.health_check().await);
    client
        .synthesize(&SynthesisRequest {
            text: "你好".to_string(),
            voice: "zh-CN-XiaoxiaoNeural".to_string(),
            output_path: output_path.clone(),
        })
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output_path).unwrap(), b"ID3audio");
}

#[tokio::test]
async fn test_http_tts_unknown_voice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tts/infer"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("segment_0.mp3");
    let client = HttpTtsClient::new(HttpTtsClientConfig::new(server.uri())).unwrap();

    let err = client
        .synthesize(&SynthesisRequest {
            text: "你好".to_string(),
            voice: "xx-XX-Nobody".to_string(),
            output_path: output_path.clone(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TtsError::VoiceNotFound(v) if v == "xx-XX-Nobody"));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_web_page_is_reduced_to_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><script>track()</script></head><body><nav>Home</nav><p>Rust &amp; audio</p></body></html>",
        ))
        .mount(&server)
        .await;

    let loader = WebPageLoader::new(5).unwrap();
    let text = loader.load(&format!("{}/post", server.uri())).await.unwrap();
    assert_eq!(text, "Home\nRust & audio");
}

#[tokio::test]
async fn test_web_page_http_error() {
    let server = MockServer::start().await;
    let loader = WebPageLoader::new(5).unwrap();
    let err = loader.load(&format!("{}/missing", server.uri())).await.unwrap_err();
    assert!(matches!(err, SourceError::NetworkError(_)));
}

const TIMEDTEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0" dur="1.2">Welcome back</text><text start="1.2" dur="2">it&amp;#39;s a show</text></transcript>"#;

#[tokio::test]
async fn test_transcript_prefers_english_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("v", "abc123"))
        .and(query_param("lang", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TIMEDTEXT))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("tlang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TIMEDTEXT))
        .expect(0)
        .mount(&server)
        .await;

    let loader = YoutubeTranscriptLoader::new(5).unwrap().with_base_url(server.uri());
    let text = loader
        .load("https://www.youtube.com/watch?v=abc123&t=3s")
        .await
        .unwrap();
    assert_eq!(text, "Welcome back\nit's a show");
}

#[tokio::test]
async fn test_transcript_falls_back_to_translated_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "zh"))
        .and(query_param("tlang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TIMEDTEXT))
        .expect(1)
        .mount(&server)
        .await;

    let loader = YoutubeTranscriptLoader::new(5).unwrap().with_base_url(server.uri());
    let text = loader.load("https://youtu.be/abc123").await.unwrap();
    assert_eq!(text, "Welcome back\nit's a show");
}

#[tokio::test]
async fn test_transcript_missing() {
    let server = MockServer::start().await;
    let loader = YoutubeTranscriptLoader::new(5).unwrap().with_base_url(server.uri());

    let err = loader.load("https://youtu.be/abc123").await.unwrap_err();
    assert!(matches!(err, SourceError::NoTranscript(id) if id == "abc123"));

    let err = loader
        .load("https://www.youtube.com/channel/UC1")
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::InvalidVideoUrl(_)));
}

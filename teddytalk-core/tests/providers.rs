//! Integration tests for the HTTP providers using wiremock.
//!
//! These stub the upstream endpoints to verify request shape and error
//! mapping without hitting real APIs.

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use teddytalk_core::ai::{self, ChatProvider, GeminiChat, GeminiConfig};
use teddytalk_core::error::FlowError;
use teddytalk_core::settings::config::{ChatProviderConfig, VoiceProviderConfig};
use teddytalk_core::voice::audio::DataUri;
use teddytalk_core::voice::clone::{AllVoiceLabCloneConfig, AllVoiceLabCloner, VoiceCloner};
use teddytalk_core::voice;
use teddytalk_core::voice::tts::{AllVoiceLabTts, AllVoiceLabTtsConfig, SpeechSynthesizer};

fn cloner_for(server: &MockServer) -> AllVoiceLabCloner {
    let mut config = AllVoiceLabCloneConfig::new("test-key".to_string());
    config.base_url = server.uri();
    AllVoiceLabCloner::new(config)
}

fn tts_for(server: &MockServer) -> AllVoiceLabTts {
    let mut config = AllVoiceLabTtsConfig::new("test-key".to_string());
    config.base_url = server.uri();
    AllVoiceLabTts::new(config)
}

fn gemini_for(server: &MockServer) -> GeminiChat {
    let mut config = GeminiConfig::new("test-key".to_string());
    config.base_url = server.uri();
    GeminiChat::new(config)
}

mod cloning {
    use super::*;

    #[tokio::test]
    async fn forwards_the_data_uri_and_returns_the_voice_id() {
        let server = MockServer::start().await;
        let sample = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();

        Mock::given(method("POST"))
            .and(path("/clone"))
            .and(header("X-API-KEY", "test-key"))
            .and(body_json(json!({ "audio": "data:audio/wav;base64,AAAA" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "voiceId": "v-123" })))
            .expect(1)
            .mount(&server)
            .await;

        let voice_id = cloner_for(&server).clone_voice(&sample).await.unwrap();
        assert_eq!(voice_id, "v-123");
    }

    #[tokio::test]
    async fn non_2xx_maps_to_an_upstream_error_with_the_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clone"))
            .respond_with(
                ResponseTemplate::new(402).set_body_json(json!({ "error": "quota exceeded" })),
            )
            .mount(&server)
            .await;

        let sample = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();
        let err = cloner_for(&server).clone_voice(&sample).await.unwrap_err();

        assert!(matches!(err, FlowError::Upstream { .. }));
        assert_eq!(err.status(), Some(402));
    }

    #[tokio::test]
    async fn a_response_without_a_voice_id_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        let sample = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();
        let err = cloner_for(&server).clone_voice(&sample).await.unwrap_err();

        assert!(matches!(err, FlowError::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn a_dead_upstream_is_a_transport_error() {
        let mut config = AllVoiceLabCloneConfig::new("test-key".to_string());
        config.base_url = "http://127.0.0.1:1".to_string();
        let cloner = AllVoiceLabCloner::new(config);

        let sample = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();
        let err = cloner.clone_voice(&sample).await.unwrap_err();

        assert!(matches!(err, FlowError::Transport { .. }));
    }
}

mod synthesis {
    use super::*;

    #[tokio::test]
    async fn passes_already_encoded_audio_through_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(header("X-API-KEY", "test-key"))
            .and(body_json(json!({ "voiceId": "v1", "text": "hello" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "audio": "data:audio/mp3;base64,Zm9v" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let payload = tts_for(&server)
            .synthesize(Some("v1"), "hello")
            .await
            .unwrap();

        assert_eq!(payload.into_media(), "data:audio/mp3;base64,Zm9v");
    }

    #[tokio::test]
    async fn omits_the_voice_id_field_when_no_voice_is_held() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audio": "Zm9v" })))
            .mount(&server)
            .await;

        tts_for(&server).synthesize(None, "hello").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("voiceId").is_none());
        assert_eq!(body["text"], "hello");
    }

    #[tokio::test]
    async fn a_response_without_audio_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = tts_for(&server)
            .synthesize(Some("v1"), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn non_2xx_maps_to_an_upstream_error_with_the_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
            .mount(&server)
            .await;

        let err = tts_for(&server)
            .synthesize(None, "hello")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
    }
}

mod chat {
    use super::*;

    #[tokio::test]
    async fn returns_the_candidate_text_and_sends_the_persona_framing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "Why hello there, friend!" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = gemini_for(&server).respond("hi bear").await.unwrap();
        assert_eq!(reply, "Why hello there, friend!");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi bear");
        let framing = body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(framing.contains("teddy bear"));
    }

    #[tokio::test]
    async fn an_empty_candidate_list_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = gemini_for(&server).respond("hi bear").await.unwrap_err();
        assert!(matches!(err, FlowError::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn non_2xx_maps_to_an_upstream_error_with_the_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = gemini_for(&server).respond("hi bear").await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }
}

mod factories {
    use super::*;

    #[tokio::test]
    async fn missing_keys_fail_at_construction_before_any_request() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("ALL_VOICE_LAB_API_KEY");

        let chat_cfg = ChatProviderConfig::Gemini {
            api_key: None,
            model: None,
            base_url: None,
        };
        assert!(matches!(
            ai::build_provider(&chat_cfg),
            Err(FlowError::Configuration { .. })
        ));

        let voice_cfg = VoiceProviderConfig::AllVoiceLab {
            api_key: None,
            base_url: None,
        };
        assert!(matches!(
            voice::build_cloner(&voice_cfg),
            Err(FlowError::Configuration { .. })
        ));
        assert!(matches!(
            voice::build_synthesizer(&voice_cfg),
            Err(FlowError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn a_configured_key_builds_working_providers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(header("X-API-KEY", "settings-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audio": "Zm9v" })))
            .expect(1)
            .mount(&server)
            .await;

        let voice_cfg = VoiceProviderConfig::AllVoiceLab {
            api_key: Some("settings-key".to_string()),
            base_url: Some(server.uri()),
        };

        let synthesizer = voice::build_synthesizer(&voice_cfg).unwrap();
        let payload = synthesizer.synthesize(None, "hello").await.unwrap();
        assert_eq!(payload.into_media(), "Zm9v");
    }

    #[tokio::test]
    async fn mock_configs_build_offline_providers() {
        let chat = ai::build_provider(&ChatProviderConfig::Mock {
            behavior: Default::default(),
        })
        .unwrap();
        assert_eq!(chat.name(), "mock");

        let voice_cfg = VoiceProviderConfig::Mock { clone_delay_ms: 1 };
        assert_eq!(voice::build_cloner(&voice_cfg).unwrap().name(), "mock");
        assert_eq!(voice::build_synthesizer(&voice_cfg).unwrap().name(), "mock");
    }
}

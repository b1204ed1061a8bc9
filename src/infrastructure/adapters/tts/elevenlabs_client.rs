//! ElevenLabs TTS Client - 调用 ElevenLabs HTTP API
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 API:
//! GET  {base_url}/v1/voices                              -> {"voices": [{"voice_id", "name"}]}
//! POST {base_url}/v1/text-to-speech/{voice_id}?output_format=mp3_44100_128
//!      Request: {"text": "...", "model_id": "..."}  (JSON)
//!      Response: audio/mpeg 字节流
//! 认证: `xi-api-key` header

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
use crate::domain::voice::{VoiceEntry, VoiceId, VoiceName};

const API_KEY_HEADER: &str = "xi-api-key";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceDto>,
}

#[derive(Debug, Deserialize)]
struct VoiceDto {
    voice_id: String,
    name: String,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    pub model_id: String,
    pub output_format: String,
    /// 请求超时时间（秒），0 表示不设超时
    pub timeout_secs: u64,
    /// 合成音频的暂存目录
    pub audio_dir: PathBuf,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 0,
            audio_dir: std::env::temp_dir().join("zerotts"),
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_audio_dir(mut self, audio_dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = audio_dir.into();
        self
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.base_url())
    }

    fn synthesize_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url(), voice_id)
    }

    /// 每个请求一个独立文件，避免并发请求互相覆盖
    fn staging_path(&self) -> PathBuf {
        self.config
            .audio_dir
            .join(format!("{}.mp3", Uuid::new_v4()))
    }

    async fn error_body(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        format!("HTTP {}: {}", status, body)
    }

    async fn stream_to_file(response: Response, path: &Path) -> Result<u64, TtsError> {
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| TtsError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| TtsError::InvalidResponse(format!("Audio stream interrupted: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| TtsError::IoError(e.to_string()))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        Ok(written)
    }
}

fn map_send_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsError> {
        tracing::debug!(url = %self.voices_url(), "Listing voices");

        let response = self
            .client
            .get(self.voices_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(TtsError::VoiceListUnavailable(Self::error_body(response).await));
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse voices: {}", e)))?;

        let entries = body
            .voices
            .into_iter()
            .filter_map(|v| match (VoiceName::new(v.name.clone()), VoiceId::new(v.voice_id.clone())) {
                (Ok(name), Ok(id)) => Some(VoiceEntry::new(name, id)),
                _ => {
                    tracing::warn!(name = %v.name, voice_id = %v.voice_id, "Skipping malformed voice");
                    None
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(count = entries.len(), "Voices listed");
        Ok(entries)
    }

    async fn synthesize_to_file(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedAudio, TtsError> {
        request.validate()?;

        let url = self.synthesize_url(&request.voice_id);
        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[("output_format", self.config.output_format.as_str())])
            .json(&TextToSpeechBody {
                text: &request.text,
                model_id: &self.config.model_id,
            })
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(TtsError::ServiceError(Self::error_body(response).await));
        }

        tokio::fs::create_dir_all(&self.config.audio_dir)
            .await
            .map_err(|e| TtsError::IoError(format!("{}: {}", self.config.audio_dir.display(), e)))?;

        let path = self.staging_path();
        let size_bytes = match Self::stream_to_file(response, &path).await {
            Ok(size) => size,
            Err(e) => {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(e);
            }
        };

        tracing::info!(
            voice_id = %request.voice_id,
            path = %path.display(),
            audio_size = size_bytes,
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio { path, size_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// 一次性 HTTP 服务：依次用给定响应应答，并把收到的请求转发出来
    async fn serve(responses: Vec<(u16, &'static str, Vec<u8>)>) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, content_type, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);
                let head = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    content_type,
                    body.len()
                );
                socket.write_all(head.as_bytes()).await.unwrap();
                socket.write_all(&body).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (format!("http://{}", addr), rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if data.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    fn client(base_url: &str, audio_dir: &Path) -> ElevenLabsClient {
        ElevenLabsClient::new(
            ElevenLabsClientConfig::new("test-key")
                .with_base_url(base_url)
                .with_audio_dir(audio_dir),
        )
        .unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.output_format, "mp3_44100_128");
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let client = client("http://example.com/", dir.path());
        assert_eq!(client.voices_url(), "http://example.com/v1/voices");
        assert_eq!(
            client.synthesize_url("abc"),
            "http://example.com/v1/text-to-speech/abc"
        );
    }

    #[tokio::test]
    async fn test_invalid_input_never_hits_network() {
        let dir = tempfile::tempdir().unwrap();
        // 端口 9 (discard) 上不会有服务，若真的发出请求会得到网络错误
        let client = client("http://127.0.0.1:9", dir.path());

        let result = client.synthesize_to_file(SynthesisRequest::new("", "voice")).await;
        assert!(matches!(result, Err(TtsError::InvalidInput(_))));

        let result = client.synthesize_to_file(SynthesisRequest::new("text", "")).await;
        assert!(matches!(result, Err(TtsError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_voices() {
        let body = br#"{"voices":[{"voice_id":"id-1","name":"Rachel","category":"premade"},{"voice_id":"id-2","name":"Adam"}]}"#;
        let (base_url, mut requests) = serve(vec![(200, "application/json", body.to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();

        let voices = client(&base_url, dir.path()).list_voices().await.unwrap();

        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].name.as_str(), "Rachel");
        assert_eq!(voices[1].id.as_str(), "id-2");
        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("GET /v1/voices "));
        assert!(request.to_lowercase().contains("xi-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_list_voices_without_permission() {
        let body = br#"{"detail":{"status":"missing_permissions","message":"voices_read"}}"#;
        let (base_url, _requests) = serve(vec![(401, "application/json", body.to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();

        let result = client(&base_url, dir.path()).list_voices().await;

        match result {
            Err(TtsError::VoiceListUnavailable(message)) => assert!(message.contains("401")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sequential_synthesis_writes_separate_files() {
        let (base_url, mut requests) = serve(vec![
            (200, "audio/mpeg", b"ID3-first".to_vec()),
            (200, "audio/mpeg", b"ID3-second-longer".to_vec()),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        let client = client(&base_url, dir.path());

        let first = client
            .synthesize_to_file(SynthesisRequest::new("Привет", "voice-1"))
            .await
            .unwrap();
        let second = client
            .synthesize_to_file(SynthesisRequest::new("Привет", "voice-1"))
            .await
            .unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(std::fs::read(&first.path).unwrap(), b"ID3-first");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"ID3-second-longer");
        assert_eq!(second.size_bytes, 17);

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with(
            "POST /v1/text-to-speech/voice-1?output_format=mp3_44100_128 "
        ));
        assert!(request.contains(r#""model_id":"eleven_multilingual_v2""#));
    }

    #[tokio::test]
    async fn test_service_error_leaves_no_file() {
        let (base_url, _requests) =
            serve(vec![(422, "application/json", br#"{"detail":"bad voice"}"#.to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();

        let result = client(&base_url, dir.path())
            .synthesize_to_file(SynthesisRequest::new("hello", "missing"))
            .await;

        match result {
            Err(TtsError::ServiceError(message)) => assert!(message.contains("bad voice")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

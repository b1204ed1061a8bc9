//! 端口的测试替身

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use uuid::Uuid;

use crate::application::ports::{
    AudioTranscoderPort, MessengerError, MessengerPort, ReplyTarget, SynthesisRequest,
    SynthesizedAudio, TranscodeConfig, TranscodeError, TtsEnginePort, TtsError,
};
use crate::domain::voice::{VoiceCatalog, VoiceEntry, VoiceId, VoiceName};

pub fn entries_of(voices: &[(&str, &str)]) -> Vec<VoiceEntry> {
    voices
        .iter()
        .map(|(name, id)| VoiceEntry::new(VoiceName::new(*name).unwrap(), VoiceId::new(*id).unwrap()))
        .collect()
}

pub fn catalog_of(voices: &[(&str, &str)]) -> VoiceCatalog {
    VoiceCatalog::from_entries(entries_of(voices))
}

// ============================================================================
// StubTtsEngine
// ============================================================================

pub struct StubTtsEngine {
    voices: Vec<VoiceEntry>,
    list_error: Option<String>,
    synthesis_error: Mutex<Option<TtsError>>,
    calls: Mutex<Vec<SynthesisRequest>>,
    dir: TempDir,
}

impl StubTtsEngine {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            list_error: None,
            synthesis_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_voices(voices: &[(&str, &str)]) -> Self {
        Self {
            voices: entries_of(voices),
            ..Self::new()
        }
    }

    /// 列出音色时返回 VoiceListUnavailable
    pub fn failing_list(message: &str) -> Self {
        Self {
            list_error: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn failing_synthesis(error: TtsError) -> Self {
        let stub = Self::new();
        *stub.synthesis_error.lock().unwrap() = Some(error);
        stub
    }

    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsEnginePort for StubTtsEngine {
    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsError> {
        match &self.list_error {
            Some(message) => Err(TtsError::VoiceListUnavailable(message.clone())),
            None => Ok(self.voices.clone()),
        }
    }

    async fn synthesize_to_file(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedAudio, TtsError> {
        request.validate()?;
        self.calls.lock().unwrap().push(request);
        if let Some(e) = self.synthesis_error.lock().unwrap().take() {
            return Err(e);
        }
        let path = self.dir.path().join(format!("{}.mp3", Uuid::new_v4()));
        let data = b"ID3\x03\x00fake-mp3";
        std::fs::write(&path, data).unwrap();
        Ok(SynthesizedAudio {
            path,
            size_bytes: data.len() as u64,
        })
    }
}

// ============================================================================
// StubTranscoder
// ============================================================================

pub struct StubTranscoder {
    output: Vec<u8>,
    error: Mutex<Option<TranscodeError>>,
}

impl StubTranscoder {
    /// 每次调用都返回同样的字节
    pub fn ok(bytes: &[u8]) -> Self {
        Self {
            output: bytes.to_vec(),
            error: Mutex::new(None),
        }
    }

    /// 第一次调用返回错误
    pub fn err(error: TranscodeError) -> Self {
        Self {
            output: Vec::new(),
            error: Mutex::new(Some(error)),
        }
    }
}

#[async_trait]
impl AudioTranscoderPort for StubTranscoder {
    async fn mp3_to_ogg_opus(
        &self,
        mp3_path: &Path,
        _config: &TranscodeConfig,
    ) -> Result<Vec<u8>, TranscodeError> {
        assert!(mp3_path.exists(), "transcoder called with missing file");
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.output.clone())
    }
}

// ============================================================================
// RecordingMessenger
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Reply { chat_id: i64, text: String },
    Text { chat_id: i64, text: String },
    Keyboard { chat_id: i64, text: String, labels: Vec<String> },
    Audio { chat_id: i64, path: PathBuf, caption: String },
    Voice { chat_id: i64, bytes: Vec<u8>, caption: String },
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    audio_error: Mutex<Option<String>>,
    voice_error: Mutex<Option<String>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_audio(&self, message: &str) {
        *self.audio_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_voice(&self, message: &str) {
        *self.voice_error.lock().unwrap() = Some(message.to_string());
    }

    fn record(&self, sent: Sent) -> Result<(), MessengerError> {
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl MessengerPort for RecordingMessenger {
    async fn reply_text(&self, target: ReplyTarget, text: &str) -> Result<(), MessengerError> {
        self.record(Sent::Reply {
            chat_id: target.chat_id,
            text: text.to_string(),
        })
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn reply_with_keyboard(
        &self,
        target: ReplyTarget,
        text: &str,
        labels: &[String],
    ) -> Result<(), MessengerError> {
        self.record(Sent::Keyboard {
            chat_id: target.chat_id,
            text: text.to_string(),
            labels: labels.to_vec(),
        })
    }

    async fn send_audio(
        &self,
        chat_id: i64,
        path: &Path,
        caption: &str,
    ) -> Result<(), MessengerError> {
        if let Some(message) = self.audio_error.lock().unwrap().clone() {
            return Err(MessengerError::SendFailed(message));
        }
        assert!(path.exists(), "audio sent from missing file");
        self.record(Sent::Audio {
            chat_id,
            path: path.to_path_buf(),
            caption: caption.to_string(),
        })
    }

    async fn send_voice(
        &self,
        chat_id: i64,
        ogg_opus: Vec<u8>,
        caption: &str,
    ) -> Result<(), MessengerError> {
        if let Some(message) = self.voice_error.lock().unwrap().clone() {
            return Err(MessengerError::SendFailed(message));
        }
        self.record(Sent::Voice {
            chat_id,
            bytes: ogg_opus,
            caption: caption.to_string(),
        })
    }
}

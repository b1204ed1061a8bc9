//! Voice Context - 用户的音色选择

use chrono::{DateTime, Utc};

use super::{VoiceId, VoiceName};

/// 用户最近一次选择的音色
///
/// 选择是"全量"的：不会再向服务商校验 voice_id 是否仍然有效
#[derive(Debug, Clone)]
pub struct VoiceSelection {
    pub voice_id: VoiceId,
    pub voice_name: VoiceName,
    pub selected_at: DateTime<Utc>,
}

impl VoiceSelection {
    pub fn new(voice_id: VoiceId, voice_name: VoiceName) -> Self {
        Self {
            voice_id,
            voice_name,
            selected_at: Utc::now(),
        }
    }
}

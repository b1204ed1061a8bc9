//! Voice Commands

use crate::application::ports::ReplyTarget;
use crate::domain::voice::UserId;

/// 启动时加载音色目录
#[derive(Debug, Clone, Default)]
pub struct LoadVoiceCatalog {
    /// 无法列出音色时使用的服务商 voice_id
    pub fallback_voice_id: Option<String>,
}

/// /start：展示音色键盘
#[derive(Debug, Clone)]
pub struct ShowVoiceMenu {
    pub target: ReplyTarget,
}

/// 用户点击了某个音色按钮
#[derive(Debug, Clone)]
pub struct SelectVoice {
    pub user_id: UserId,
    pub target: ReplyTarget,
    pub voice_name: String,
}

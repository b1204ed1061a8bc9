//! Synthesis Commands

use crate::application::ports::ReplyTarget;
use crate::domain::voice::UserId;

/// 用当前选择的音色朗读一段文本
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub user_id: UserId,
    pub target: ReplyTarget,
    pub text: String,
}

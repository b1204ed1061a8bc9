//! Message Router - 入站文本分发
//!
//! 每条文本消息归入三类之一:
//! - `/start` 命令：展示音色键盘
//! - 与目录中某个显示名称完全一致：选择音色
//! - 其余一切（包括未知命令）：朗读请求

use std::sync::Arc;

use crate::application::commands::handlers::{
    SelectVoiceHandler, ShowVoiceMenuHandler, SynthesizeSpeechHandler,
};
use crate::application::commands::{SelectVoice, ShowVoiceMenu, SynthesizeSpeech};
use crate::application::error::ApplicationError;
use crate::application::ports::ReplyTarget;
use crate::domain::voice::{UserId, VoiceCatalog};

const START_COMMAND: &str = "/start";

/// 入站文本消息
#[derive(Debug, Clone)]
pub struct IncomingText {
    pub user_id: UserId,
    pub target: ReplyTarget,
    pub text: String,
}

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    SelectVoice,
    Synthesize,
}

pub struct MessageRouter {
    catalog: Arc<VoiceCatalog>,
    show_menu: ShowVoiceMenuHandler,
    select_voice: SelectVoiceHandler,
    synthesize: SynthesizeSpeechHandler,
}

impl MessageRouter {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        show_menu: ShowVoiceMenuHandler,
        select_voice: SelectVoiceHandler,
        synthesize: SynthesizeSpeechHandler,
    ) -> Self {
        Self {
            catalog,
            show_menu,
            select_voice,
            synthesize,
        }
    }

    pub fn classify(&self, text: &str) -> Route {
        if is_start_command(text) {
            Route::Start
        } else if self.catalog.contains_name(text) {
            Route::SelectVoice
        } else {
            Route::Synthesize
        }
    }

    pub async fn dispatch(&self, message: IncomingText) -> Result<Route, ApplicationError> {
        let route = self.classify(&message.text);
        tracing::debug!(user_id = %message.user_id, route = ?route, "Routing message");

        match route {
            Route::Start => {
                self.show_menu
                    .handle(ShowVoiceMenu {
                        target: message.target,
                    })
                    .await?;
            }
            Route::SelectVoice => {
                self.select_voice
                    .handle(SelectVoice {
                        user_id: message.user_id,
                        target: message.target,
                        voice_name: message.text,
                    })
                    .await?;
            }
            Route::Synthesize => {
                self.synthesize
                    .handle(SynthesizeSpeech {
                        user_id: message.user_id,
                        target: message.target,
                        text: message.text,
                    })
                    .await?;
            }
        }

        Ok(route)
    }
}

/// `/start`, `/start@bot_name`, `/start payload`
fn is_start_command(text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let command = first.split('@').next().unwrap_or(first);
    command == START_COMMAND
}

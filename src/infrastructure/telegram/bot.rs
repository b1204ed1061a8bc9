//! Telegram Bot - 分发循环
//!
//! teloxide Dispatcher 负责长轮询；每条文本消息交给 MessageRouter

use std::sync::Arc;
use teloxide::prelude::*;

use crate::application::ports::ReplyTarget;
use crate::application::router::{IncomingText, MessageRouter};
use crate::domain::voice::UserId;

/// Telegram 消息 -> 路由输入；没有发送者或不是文本时返回 None
pub fn to_incoming(msg: &Message) -> Option<IncomingText> {
    let user = msg.from.as_ref()?;
    let text = msg.text()?;
    Some(IncomingText {
        user_id: UserId::new(user.id.0 as i64),
        target: ReplyTarget::new(msg.chat.id.0, msg.id.0),
        text: text.to_string(),
    })
}

async fn handle_message(msg: Message, router: Arc<MessageRouter>) -> ResponseResult<()> {
    let Some(incoming) = to_incoming(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "Telegram: ignoring non-text message");
        return Ok(());
    };

    let user_id = incoming.user_id;
    // 用户可见的错误已在处理器内回复；这里只剩消息发送失败之类的问题
    if let Err(e) = router.dispatch(incoming).await {
        tracing::error!(user_id = %user_id, error = %e, "Telegram: failed to handle message");
    }

    Ok(())
}

/// Telegram bot，把消息转发给 MessageRouter
pub struct TelegramBot {
    bot: Bot,
    router: Arc<MessageRouter>,
}

impl TelegramBot {
    pub fn new(bot: Bot, router: Arc<MessageRouter>) -> Self {
        Self { bot, router }
    }

    /// 运行分发循环直到 Ctrl-C
    pub async fn run(self) {
        match self.bot.get_me().await {
            Ok(me) => {
                if let Some(ref username) = me.username {
                    tracing::info!("Telegram: bot username is @{}", username);
                }
            }
            Err(e) => {
                tracing::warn!("Telegram: failed to get bot info (get_me): {}", e);
            }
        }

        let router = self.router.clone();
        let handler = Update::filter_message().endpoint(move |msg: Message| {
            let router = router.clone();
            async move { handle_message(msg, router).await }
        });

        tracing::info!("Telegram: dispatcher started");
        Dispatcher::builder(self.bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
        tracing::info!("Telegram: dispatcher stopped");
    }
}

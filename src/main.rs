//! zerotts - Telegram 语音朗读机器人
//!
//! 启动流程:
//! 配置 -> 日志 -> TTS 引擎 -> 音色目录 -> 转码器 -> Telegram 分发循环

use std::sync::Arc;

use teloxide::Bot;
use zerotts::application::{
    AudioTranscoderPort, LoadVoiceCatalog, LoadVoiceCatalogHandler, MessageRouter,
    SelectVoiceHandler, ShowVoiceMenuHandler, SynthesizeSpeechHandler, TranscodeConfig,
    TtsEnginePort,
};
use zerotts::config::{load_config, print_config, AppConfig, TtsEngineKind};
use zerotts::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, FakeTtsClient, FakeTtsClientConfig,
    FfmpegTranscoder, FfmpegTranscoderConfig,
};
use zerotts::infrastructure::{InMemorySelectionStore, TelegramBot, TelegramMessenger};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},zerotts={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_tts_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    let audio_dir = config.storage.audio_dir.clone();

    match config.tts.engine {
        TtsEngineKind::ElevenLabs => {
            let api_key = config.tts.api_key.clone().unwrap_or_default();
            let client_config = ElevenLabsClientConfig {
                api_key,
                base_url: config.tts.base_url.clone(),
                model_id: config.tts.model_id.clone(),
                output_format: config.tts.output_format.clone(),
                timeout_secs: config.tts.timeout_secs,
                audio_dir,
            };
            Ok(Arc::new(ElevenLabsClient::new(client_config)?))
        }
        TtsEngineKind::Fake => {
            let audio_file_path = config
                .tts
                .fake_audio_path
                .clone()
                .ok_or_else(|| anyhow::anyhow!("tts.fake_audio_path is not set"))?;
            let client_config = FakeTtsClientConfig {
                audio_file_path,
                audio_dir,
            };
            Ok(Arc::new(FakeTtsClient::new(client_config)?))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：ZEROTTS_ 环境变量 > 配置文件 > BOT_TOKEN 等环境变量 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("zerotts - Telegram TTS bot");
    print_config(&config);

    // 确保暂存目录存在
    tokio::fs::create_dir_all(&config.storage.audio_dir).await?;

    let tts_engine = build_tts_engine(&config)?;

    // 音色目录：拉取失败时退化为单一 "Default" 音色，两者都不可用则退出
    let catalog = LoadVoiceCatalogHandler::new(tts_engine.clone())
        .handle(LoadVoiceCatalog {
            fallback_voice_id: config.tts.fallback_voice_id.clone(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load voice catalog: {}", e))?;
    let catalog = Arc::new(catalog);

    let transcoder = FfmpegTranscoder::new(FfmpegTranscoderConfig {
        executable: config.transcoder.ffmpeg_path.clone(),
        search_path: config.transcoder.search_path,
        fallback_path: config.transcoder.fallback_path.clone(),
        max_diagnostic_chars: config.transcoder.max_diagnostic_chars,
    });
    // 找不到 ffmpeg 不阻止启动：用户仍能收到 MP3，只是没有语音消息
    match transcoder.locate() {
        Ok(path) => tracing::info!("FFmpeg found at {}", path.display()),
        Err(e) => tracing::warn!("{}", e),
    }
    let transcoder: Arc<dyn AudioTranscoderPort> = Arc::new(transcoder);

    let selections = Arc::new(InMemorySelectionStore::new());

    let token = config.telegram.bot_token.clone().unwrap_or_default();
    let bot = Bot::new(token);
    let messenger = Arc::new(
        TelegramMessenger::new(bot.clone()).with_keyboard_columns(config.telegram.keyboard_columns),
    );

    let router = MessageRouter::new(
        catalog.clone(),
        ShowVoiceMenuHandler::new(catalog.clone(), messenger.clone()),
        SelectVoiceHandler::new(catalog.clone(), selections.clone(), messenger.clone()),
        SynthesizeSpeechHandler::new(
            tts_engine,
            transcoder,
            selections,
            messenger,
            TranscodeConfig {
                bitrate: config.transcoder.bitrate.clone(),
            },
        ),
    );

    tracing::info!(voices = catalog.len(), "Starting Telegram bot...");

    TelegramBot::new(bot, Arc::new(router)).run().await;

    tracing::info!("Bot shutdown complete");

    Ok(())
}

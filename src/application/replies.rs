//! 面向用户的回复文本

pub const WELCOME: &str = "Привет! Я бот для создания озвучки.\n\
Выбери голос, который будет использоваться при озвучке:";

pub const VOICE_NOT_FOUND: &str = "Не удалось найти выбранный голос. Попробуй /start ещё раз.";

pub const NO_VOICE_SELECTED: &str = "Сначала выберите голос командой /start.";

pub const EMPTY_TEXT: &str = "Пустой текст. Введите текст для озвучки.";

pub const AUDIO_CAPTION: &str = "Готово! Вот mp3-файл озвучки.";

pub const VOICE_CAPTION: &str = "И это же — голосовое сообщение.";

pub fn voice_selected(voice_name: &str) -> String {
    format!(
        "Вы выбрали голос: {}. Теперь отправьте текст для озвучки.",
        voice_name
    )
}

pub fn synthesis_failed(error: &dyn std::fmt::Display) -> String {
    format!("Ошибка при генерации аудио: {}", error)
}

pub fn conversion_failed(error: &dyn std::fmt::Display) -> String {
    format!("Не удалось сформировать голосовое (OGG/Opus): {}", error)
}

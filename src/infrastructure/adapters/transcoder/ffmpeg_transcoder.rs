//! FFmpeg Transcoder - 调用外部 ffmpeg 进程的音频转码器
//!
//! MP3 -> OGG/Opus (单声道, VBR)，stdout 整体读入内存:
//! `ffmpeg -y -i <input> -ac 1 -c:a libopus -b:a <bitrate> -vbr on -f ogg pipe:1`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoderPort, TranscodeConfig, TranscodeError};

const FFMPEG_BINARY: &str = "ffmpeg";

/// 错误信息中保留的 stderr 最大字符数
pub const DEFAULT_MAX_DIAGNOSTIC_CHARS: usize = 4000;

/// FFmpeg 转码器配置
#[derive(Debug, Clone)]
pub struct FfmpegTranscoderConfig {
    /// 显式指定的可执行文件
    pub executable: Option<PathBuf>,
    /// 是否在 PATH 中查找 ffmpeg
    pub search_path: bool,
    /// PATH 中找不到时尝试的位置
    pub fallback_path: Option<PathBuf>,
    pub max_diagnostic_chars: usize,
}

impl Default for FfmpegTranscoderConfig {
    fn default() -> Self {
        Self {
            executable: None,
            search_path: true,
            fallback_path: None,
            max_diagnostic_chars: DEFAULT_MAX_DIAGNOSTIC_CHARS,
        }
    }
}

/// FFmpeg 转码器
pub struct FfmpegTranscoder {
    config: FfmpegTranscoderConfig,
}

impl FfmpegTranscoder {
    pub fn new(config: FfmpegTranscoderConfig) -> Self {
        Self { config }
    }

    /// 按顺序查找可执行文件: 显式路径 -> PATH -> 备用路径
    pub fn locate(&self) -> Result<PathBuf, TranscodeError> {
        let mut checked = Vec::new();

        if let Some(path) = &self.config.executable {
            if path.is_file() {
                return Ok(path.clone());
            }
            checked.push(path.display().to_string());
        }

        if self.config.search_path {
            match which::which(FFMPEG_BINARY) {
                Ok(path) => return Ok(path),
                Err(_) => checked.push(format!("{} in PATH", FFMPEG_BINARY)),
            }
        }

        if let Some(path) = &self.config.fallback_path {
            if path.is_file() {
                return Ok(path.clone());
            }
            checked.push(path.display().to_string());
        }

        Err(TranscodeError::Unavailable(format!(
            "FFmpeg not found (checked: {}). Install ffmpeg or set transcoder.ffmpeg_path / the FFMPEG environment variable",
            if checked.is_empty() {
                "nothing".to_string()
            } else {
                checked.join(", ")
            }
        )))
    }

    fn build_command(executable: &Path, input: &Path, bitrate: &str) -> Command {
        let mut command = Command::new(executable);
        command
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-ac", "1"])
            .args(["-c:a", "libopus"])
            .arg("-b:a")
            .arg(bitrate)
            .args(["-vbr", "on"])
            .args(["-f", "ogg"])
            .arg("pipe:1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    fn truncate_diagnostic(&self, stderr: &[u8]) -> String {
        String::from_utf8_lossy(stderr)
            .chars()
            .take(self.config.max_diagnostic_chars)
            .collect()
    }
}

#[async_trait]
impl AudioTranscoderPort for FfmpegTranscoder {
    async fn mp3_to_ogg_opus(
        &self,
        mp3_path: &Path,
        config: &TranscodeConfig,
    ) -> Result<Vec<u8>, TranscodeError> {
        let executable = self.locate()?;

        if !mp3_path.is_file() {
            return Err(TranscodeError::InvalidInput(format!(
                "Input file not found: {}",
                mp3_path.display()
            )));
        }

        tracing::debug!(
            ffmpeg = %executable.display(),
            input = %mp3_path.display(),
            bitrate = %config.bitrate,
            "Transcoding to OGG/Opus"
        );

        let output = Self::build_command(&executable, mp3_path, &config.bitrate)
            .output()
            .await
            .map_err(|e| TranscodeError::SpawnFailed {
                path: executable.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() || output.stdout.is_empty() {
            return Err(TranscodeError::ProcessFailed {
                status: output.status.to_string(),
                stderr: self.truncate_diagnostic(&output.stderr),
            });
        }

        tracing::info!(
            input = %mp3_path.display(),
            output_size = output.stdout.len(),
            "Transcode completed"
        );

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcoder_at(path: PathBuf) -> FfmpegTranscoder {
        FfmpegTranscoder::new(FfmpegTranscoderConfig {
            executable: Some(path),
            search_path: false,
            fallback_path: None,
            ..Default::default()
        })
    }

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn mp3(dir: &Path) -> PathBuf {
        let path = dir.join("input.mp3");
        std::fs::write(&path, b"ID3fake").unwrap();
        path
    }

    #[test]
    fn test_locate_reports_checked_paths() {
        let transcoder = FfmpegTranscoder::new(FfmpegTranscoderConfig {
            executable: Some(PathBuf::from("/nonexistent/ffmpeg")),
            search_path: false,
            fallback_path: Some(PathBuf::from("/also/missing/ffmpeg.exe")),
            ..Default::default()
        });

        match transcoder.locate() {
            Err(TranscodeError::Unavailable(message)) => {
                assert!(message.contains("/nonexistent/ffmpeg"));
                assert!(message.contains("/also/missing/ffmpeg.exe"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = transcoder_at(PathBuf::from("/nonexistent/ffmpeg"));

        let result = transcoder
            .mp3_to_ogg_opus(&mp3(dir.path()), &TranscodeConfig::default())
            .await;

        assert!(matches!(result, Err(TranscodeError::Unavailable(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fallback_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = script(dir.path(), "ffmpeg-fallback", "printf OggS");
        let transcoder = FfmpegTranscoder::new(FfmpegTranscoderConfig {
            executable: None,
            search_path: false,
            fallback_path: Some(fallback.clone()),
            ..Default::default()
        });

        assert_eq!(transcoder.locate().unwrap(), fallback);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_passes_expected_arguments_and_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(dir.path(), "ffmpeg", r#"printf 'OggS:%s' "$*""#);
        let input = mp3(dir.path());

        let output = transcoder_at(exe)
            .mp3_to_ogg_opus(&input, &TranscodeConfig::default())
            .await
            .unwrap();

        let expected = format!(
            "OggS:-y -i {} -ac 1 -c:a libopus -b:a 64k -vbr on -f ogg pipe:1",
            input.display()
        );
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(
            dir.path(),
            "ffmpeg",
            "echo \"Unknown encoder 'libopus'\" >&2\nexit 1",
        );

        let result = transcoder_at(exe)
            .mp3_to_ogg_opus(&mp3(dir.path()), &TranscodeConfig::default())
            .await;

        match result {
            Err(e @ TranscodeError::ProcessFailed { .. }) => {
                assert!(e.to_string().contains("Unknown encoder 'libopus'"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(dir.path(), "ffmpeg", "exit 0");

        let result = transcoder_at(exe)
            .mp3_to_ogg_opus(&mp3(dir.path()), &TranscodeConfig::default())
            .await;

        assert!(matches!(result, Err(TranscodeError::ProcessFailed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_diagnostics_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(
            dir.path(),
            "ffmpeg",
            "i=0\nwhile [ $i -lt 600 ]; do printf 'abcdefghij' >&2; i=$((i+1)); done\nexit 1",
        );

        let result = transcoder_at(exe)
            .mp3_to_ogg_opus(&mp3(dir.path()), &TranscodeConfig::default())
            .await;

        match result {
            Err(TranscodeError::ProcessFailed { stderr, .. }) => {
                assert_eq!(stderr.chars().count(), DEFAULT_MAX_DIAGNOSTIC_CHARS);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(dir.path(), "ffmpeg", "printf OggS");

        let result = transcoder_at(exe)
            .mp3_to_ogg_opus(&dir.path().join("missing.mp3"), &TranscodeConfig::default())
            .await;

        assert!(matches!(result, Err(TranscodeError::InvalidInput(_))));
    }
}

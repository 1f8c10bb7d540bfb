//! Speech engines driven through external commands.

use crate::stt::{ListenOptions, SpeechInput, VoiceError};
use crate::tts::{sanitize_for_speech, SpeechOutput, VoiceSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

const SPEAK_TIMEOUT: Duration = Duration::from_secs(60);

/// Split a configured command line into program and leading arguments.
fn split_command(command_line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command_line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// espeak-compatible TTS: `<command> -v <voice> -s <rate> <text>`.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    command: String,
    settings: VoiceSettings,
}

impl CommandSpeaker {
    pub fn new(command: &str, settings: VoiceSettings) -> Self {
        Self {
            command: command.to_string(),
            settings,
        }
    }
}

#[async_trait]
impl SpeechOutput for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        let clean = sanitize_for_speech(text);
        if clean.is_empty() {
            return Ok(());
        }
        let (program, args) = split_command(&self.command).context("TTS command is empty")?;

        let run = Command::new(&program)
            .args(&args)
            .arg("-v")
            .arg(&self.settings.voice)
            .arg("-s")
            .arg(self.settings.rate.to_string())
            .arg(&clean)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(SPEAK_TIMEOUT, run).await {
            Ok(res) => res.with_context(|| format!("Failed to run TTS command `{}`", program))?,
            Err(_) => anyhow::bail!("TTS command timed out after {}s", SPEAK_TIMEOUT.as_secs()),
        };

        if !output.status.success() {
            anyhow::bail!(
                "TTS command failed with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    fn voice_id(&self) -> &str {
        &self.settings.voice
    }

    fn provider_name(&self) -> &'static str {
        "command"
    }
}

/// STT through an external recognizer that prints the transcript on stdout.
///
/// The listen bounds are passed to the child as `MINDFUL_LISTEN_TIMEOUT` and
/// `MINDFUL_PHRASE_TIME_LIMIT` (seconds); their sum also caps the whole run.
#[derive(Debug, Clone)]
pub struct CommandListener {
    command: String,
}

impl CommandListener {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

#[async_trait]
impl SpeechInput for CommandListener {
    async fn listen(&self, options: ListenOptions) -> Result<String, VoiceError> {
        let (program, args) = split_command(&self.command)
            .ok_or_else(|| VoiceError::Unavailable("STT command is empty".to_string()))?;

        let run = Command::new(&program)
            .args(&args)
            .env(
                "MINDFUL_LISTEN_TIMEOUT",
                options.timeout.as_secs_f64().to_string(),
            )
            .env(
                "MINDFUL_PHRASE_TIME_LIMIT",
                options.phrase_time_limit.as_secs_f64().to_string(),
            )
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(options.total(), run).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(VoiceError::Unavailable(format!(
                    "failed to start `{}`: {}",
                    program, e
                )))
            }
            Err(_) => return Err(VoiceError::Timeout(options.total())),
        };

        if !output.status.success() {
            return Err(VoiceError::Engine(format!(
                "`{}` exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(VoiceError::NotRecognized);
        }
        tracing::debug!("Recognized {} chars of speech", text.len());
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "command"
    }
}

//! Session controller: drives one conversation from greeting to farewell.
//!
//! A [`Session`] owns its config and history; nothing is process-global, so
//! any number of sessions can live side by side. Each turn runs to the end
//! before the next input is read:
//!
//! ```text
//! Idle -> AwaitingInput -> Processing -> Responding -> AwaitingInput ... -> Terminated
//! ```

use crate::llm::CompletionClient;
use crate::prompts::PromptComposer;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Timelike;
use mindful_core::{MoodAssessment, MoodClassifier, SessionConfig};
use mindful_memory::{ConversationLog, History, Role};
use mindful_voice::{
    ListenOptions, NoSpeechInput, SilentSpeaker, SpeechInput, SpeechOutput, VoiceError,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub const DEGRADED_PREFIX: &str =
    "Sorry, I'm having trouble responding. Please try again later.";
pub const FAREWELL: &str = "Remember to be kind to yourself. Reach out if you need support.";
pub const HELP_TEXT: &str = "\
Options:
- type your thoughts and press Enter to talk
- 'mic': switch between typing and speaking (in voice mode an empty line starts listening)
- 'voice': toggle spoken responses
- 'clear': reset the conversation
- 'exit': end the conversation";

const EXIT_WORDS: &[&str] = &["exit", "bye", "goodbye", "quit", "stop", "thank you", "thanks"];

/// Greeting for a wall-clock hour (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 5 {
        "It's late! How are you holding up?"
    } else if hour < 12 {
        "Good morning! How are you feeling today?"
    } else if hour < 18 {
        "Good afternoon! What's on your mind?"
    } else {
        "Good evening. How was your day?"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingInput,
    Processing,
    Responding,
    Terminated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    Voice,
}

/// Session-level commands, checked before input is treated as conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    ToggleVoice,
    ToggleInput,
    Exit,
}

impl Command {
    /// Case-insensitive whole-input match; trailing `.` and `!` are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        let normalized = normalized.trim_end_matches(['.', '!']).trim();
        match normalized {
            "help" => Some(Command::Help),
            "clear" => Some(Command::Clear),
            "voice" => Some(Command::ToggleVoice),
            "mic" => Some(Command::ToggleInput),
            word if EXIT_WORDS.contains(&word) => Some(Command::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub mood: MoodAssessment,
    /// True when the completion failed and `text` is the local fallback.
    pub degraded: bool,
}

/// What one handled input amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Ignored,
    Help,
    Cleared,
    VoiceToggled(bool),
    InputModeChanged(InputMode),
    Reply(Reply),
    Exit,
}

/// Line-oriented user interface the run loop talks to.
#[async_trait(?Send)]
pub trait Console {
    /// `Ok(None)` means the user closed the input (EOF or interrupt).
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn show(&mut self, text: &str);
}

pub struct Session {
    id: Uuid,
    config: SessionConfig,
    history: History,
    classifier: MoodClassifier,
    client: Arc<dyn CompletionClient>,
    speech_in: Arc<dyn SpeechInput>,
    speech_out: Arc<dyn SpeechOutput>,
    log: Option<ConversationLog>,
    speak_replies: bool,
    input_mode: InputMode,
    state: SessionState,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        classifier: MoodClassifier,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        let history = History::new(config.max_history);
        let log = config.log_path.clone().map(ConversationLog::new);
        Self {
            id: Uuid::new_v4(),
            config,
            history,
            classifier,
            client,
            speech_in: Arc::new(NoSpeechInput),
            speech_out: Arc::new(SilentSpeaker),
            log,
            speak_replies: false,
            input_mode: InputMode::Text,
            state: SessionState::Idle,
        }
    }

    pub fn with_speech_input(mut self, speech_in: Arc<dyn SpeechInput>) -> Self {
        self.speech_in = speech_in;
        self
    }

    pub fn with_speech_output(mut self, speech_out: Arc<dyn SpeechOutput>) -> Self {
        self.speech_out = speech_out;
        self
    }

    pub fn with_spoken_replies(mut self, enabled: bool) -> Self {
        self.speak_replies = enabled;
        self
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn speaks_replies(&self) -> bool {
        self.speak_replies
    }

    /// Open the session with a greeting for `hour`, spoken if enabled.
    pub async fn greet(&mut self, hour: u32) -> &'static str {
        let greeting = greeting_for_hour(hour);
        self.say(greeting).await;
        self.state = SessionState::AwaitingInput;
        greeting
    }

    /// Handle one line of input, typed or transcribed.
    ///
    /// A conversational input leaves the session in `Responding`; call
    /// [`Session::respond`] once the reply has been shown.
    pub async fn handle_input(&mut self, raw: &str) -> Step {
        let input = raw.trim();
        if input.is_empty() {
            return Step::Ignored;
        }

        match Command::parse(input) {
            Some(Command::Help) => Step::Help,
            Some(Command::Clear) => {
                self.history.clear();
                tracing::info!("Conversation history cleared");
                Step::Cleared
            }
            Some(Command::ToggleVoice) => {
                self.speak_replies = !self.speak_replies;
                Step::VoiceToggled(self.speak_replies)
            }
            Some(Command::ToggleInput) => {
                self.input_mode = match self.input_mode {
                    InputMode::Text => InputMode::Voice,
                    InputMode::Voice => InputMode::Text,
                };
                Step::InputModeChanged(self.input_mode)
            }
            Some(Command::Exit) => Step::Exit,
            None => Step::Reply(self.process(input).await),
        }
    }

    /// Mood → prompt → completion → history for one conversational input.
    pub async fn process(&mut self, input: &str) -> Reply {
        self.state = SessionState::Processing;

        let mood = self.classifier.assess(input);
        tracing::debug!(
            polarity = mood.polarity,
            subjectivity = mood.subjectivity,
            "Mood assessed"
        );

        let prompt = {
            let tail = self.history.last(self.config.context_turns);
            PromptComposer::compose(input, &mood.directive, &tail)
        };

        let result = self.client.complete(&prompt).await;

        self.remember(Role::User, input).await;
        let reply = match result {
            Ok(text) => {
                self.remember(Role::Assistant, &text).await;
                Reply {
                    text,
                    mood,
                    degraded: false,
                }
            }
            Err(e) => {
                tracing::error!("{} completion failed: {}", self.client.provider_name(), e);
                Reply {
                    text: format!("{} ({})", DEGRADED_PREFIX, e),
                    mood,
                    degraded: true,
                }
            }
        };

        self.state = SessionState::Responding;
        reply
    }

    /// Speak the reply if enabled, then wait for the next input.
    pub async fn respond(&mut self, reply: &Reply) {
        self.say(&reply.text).await;
        self.state = SessionState::AwaitingInput;
    }

    /// Capture one utterance with the configured listen bounds.
    pub async fn listen(&self) -> Result<String, VoiceError> {
        let options = ListenOptions {
            timeout: self.config.listen_timeout(),
            phrase_time_limit: self.config.phrase_time_limit(),
        };
        let text = self.speech_in.listen(options).await?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(VoiceError::NotRecognized);
        }
        Ok(text)
    }

    /// Close the session. History is wiped when `clear_on_exit` is set.
    pub async fn farewell(&mut self) -> &'static str {
        self.say(FAREWELL).await;
        if self.config.clear_on_exit {
            self.history.clear();
        }
        self.state = SessionState::Terminated;
        FAREWELL
    }

    /// Full conversation loop over `console`, from greeting to farewell.
    pub async fn run(&mut self, console: &mut dyn Console) {
        let span = tracing::info_span!("session", id = %self.id);
        self.run_loop(console).instrument(span).await
    }

    async fn run_loop(&mut self, console: &mut dyn Console) {
        tracing::info!(model = %self.config.model, "Session started");
        let greeting = self.greet(chrono::Local::now().hour()).await;
        console.show(greeting);

        loop {
            let prompt = match self.input_mode {
                InputMode::Text => "You: ",
                InputMode::Voice => "You (Enter to speak): ",
            };
            let line = match console.read_line(prompt).await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Console read failed, ending session: {:#}", e);
                    break;
                }
            };

            let line = if self.input_mode == InputMode::Voice && line.trim().is_empty() {
                console.show("Listening...");
                match self.listen().await {
                    Ok(text) => {
                        console.show(&format!("You said: {}", text));
                        text
                    }
                    Err(e) => {
                        tracing::warn!("Voice input failed: {}", e);
                        console.show(&format!("Voice input error: {}", e));
                        continue;
                    }
                }
            } else {
                line
            };

            match self.handle_input(&line).await {
                Step::Ignored => {}
                Step::Help => console.show(HELP_TEXT),
                Step::Cleared => console.show("Conversation history cleared"),
                Step::VoiceToggled(on) => console.show(if on {
                    "Voice responses enabled"
                } else {
                    "Voice responses disabled"
                }),
                Step::InputModeChanged(InputMode::Voice) => {
                    console.show("Voice input on: press Enter on an empty line to speak")
                }
                Step::InputModeChanged(InputMode::Text) => console.show("Voice input off"),
                Step::Reply(reply) => {
                    console.show(&format!("Companion: {}", reply.text));
                    self.respond(&reply).await;
                }
                Step::Exit => break,
            }
        }

        let farewell = self.farewell().await;
        console.show(farewell);
        tracing::info!(turns = self.history.len(), "Session ended");
    }

    async fn remember(&mut self, role: Role, content: &str) {
        self.history.append(role, content);
        if let Some(log) = &self.log {
            log.record(role, content).await;
        }
    }

    async fn say(&self, text: &str) {
        if !self.speak_replies {
            return;
        }
        if let Err(e) = self.speech_out.speak(text).await {
            tracing::warn!(
                "{} speech synthesis failed: {:#}",
                self.speech_out.provider_name(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_bands() {
        assert_eq!(greeting_for_hour(0), "It's late! How are you holding up?");
        assert_eq!(greeting_for_hour(4), "It's late! How are you holding up?");
        assert_eq!(
            greeting_for_hour(5),
            "Good morning! How are you feeling today?"
        );
        assert_eq!(greeting_for_hour(12), "Good afternoon! What's on your mind?");
        assert_eq!(greeting_for_hour(17), "Good afternoon! What's on your mind?");
        assert_eq!(greeting_for_hour(18), "Good evening. How was your day?");
        assert_eq!(greeting_for_hour(23), "Good evening. How was your day?");
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("  CLEAR "), Some(Command::Clear));
        assert_eq!(Command::parse("Voice"), Some(Command::ToggleVoice));
        assert_eq!(Command::parse("mic"), Some(Command::ToggleInput));
        for word in ["exit", "Bye!", "goodbye.", "QUIT", "stop", "Thank you", "thanks!"] {
            assert_eq!(Command::parse(word), Some(Command::Exit), "{}", word);
        }
    }

    #[test]
    fn test_conversation_is_not_a_command() {
        assert_eq!(Command::parse("I can't stop worrying"), None);
        assert_eq!(Command::parse("help me please"), None);
        assert_eq!(Command::parse(""), None);
    }
}

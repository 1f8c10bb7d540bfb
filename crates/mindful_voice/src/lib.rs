//! Voice capabilities for a companion session
//!
//! Speech-to-text and text-to-speech are exposed as two small traits so the
//! session engine never depends on a particular device or vendor API.
//! Command-backed implementations drive external engines such as `espeak`.

mod command;
mod stt;
mod tts;

pub use command::{CommandListener, CommandSpeaker};
pub use stt::{ListenOptions, NoSpeechInput, SpeechInput, VoiceError};
pub use tts::{sanitize_for_speech, SilentSpeaker, SpeechOutput, VoiceSettings};

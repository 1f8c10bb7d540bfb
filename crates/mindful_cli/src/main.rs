mod console;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::TerminalConsole;
use mindful_core::{LexiconScorer, MoodClassifier, SentimentScorer, SessionConfig};
use mindful_reasoning::{InputMode, OllamaClient, Session};
use mindful_voice::{
    CommandListener, CommandSpeaker, NoSpeechInput, SilentSpeaker, SpeechInput, SpeechOutput,
    VoiceSettings,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mindful", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "MINDFUL_CONFIG")]
    config: Option<PathBuf>,

    /// Model name, overrides the config file
    #[arg(short, long)]
    model: Option<String>,

    /// Completion endpoint URL, overrides the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Speak replies from the start
    #[arg(long)]
    speak: bool,

    /// Start in voice input mode
    #[arg(long)]
    voice_input: bool,

    /// Diagnostic log format (written to stderr)
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    guard
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mindful").join("companion.toml"))
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match args.config.clone().or_else(default_config_path) {
        Some(path) => {
            info!("Loading config from {}...", path.display());
            SessionConfig::load_or_default(&path)?
        }
        None => {
            let mut cfg = SessionConfig::default();
            cfg.apply_env_overrides();
            cfg
        }
    };
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_format);

    // 1. Config (fatal if incomplete)
    let config = load_config(&args)?;

    // 2. Mood classifier
    let scorer: Arc<dyn SentimentScorer> = match &config.lexicon_path {
        Some(path) => Arc::new(
            LexiconScorer::load(path).context("Sentiment scorer could not be initialized")?,
        ),
        None => Arc::new(LexiconScorer::builtin()),
    };

    // 3. Completion client
    info!("Using model {} at {}", config.model, config.api_url);
    let client = OllamaClient::from_config(&config)?;

    // 4. Speech engines
    let speech_out: Arc<dyn SpeechOutput> = if config.tts_command.trim().is_empty() {
        Arc::new(SilentSpeaker)
    } else {
        Arc::new(CommandSpeaker::new(
            &config.tts_command,
            VoiceSettings {
                voice: config.preferred_voice.clone(),
                rate: config.speech_rate,
            },
        ))
    };
    let speech_in: Arc<dyn SpeechInput> = match &config.stt_command {
        Some(cmd) => Arc::new(CommandListener::new(cmd)),
        None => Arc::new(NoSpeechInput),
    };

    let input_mode = if args.voice_input {
        InputMode::Voice
    } else {
        InputMode::Text
    };
    let mut session = Session::new(config, MoodClassifier::new(scorer), Arc::new(client))
        .with_speech_output(speech_out)
        .with_speech_input(speech_in)
        .with_spoken_replies(args.speak)
        .with_input_mode(input_mode);

    println!("\nMental Health Companion");
    println!("Type 'help' for options or 'exit' to quit\n");

    let mut console = TerminalConsole::new()?;
    session.run(&mut console).await;

    Ok(())
}

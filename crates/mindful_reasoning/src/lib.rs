pub mod api_types;
pub mod llm;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod session;

pub use llm::{CompletionClient, CompletionError, CompletionParams};
pub use prompts::PromptComposer;
pub use providers::ollama::OllamaClient;
pub use retry::{DelayStrategy, RetryPolicy};
pub use session::{Command, Console, InputMode, Reply, Session, SessionState, Step};

//! Append-only conversation log.
//!
//! Every turn that enters history is written as a `"{role}: {content}"` line.
//! The log is an audit trail only: it is never read back, and it keeps turns
//! that the in-memory history has since evicted or cleared.

use crate::history::Role;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct ConversationLog {
    path: PathBuf,
}

impl ConversationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, role: Role, content: &str) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open conversation log {}", self.path.display()))?;

        let line = format!("{}: {}\n", role, content);
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to write conversation log {}", self.path.display()))?;
        file.flush().await?;
        Ok(())
    }

    /// Like [`ConversationLog::append`], but failures are only logged.
    pub async fn record(&self, role: Role, content: &str) {
        if let Err(e) = self.append(role, content).await {
            tracing::warn!("Conversation log write failed: {:#}", e);
        }
    }
}

use anyhow::Result;
use async_trait::async_trait;
use mindful_reasoning::Console;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Terminal console backed by rustyline (line editing and in-session recall).
pub struct TerminalConsole {
    editor: DefaultEditor,
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

#[async_trait(?Send)]
impl Console for TerminalConsole {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        // Blocking read: a session only ever has one turn in flight.
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("Session interrupted");
                Ok(None)
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn show(&mut self, text: &str) {
        println!("{}\n", text);
    }
}

//! Interactive dispatch REPL with persistent history.
//!
//! Each line goes through the backend's `generate` and the selected agent
//! is executed with the reply's parameters. Errors are printed and the
//! loop continues.

use anyhow::Result;
use rustyline::error::ReadlineError;
use sbcore::{Backend, Switchboard};
use std::path::PathBuf;

/// Interactive REPL, generic over the backend.
pub struct Repl<B: Backend> {
    board: Switchboard<B>,
    editor: rustyline::DefaultEditor,
    history_path: Option<PathBuf>,
}

impl<B: Backend> Repl<B> {
    /// Create a new REPL over a prepared switchboard.
    pub fn new(board: Switchboard<B>) -> Result<Self> {
        let mut editor = rustyline::DefaultEditor::new()?;
        let history_path = history_file_path();
        if let Some(ref path) = history_path {
            let _ = editor.load_history(path);
        }
        Ok(Self {
            board,
            editor,
            history_path,
        })
    }

    /// Run the interactive loop until `exit`, `quit` or Ctrl+D.
    pub async fn run(&mut self) -> Result<()> {
        println!("Switchboard REPL ('exit' or Ctrl+D to quit)");
        println!("Enter a reply as JSON: {{\"agent\": \"...\", \"parameters\": {{...}}}}");
        println!("---");

        loop {
            match self.editor.readline("> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if matches!(line, "exit" | "quit") {
                        break;
                    }
                    let _ = self.editor.add_history_entry(line);
                    match dispatch(&self.board, line).await {
                        Ok(output) => println!("{output}"),
                        Err(e) => eprintln!("Error: {e:#}"),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        self.save_history();
        Ok(())
    }

    fn save_history(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = self.editor.save_history(path);
        }
    }
}

/// Route one input line and execute the selected agent.
///
/// Returns the agent name and its pretty-printed result.
pub async fn dispatch<B: Backend>(board: &Switchboard<B>, input: &str) -> Result<String> {
    let reply = board.generate(input).await?;
    tracing::debug!(agent = %reply.agent, "dispatching");
    let result = board.registry().execute(&reply.agent, reply.parameters)?;
    Ok(format!(
        "Selected agent: {}\nResult: {}",
        reply.agent,
        serde_json::to_string_pretty(&result)?
    ))
}

/// Resolve the history file path at `~/.config/switchboard/history`.
fn history_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("switchboard").join("history"))
}

//! Line input: an interactive terminal editor and a scripted replay

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config as EditorConfig, Editor};

use crate::core::error::{PlanError, Result};

/// One read from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or end of script
    Eof,
}

/// Source of input lines plus the history and screen operations
/// the interpreter needs
pub trait LineReader {
    /// Read one line, optionally pre-filled with `initial`
    fn read_line(&mut self, prompt: &str, initial: Option<&str>) -> Result<Input>;

    fn add_history(&mut self, line: &str);

    fn clear_history(&mut self) -> Result<()>;

    fn load_history(&mut self, path: &Path) -> Result<()>;

    fn save_history(&mut self, path: &Path) -> Result<()>;

    fn clear_screen(&mut self) -> Result<()>;
}

/// Interactive reader backed by rustyline
pub struct TerminalReader {
    editor: Editor<(), DefaultHistory>,
}

impl TerminalReader {
    pub fn new(history_size: usize) -> Result<Self> {
        let config = EditorConfig::builder()
            .max_history_size(history_size)
            .map_err(readline_error)?
            .auto_add_history(false)
            .build();
        let editor = Editor::with_config(config).map_err(readline_error)?;
        Ok(Self { editor })
    }
}

fn readline_error(e: ReadlineError) -> PlanError {
    PlanError::Readline(e.to_string())
}

fn history_error(path: &Path, e: ReadlineError) -> PlanError {
    match e {
        ReadlineError::Io(source) => PlanError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => readline_error(other),
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str, initial: Option<&str>) -> Result<Input> {
        let read = match initial {
            Some(text) => self.editor.readline_with_initial(prompt, (text, "")),
            None => self.editor.readline(prompt),
        };
        match read {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(readline_error(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!("could not record history entry: {}", e);
        }
    }

    fn clear_history(&mut self) -> Result<()> {
        self.editor.clear_history().map_err(readline_error)
    }

    fn load_history(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        self.editor
            .load_history(path)
            .map_err(|e| history_error(path, e))
    }

    fn save_history(&mut self, path: &Path) -> Result<()> {
        self.editor
            .save_history(path)
            .map_err(|e| history_error(path, e))
    }

    fn clear_screen(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Replays a fixed list of lines, then reports end of input
///
/// Used for `--execute` and for driving the interpreter in tests.
#[derive(Debug, Default)]
pub struct ScriptReader {
    inputs: VecDeque<Input>,
    /// Entries recorded through `add_history`
    pub history: Vec<String>,
    /// Prompts shown, with their pre-filled text
    pub prompts: Vec<(String, Option<String>)>,
    pub screen_clears: usize,
}

impl ScriptReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_inputs(lines.into_iter().map(|l| Input::Line(l.into())))
    }

    pub fn from_inputs(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl LineReader for ScriptReader {
    fn read_line(&mut self, prompt: &str, initial: Option<&str>) -> Result<Input> {
        self.prompts
            .push((prompt.to_string(), initial.map(str::to_string)));
        Ok(self.inputs.pop_front().unwrap_or(Input::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }

    fn load_history(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.history = content.lines().map(str::to_string).collect();
        Ok(())
    }

    fn save_history(&mut self, path: &Path) -> Result<()> {
        let mut content = self.history.join("\n");
        content.push('\n');
        std::fs::write(path, content).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.screen_clears += 1;
        Ok(())
    }
}

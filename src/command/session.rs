//! The interpreter loop
//!
//! A session is either waiting for a command or waiting for the
//! description of a pending add/update. Each input line moves it through
//! exactly one transition; nothing blocks inside the dispatcher.

use std::io::Write;

use crate::command::executor::{CommandExecutor, Effect, ExecutionResult, Notice, PendingEdit};
use crate::command::path::clean_description;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::Command;
use crate::plan::model::Plan;
use crate::plan::store;
use crate::ui::console::Console;
use crate::ui::terminal::{Input, LineReader};

/// Where the session is in its line-by-line state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Command,
    AwaitingDescription(PendingEdit),
}

/// What the loop should do after one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    ClearScreen,
    EraseHistory,
    Exit { save: bool },
}

/// Prompt for the next read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub initial: Option<String>,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// The user asked for the plan to be saved
    pub save_requested: bool,
    /// The plan was written successfully
    pub saved: bool,
}

/// One interpreter session owning the plan
pub struct Session<W: Write> {
    plan: Plan,
    mode: Mode,
    console: Console<W>,
    prompt: String,
}

impl<W: Write> Session<W> {
    pub fn new(plan: Plan, console: Console<W>, prompt: impl Into<String>) -> Self {
        Self {
            plan,
            mode: Mode::Command,
            console,
            prompt: prompt.into(),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn console(&mut self) -> &mut Console<W> {
        &mut self.console
    }

    pub fn into_parts(self) -> (Plan, Console<W>) {
        (self.plan, self.console)
    }

    /// Prompt for the next read, depending on the mode
    pub fn prompt(&self) -> Prompt {
        match &self.mode {
            Mode::Command => Prompt {
                text: self.prompt.clone(),
                initial: None,
            },
            Mode::AwaitingDescription(pending) => Prompt {
                text: format!("{}> ", pending.label()),
                initial: pending.current.clone(),
            },
        }
    }

    /// Feed one input through the state machine
    pub fn handle(&mut self, input: Input) -> Result<Flow> {
        let mode = std::mem::replace(&mut self.mode, Mode::Command);
        match mode {
            Mode::Command => self.handle_command(input),
            Mode::AwaitingDescription(pending) => self.handle_description(pending, input),
        }
    }

    fn handle_command(&mut self, input: Input) -> Result<Flow> {
        let line = match input {
            Input::Line(line) => line,
            Input::Interrupted => return Ok(Flow::Continue),
            Input::Eof => return Ok(Flow::Exit { save: true }),
        };
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let ExecutionResult { notices, effect } = CommandExecutor::execute(&mut self.plan, &line);
        self.console.print_all(&notices)?;

        Ok(match effect {
            Effect::None => Flow::Continue,
            Effect::ClearScreen => Flow::ClearScreen,
            Effect::EraseHistory => Flow::EraseHistory,
            Effect::AwaitDescription(pending) => {
                self.mode = Mode::AwaitingDescription(pending);
                Flow::Continue
            }
            Effect::Exit { save } => Flow::Exit { save },
        })
    }

    fn handle_description(&mut self, pending: PendingEdit, input: Input) -> Result<Flow> {
        let line = match input {
            Input::Line(line) => line,
            Input::Interrupted | Input::Eof => {
                tracing::debug!("cancelled pending {:?}", pending.command);
                let verb = if pending.command == Command::Add {
                    "add"
                } else {
                    "update"
                };
                self.console
                    .print(&Notice::warning(format!("Cancelled {} of {}", verb, pending.label())))?;
                return Ok(Flow::Continue);
            }
        };

        let description = clean_description(&line);
        if description.is_empty() {
            self.mode = Mode::AwaitingDescription(pending);
            return Ok(Flow::Continue);
        }

        let result = CommandExecutor::complete(&mut self.plan, &pending, description);
        self.console.print_all(&result.notices)?;
        Ok(Flow::Continue)
    }
}

/// Drive a session until the user exits, then persist
///
/// The plan is written only for a saving exit; history is written either
/// way. Failures to write are reported and do not stop the exit. A reader
/// that fails ends the session as a saving exit.
pub fn run<R: LineReader, W: Write>(
    session: &mut Session<W>,
    reader: &mut R,
    config: &Config,
) -> Result<ExitReport> {
    let save = loop {
        let prompt = session.prompt();
        let input = match reader.read_line(&prompt.text, prompt.initial.as_deref()) {
            Ok(input) => input,
            Err(e) => {
                // the terminal is gone; keep what was typed so far
                tracing::error!("reading input failed: {}", e);
                session.console().print(&Notice::error(&e))?;
                break true;
            }
        };

        if let (Mode::Command, Input::Line(line)) = (session.mode(), &input) {
            if !line.trim().is_empty() {
                reader.add_history(line.trim());
            }
        }

        match session.handle(input)? {
            Flow::Continue => {}
            Flow::ClearScreen => {
                if let Err(e) = reader.clear_screen() {
                    tracing::warn!("could not clear screen: {}", e);
                }
            }
            Flow::EraseHistory => {
                if let Err(e) = reader.clear_history() {
                    session.console().print(&Notice::error(&e))?;
                }
            }
            Flow::Exit { save } => break save,
        }
    };

    let mut saved = false;
    if save {
        match store::save(session.plan(), &config.data_file) {
            Ok(()) => saved = true,
            Err(e) => {
                tracing::warn!("saving plan failed: {}", e);
                session.console().file_warning("save the plan", &e)?;
            }
        }
    }
    if let Err(e) = reader.save_history(&config.history_file) {
        tracing::warn!("saving history failed: {}", e);
        session.console().file_warning("save the history", &e)?;
    }

    Ok(ExitReport {
        save_requested: save,
        saved,
    })
}

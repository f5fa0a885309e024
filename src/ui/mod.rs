//! Terminal-facing pieces: line input and notice rendering

pub mod console;
pub mod terminal;

pub use console::Console;
pub use terminal::{Input, LineReader, ScriptReader, TerminalReader};

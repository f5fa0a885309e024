//! Rendering of notices to an output stream

use std::io::Write;

use crossterm::style::Stylize;

use crate::command::executor::{Notice, NoticeKind};
use crate::core::error::{PlanError, Result};

/// Writes notices, colored when enabled
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn print(&mut self, notice: &Notice) -> Result<()> {
        let line = if self.color {
            match notice.kind {
                NoticeKind::Info => notice.text.clone(),
                NoticeKind::Success => notice.text.as_str().green().to_string(),
                NoticeKind::Warning => notice.text.as_str().yellow().to_string(),
                NoticeKind::Error => format!("{} {}", "Error:".red().bold(), notice.text),
            }
        } else {
            match notice.kind {
                NoticeKind::Error => format!("Error: {}", notice.text),
                _ => notice.text.clone(),
            }
        };
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn print_all(&mut self, notices: &[Notice]) -> Result<()> {
        for notice in notices {
            self.print(notice)?;
        }
        Ok(())
    }

    /// Report a failed file operation with the filename highlighted
    pub fn file_warning(&mut self, action: &str, error: &PlanError) -> Result<()> {
        let text = self.highlight_file(error);
        self.print(&Notice::warning(format!(
            "Warning: could not {}: {}",
            action, text
        )))
    }

    /// Like `file_warning`, for failures that stop the program
    pub fn file_error(&mut self, action: &str, error: &PlanError) -> Result<()> {
        let text = self.highlight_file(error);
        self.print(&Notice {
            kind: NoticeKind::Error,
            text: format!("could not {}: {}", action, text),
        })
    }

    fn highlight_file(&self, error: &PlanError) -> String {
        let file = error
            .file()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if self.color && !file.is_empty() {
            error
                .to_string()
                .replace(&file, &file.as_str().bold().to_string())
        } else {
            error.to_string()
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_output() {
        let mut console = Console::new(Vec::new(), false);
        console
            .print_all(&[
                Notice::info("Goal 1: x"),
                Notice::error(&PlanError::ZeroId),
            ])
            .unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "Goal 1: x\nError: index 0 is not allowed, numbering starts at 1\n"
        );
    }

    #[test]
    fn test_file_warning_names_file() {
        let mut console = Console::new(Vec::new(), false);
        let error = PlanError::Io {
            path: PathBuf::from("/nope/plan.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        console.file_warning("save the plan", &error).unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert!(text.starts_with(
            "Warning: could not save the plan: cannot access /nope/plan.json"
        ));
    }

    #[test]
    fn test_file_error_highlights_file_when_colored() {
        let error = PlanError::Io {
            path: PathBuf::from("/nope/plan.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let mut plain = Console::new(Vec::new(), false);
        plain.file_error("load the plan", &error).unwrap();
        let text = String::from_utf8(plain.into_inner()).unwrap();
        assert!(text.starts_with("Error: could not load the plan: cannot access /nope/plan.json"));

        let mut colored = Console::new(Vec::new(), true);
        colored.file_error("load the plan", &error).unwrap();
        let text = String::from_utf8(colored.into_inner()).unwrap();
        let bold = "/nope/plan.json".bold().to_string();
        assert!(text.contains(&bold));
        assert!(text.contains("denied"));
    }
}

//! Command interpretation pipeline
//!
//! line -> vocabulary (per word) -> resolver (whole line) -> path parser
//! (remainder) -> executor -> plan

pub mod executor;
pub mod help;
pub mod path;
pub mod resolver;
pub mod session;
pub mod vocabulary;

pub use executor::{CommandExecutor, Effect, ExecutionResult, Notice, NoticeKind, PendingEdit};
pub use resolver::{resolve, Resolution, Target};
pub use session::{run, ExitReport, Flow, Mode, Session};

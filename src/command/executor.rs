//! Command execution - applies a resolved line to the plan

use crate::command::help;
use crate::command::path::{self, ParsedPath};
use crate::command::resolver::{remainder, resolve, Resolution};
use crate::core::error::{PlanError, Result};
use crate::core::types::{display_path, Command, Item};
use crate::plan::display;
use crate::plan::model::Plan;

/// Severity of a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One line of output for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(error: &PlanError) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: error.to_string(),
        }
    }
}

/// An add or update waiting for its description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub command: Command,
    pub item: Item,
    /// Parent path for an add, the record's own path for an update
    pub path: Vec<usize>,
    /// Current description of the record being updated
    pub current: Option<String>,
}

impl PendingEdit {
    /// Short label for the description prompt
    pub fn label(&self) -> String {
        match self.command {
            Command::Add if self.path.is_empty() => format!("new {}", self.item),
            Command::Add => format!("new {} under {}", self.item, display_path(&self.path)),
            _ => format!("{} {}", self.item, display_path(&self.path)),
        }
    }
}

/// What the session must do after a line was executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ClearScreen,
    EraseHistory,
    AwaitDescription(PendingEdit),
    Exit { save: bool },
}

/// Result of executing a line
#[derive(Debug)]
pub struct ExecutionResult {
    pub notices: Vec<Notice>,
    pub effect: Effect,
}

impl ExecutionResult {
    fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            effect: Effect::None,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            notices: Vec::new(),
            effect,
        }
    }

    fn failed(error: PlanError) -> Self {
        tracing::debug!("command rejected: {}", error);
        Self::notice(Notice::error(&error))
    }
}

/// Executes command lines against a plan
pub struct CommandExecutor;

impl CommandExecutor {
    /// Resolve and execute one command line
    pub fn execute(plan: &mut Plan, line: &str) -> ExecutionResult {
        let resolution = resolve(line);
        let rest = remainder(line, resolution.consumed);
        Self::dispatch(plan, &resolution, &rest)
    }

    /// Execute an already resolved line
    pub fn dispatch(plan: &mut Plan, resolution: &Resolution, rest: &str) -> ExecutionResult {
        if !resolution.is_valid() {
            return ExecutionResult::failed(PlanError::UnknownCommand(resolution.offending()));
        }

        let (Some(command), item) = (resolution.command, resolution.item) else {
            return ExecutionResult::failed(PlanError::UnknownCommand(resolution.offending()));
        };

        let outcome = match (command, item) {
            (Command::Add, Some(item)) => add(plan, item, rest),
            (Command::Update, Some(item)) => update(plan, item, rest),
            (Command::Remove, Some(item)) => remove(plan, item, rest),
            (Command::Show, Some(item)) => Ok(show(plan, item)),
            (Command::Help, _) => Ok(show_help(resolution)),
            (Command::Clear, _) => Ok(ExecutionResult::effect(Effect::ClearScreen)),
            (Command::Erase, _) => Ok(ExecutionResult {
                notices: vec![Notice::success("History erased")],
                effect: Effect::EraseHistory,
            }),
            (Command::ExitSave, _) => Ok(ExecutionResult::effect(Effect::Exit { save: true })),
            (Command::ExitNoSave, _) => Ok(ExecutionResult::effect(Effect::Exit { save: false })),
            (_, None) => Err(PlanError::UnknownCommand(resolution.offending())),
        };

        outcome.unwrap_or_else(ExecutionResult::failed)
    }

    /// Finish a pending add or update with the description the user typed
    pub fn complete(
        plan: &mut Plan,
        pending: &PendingEdit,
        description: String,
    ) -> ExecutionResult {
        let outcome = match pending.command {
            Command::Add => plan
                .add(pending.item, &pending.path, description)
                .map(|path| added(pending.item, &path)),
            _ => plan
                .update(pending.item, &pending.path, description)
                .map(|()| updated(pending.item, &pending.path)),
        };
        outcome.unwrap_or_else(ExecutionResult::failed)
    }
}

fn add(plan: &mut Plan, item: Item, rest: &str) -> Result<ExecutionResult> {
    let ParsedPath { path, description } = path::parse(rest)?;
    plan.check_add(item, &path)?;

    if description.is_empty() {
        return Ok(await_description(PendingEdit {
            command: Command::Add,
            item,
            path,
            current: None,
        }));
    }

    let created = plan.add(item, &path, description)?;
    Ok(added(item, &created))
}

fn update(plan: &mut Plan, item: Item, rest: &str) -> Result<ExecutionResult> {
    let ParsedPath { path, description } = path::parse(rest)?;
    let current = plan.description(item, &path)?.to_string();

    if description.is_empty() {
        return Ok(await_description(PendingEdit {
            command: Command::Update,
            item,
            path,
            current: Some(current),
        }));
    }

    plan.update(item, &path, description)?;
    Ok(updated(item, &path))
}

fn remove(plan: &mut Plan, item: Item, rest: &str) -> Result<ExecutionResult> {
    let ParsedPath { path, .. } = path::parse(rest)?;
    plan.remove(item, &path)?;
    Ok(ExecutionResult::notice(Notice::success(format!(
        "Removed {} {}",
        item,
        display_path(&path)
    ))))
}

fn show(plan: &Plan, item: Item) -> ExecutionResult {
    match display::render(plan, item) {
        Some(lines) => ExecutionResult {
            notices: lines.into_iter().map(Notice::info).collect(),
            effect: Effect::None,
        },
        None if item == Item::All => ExecutionResult::notice(Notice::warning("Nothing to show")),
        None => ExecutionResult::notice(Notice::warning(format!(
            "Nothing to show: there are no {}",
            item.plural()
        ))),
    }
}

fn show_help(resolution: &Resolution) -> ExecutionResult {
    if resolution.words.len() <= 1 {
        return ExecutionResult {
            notices: help::table().into_iter().map(Notice::info).collect(),
            effect: Effect::None,
        };
    }

    let target = resolution.help_target.unwrap_or_default();
    match help::lookup(target) {
        Some(entry) => ExecutionResult {
            notices: vec![Notice::info(entry.usage), Notice::info(entry.description)],
            effect: Effect::None,
        },
        None => {
            let asked: Vec<&str> = resolution
                .words
                .iter()
                .map(String::as_str)
                .filter(|w| !matches!(w.to_lowercase().as_str(), "h" | "help" | "?"))
                .collect();
            ExecutionResult::notice(Notice::warning(format!(
                "No help for '{}'",
                asked.join(" ")
            )))
        }
    }
}

fn await_description(pending: PendingEdit) -> ExecutionResult {
    let hint = match pending.command {
        Command::Add => format!(
            "Enter a description for the {} (Ctrl-C to cancel)",
            pending.label()
        ),
        _ => format!(
            "Edit the description of {} (Ctrl-C to cancel)",
            pending.label()
        ),
    };
    ExecutionResult {
        notices: vec![Notice::info(hint)],
        effect: Effect::AwaitDescription(pending),
    }
}

fn added(item: Item, path: &[usize]) -> ExecutionResult {
    ExecutionResult::notice(Notice::success(format!(
        "Added {} {}",
        item,
        display_path(path)
    )))
}

fn updated(item: Item, path: &[usize]) -> ExecutionResult {
    ExecutionResult::notice(Notice::success(format!(
        "Updated {} {}",
        item,
        display_path(path)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MAX_CHILDREN;

    fn run(plan: &mut Plan, line: &str) -> ExecutionResult {
        CommandExecutor::execute(plan, line)
    }

    fn error_text(result: &ExecutionResult) -> &str {
        assert_eq!(result.notices.len(), 1, "{:?}", result.notices);
        assert_eq!(result.notices[0].kind, NoticeKind::Error);
        &result.notices[0].text
    }

    #[test]
    fn test_add_goal_inline() {
        let mut plan = Plan::new();
        let result = run(&mut plan, "add goal \"Lose weight\"");
        assert_eq!(result.effect, Effect::None);
        assert_eq!(result.notices[0].text, "Added goal 1");
        assert_eq!(plan.goals[0].description, "Lose weight");
    }

    #[test]
    fn test_add_without_description_waits() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal Lose weight");
        let result = run(&mut plan, "a ac 1");
        match result.effect {
            Effect::AwaitDescription(pending) => {
                assert_eq!(pending.command, Command::Add);
                assert_eq!(pending.item, Item::Action);
                assert_eq!(pending.path, vec![0]);
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(plan.count(Item::Action), 0);
    }

    #[test]
    fn test_add_validates_before_waiting() {
        let mut plan = Plan::new();
        let result = run(&mut plan, "add action 1");
        assert_eq!(error_text(&result), "nothing at 1 to add the action to");
        assert_eq!(result.effect, Effect::None);
    }

    #[test]
    fn test_add_too_many_indices() {
        let mut plan = Plan::new();
        let result = run(&mut plan, "add goal 10 pushups");
        assert!(error_text(&result).starts_with("too many indices for goal"));
        assert!(plan.goals.is_empty());
    }

    #[test]
    fn test_add_beyond_capacity() {
        let mut plan = Plan::new();
        for i in 0..MAX_CHILDREN {
            run(&mut plan, &format!("add goal g{}", i));
        }
        let result = run(&mut plan, "add goal one more");
        assert_eq!(error_text(&result), "too many goals, the limit is 7");
        assert_eq!(plan.goals.len(), MAX_CHILDREN);
    }

    #[test]
    fn test_zero_and_negative_ids() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal x");
        assert_eq!(
            error_text(&run(&mut plan, "remove goal 0")),
            "index 0 is not allowed, numbering starts at 1"
        );
        assert_eq!(
            error_text(&run(&mut plan, "remove goal -2")),
            "negative index -2 is not allowed"
        );
        assert_eq!(plan.goals.len(), 1);
    }

    #[test]
    fn test_update_inline_and_pending() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal Lose weight");
        run(&mut plan, "update goal 1 Lose 5kg");
        assert_eq!(plan.goals[0].description, "Lose 5kg");

        let result = run(&mut plan, "goal edit 1");
        match result.effect {
            Effect::AwaitDescription(pending) => {
                assert_eq!(pending.current.as_deref(), Some("Lose 5kg"));
                let done = CommandExecutor::complete(&mut plan, &pending, "Lose 6kg".into());
                assert_eq!(done.notices[0].text, "Updated goal 1");
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(plan.goals[0].description, "Lose 6kg");
    }

    #[test]
    fn test_update_needs_full_path() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal x");
        run(&mut plan, "add action 1 y");
        let result = run(&mut plan, "update action 1 z");
        assert!(error_text(&result).starts_with("too few indices for action"));
    }

    #[test]
    fn test_remove_cascades_and_shifts() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal a");
        run(&mut plan, "add goal b");
        run(&mut plan, "add action 2 diet");
        run(&mut plan, "remove goal 1");
        assert_eq!(plan.goals.len(), 1);
        assert_eq!(plan.goals[0].description, "b");
        assert_eq!(plan.count(Item::Action), 1);

        let result = run(&mut plan, "re re 1 1");
        assert_eq!(error_text(&result), "no result 1.1 to remove");
    }

    #[test]
    fn test_show_nothing() {
        let mut plan = Plan::new();
        let result = run(&mut plan, "show");
        assert_eq!(result.notices, vec![Notice::warning("Nothing to show")]);

        run(&mut plan, "add goal x");
        let result = run(&mut plan, "alerts show");
        assert_eq!(result.notices[0].text, "Nothing to show: there are no alerts");
    }

    #[test]
    fn test_show_listing() {
        let mut plan = Plan::new();
        run(&mut plan, "add goal Lose weight");
        run(&mut plan, "add action 1 Diet");
        let result = run(&mut plan, "show actions");
        assert_eq!(result.notices.len(), 1);
        assert!(result.notices[0].text.starts_with("Action 1.1: Diet"));
    }

    #[test]
    fn test_help_variants() {
        let mut plan = Plan::new();
        let table = run(&mut plan, "help");
        assert!(table.notices.len() > 9);

        let one = run(&mut plan, "help add action");
        assert_eq!(one.notices[0].text, "add action <goal> [description]");

        let none = run(&mut plan, "help lunch");
        assert_eq!(none.notices[0].text, "No help for 'lunch'");
        assert_eq!(none.notices[0].kind, NoticeKind::Warning);
    }

    #[test]
    fn test_unknown_command() {
        let mut plan = Plan::new();
        let result = run(&mut plan, "launch rockets");
        assert_eq!(
            error_text(&result),
            "unknown command 'launch', type 'help' for a list of commands"
        );
    }

    #[test]
    fn test_exit_and_screen_effects() {
        let mut plan = Plan::new();
        assert_eq!(run(&mut plan, "exit").effect, Effect::Exit { save: true });
        assert_eq!(run(&mut plan, "q!").effect, Effect::Exit { save: false });
        assert_eq!(run(&mut plan, "cls").effect, Effect::ClearScreen);
        assert_eq!(run(&mut plan, "erase").effect, Effect::EraseHistory);
    }
}

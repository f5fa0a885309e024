//! Help texts for the command language

use crate::command::resolver::Target;
use crate::command::vocabulary::{item_spellings, spellings_of};
use crate::core::types::{Command, Item};

/// Usage and description of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub usage: String,
    pub description: String,
}

impl HelpEntry {
    fn new(usage: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            description: description.into(),
        }
    }
}

/// Commands in the order they are listed
const COMMANDS: [Command; 9] = [
    Command::Add,
    Command::Show,
    Command::Update,
    Command::Remove,
    Command::Help,
    Command::Clear,
    Command::Erase,
    Command::ExitSave,
    Command::ExitNoSave,
];

/// Placeholder for the indices that address a record
fn path_usage(depth: usize) -> String {
    const LEVELS: [&str; 4] = ["<goal>", "<action>", "<agreement>", "<alert>"];
    LEVELS[..depth.min(LEVELS.len())].join(" ")
}

fn item_path_usage(item: Item, depth: usize) -> String {
    // results sit under a goal, not an action
    if item == Item::Result && depth == 2 {
        return "<goal> <result>".to_string();
    }
    path_usage(depth)
}

fn general_entry(command: Command) -> HelpEntry {
    match command {
        Command::Add => HelpEntry::new(
            "add <item> [indices] [description]",
            "Add a goal, action, agreement, alert or result",
        ),
        Command::Show => HelpEntry::new("show [item]", "List the plan, or only one kind of record"),
        Command::Update => HelpEntry::new(
            "update <item> <indices> [description]",
            "Change the description of a record",
        ),
        Command::Remove => HelpEntry::new(
            "remove <item> <indices>",
            "Remove a record and everything beneath it",
        ),
        Command::Help => HelpEntry::new("help [command [item]]", "Show help"),
        Command::Clear => HelpEntry::new("clear", "Clear the screen"),
        Command::Erase => HelpEntry::new("erase", "Forget the command history"),
        Command::ExitSave => HelpEntry::new("exit", "Save the plan and quit"),
        Command::ExitNoSave => HelpEntry::new("exit!", "Quit without saving the plan"),
    }
}

fn item_entry(command: Command, item: Item) -> Option<HelpEntry> {
    let parent = item
        .parent()
        .map(|p| format!(" under {} {}", article(p), p))
        .unwrap_or_default();
    let entry = match (command, item) {
        (Command::Show, _) => HelpEntry::new(
            if item == Item::All {
                "show all".to_string()
            } else {
                format!("show {}", item.plural())
            },
            if item == Item::All {
                "List the whole plan".to_string()
            } else {
                format!("List every {} in the plan", item)
            },
        ),
        (_, Item::All) => return None,
        (Command::Add, _) => HelpEntry::new(
            format!("add {} {} [description]", item, path_usage(item.depth() - 1))
                .replace("  ", " "),
            format!("Add {} {}{}", article(item), item, parent),
        ),
        (Command::Update, _) => HelpEntry::new(
            format!(
                "update {} {} [description]",
                item,
                item_path_usage(item, item.depth())
            ),
            format!("Change the description of {} {}", article(item), item),
        ),
        (Command::Remove, _) => HelpEntry::new(
            format!("remove {} {}", item, item_path_usage(item, item.depth())),
            format!("Remove {} {} and everything beneath it", article(item), item),
        ),
        _ => return None,
    };
    Some(entry)
}

fn article(item: Item) -> &'static str {
    match item {
        Item::Action | Item::Agreement | Item::Alert | Item::All => "an",
        Item::Goal | Item::Result => "a",
    }
}

/// Help for a specific target, or `None` if there is none
pub fn lookup(target: Target) -> Option<HelpEntry> {
    match (target.command, target.item) {
        (Some(command), None) => Some(general_entry(command)),
        (Some(command), Some(item)) if command.takes_item() => item_entry(command, item),
        (Some(command), Some(_)) => Some(general_entry(command)),
        (None, _) => None,
    }
}

/// The global command table
pub fn table() -> Vec<String> {
    let mut lines = Vec::with_capacity(COMMANDS.len() + 3);
    for command in COMMANDS {
        let entry = general_entry(command);
        lines.push(format!(
            "  {:<40} {} ({})",
            entry.usage,
            entry.description,
            spellings_of(command).join(", ")
        ));
    }
    let items: Vec<String> = Item::RECORDS
        .iter()
        .map(|&item| item_spellings(item).join("/"))
        .collect();
    lines.push(format!("  items: {}", items.join(", ")));
    lines.push("  re/r means remove or result depending on the other word".to_string());
    lines.push("  indices count from 1 and may be separated by . # , / | ; :".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_command() {
        let table = table();
        for command in COMMANDS {
            assert!(table.iter().any(|l| l.contains(general_entry(command).usage.as_str())));
        }
    }

    #[test]
    fn test_add_agreement_usage() {
        let entry = lookup(Target::new(Some(Command::Add), Some(Item::Agreement))).unwrap();
        assert_eq!(entry.usage, "add agreement <goal> <action> [description]");
        assert_eq!(entry.description, "Add an agreement under an action");
    }

    #[test]
    fn test_add_goal_usage_has_no_indices() {
        let entry = lookup(Target::new(Some(Command::Add), Some(Item::Goal))).unwrap();
        assert_eq!(entry.usage, "add goal [description]");
    }

    #[test]
    fn test_remove_result_usage() {
        let entry = lookup(Target::new(Some(Command::Remove), Some(Item::Result))).unwrap();
        assert_eq!(entry.usage, "remove result <goal> <result>");
    }

    #[test]
    fn test_no_help_for_bare_item() {
        assert!(lookup(Target::new(None, Some(Item::Goal))).is_none());
        assert!(lookup(Target::default()).is_none());
        assert!(lookup(Target::new(Some(Command::Add), Some(Item::All))).is_none());
    }

    #[test]
    fn test_exit_ignores_item() {
        let entry = lookup(Target::new(Some(Command::ExitSave), Some(Item::Goal))).unwrap();
        assert_eq!(entry.usage, "exit");
    }
}

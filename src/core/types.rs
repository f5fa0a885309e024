//! Core type definitions shared by the command language and the plan tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of children of one kind a node may hold
pub const MAX_CHILDREN: usize = 7;

/// Internal 0-based path locating a node from the plan root
pub type Path = Vec<usize>;

/// Verbs understood by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Add,
    Show,
    Update,
    Remove,
    Help,
    /// Clear the terminal display
    Clear,
    /// Clear the interpreter history
    Erase,
    ExitSave,
    ExitNoSave,
}

impl Command {
    /// Canonical spelling used in help and notices
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Show => "show",
            Command::Update => "update",
            Command::Remove => "remove",
            Command::Help => "help",
            Command::Clear => "clear",
            Command::Erase => "erase",
            Command::ExitSave => "exit",
            Command::ExitNoSave => "exit!",
        }
    }

    /// Does this command operate on a record kind?
    pub fn takes_item(&self) -> bool {
        matches!(
            self,
            Command::Add | Command::Show | Command::Update | Command::Remove
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record kinds of the plan tree, plus `All` for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Goal,
    Action,
    Agreement,
    Alert,
    Result,
    All,
}

impl Item {
    /// Every concrete record kind, in display order
    pub const RECORDS: [Item; 5] = [
        Item::Goal,
        Item::Action,
        Item::Agreement,
        Item::Alert,
        Item::Result,
    ];

    /// Number of indices needed to address a node of this kind
    ///
    /// Results hang directly off a goal, so they share the action depth.
    pub fn depth(&self) -> usize {
        match self {
            Item::Goal => 1,
            Item::Action | Item::Result => 2,
            Item::Agreement => 3,
            Item::Alert => 4,
            Item::All => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::Goal => "goal",
            Item::Action => "action",
            Item::Agreement => "agreement",
            Item::Alert => "alert",
            Item::Result => "result",
            Item::All => "all",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Item::Goal => "goals",
            Item::Action => "actions",
            Item::Agreement => "agreements",
            Item::Alert => "alerts",
            Item::Result => "results",
            Item::All => "records",
        }
    }

    /// Capitalised label used as a line prefix in listings
    pub fn label(&self) -> &'static str {
        match self {
            Item::Goal => "Goal",
            Item::Action => "Action",
            Item::Agreement => "Agreement",
            Item::Alert => "Alert",
            Item::Result => "Result",
            Item::All => "All",
        }
    }

    /// Name of the parent kind, if any
    pub fn parent(&self) -> Option<Item> {
        match self {
            Item::Action | Item::Result => Some(Item::Goal),
            Item::Agreement => Some(Item::Action),
            Item::Alert => Some(Item::Agreement),
            Item::Goal | Item::All => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render an internal 0-based path the way the user typed it
pub fn display_path(path: &[usize]) -> String {
    path.iter()
        .map(|i| (i.saturating_add(1)).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depths_follow_nesting() {
        assert_eq!(Item::Goal.depth(), 1);
        assert_eq!(Item::Action.depth(), 2);
        assert_eq!(Item::Result.depth(), 2);
        assert_eq!(Item::Agreement.depth(), 3);
        assert_eq!(Item::Alert.depth(), 4);
    }

    #[test]
    fn test_parent_depth_is_one_less() {
        for item in Item::RECORDS {
            if let Some(parent) = item.parent() {
                assert_eq!(parent.depth() + 1, item.depth());
            }
        }
    }

    #[test]
    fn test_display_path_is_one_based() {
        assert_eq!(display_path(&[0, 2, 1]), "1.3.2");
        assert_eq!(display_path(&[]), "");
    }
}

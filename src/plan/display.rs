//! Depth-first listing of the plan tree
//!
//! Paths are reconstructed positionally while walking; nothing in the tree
//! stores its own location.

use chrono::{DateTime, Local};

use crate::core::types::{display_path, Item};
use crate::plan::model::{Plan, Record};

/// One rendered record
#[derive(Debug, Clone, PartialEq)]
pub struct ListingLine {
    pub item: Item,
    pub path: Vec<usize>,
    pub description: String,
    pub created: DateTime<Local>,
}

impl ListingLine {
    fn new<R: Record>(item: Item, path: Vec<usize>, record: &R) -> Self {
        Self {
            item,
            path,
            description: record.description().to_string(),
            created: record.created(),
        }
    }

    /// Text of the line, indented by depth when `indent` is set
    pub fn render(&self, indent: bool) -> String {
        let pad = if indent {
            "  ".repeat(self.item.depth().saturating_sub(1))
        } else {
            String::new()
        };
        format!(
            "{}{} {}: {}  [{}]",
            pad,
            self.item.label(),
            display_path(&self.path),
            self.description,
            self.created.format("%Y-%m-%d")
        )
    }
}

/// Walk the tree and collect every record matching `filter`
///
/// Results of a goal are listed after all of its actions.
pub fn collect(plan: &Plan, filter: Item) -> Vec<ListingLine> {
    let wanted = |item: Item| filter == Item::All || filter == item;
    let mut lines = Vec::new();

    for (g, goal) in plan.goals.iter().enumerate() {
        if wanted(Item::Goal) {
            lines.push(ListingLine::new(Item::Goal, vec![g], goal));
        }
        for (a, action) in goal.actions.iter().enumerate() {
            if wanted(Item::Action) {
                lines.push(ListingLine::new(Item::Action, vec![g, a], action));
            }
            for (r, agreement) in action.agreements.iter().enumerate() {
                if wanted(Item::Agreement) {
                    lines.push(ListingLine::new(Item::Agreement, vec![g, a, r], agreement));
                }
                for (l, alert) in agreement.alerts.iter().enumerate() {
                    if wanted(Item::Alert) {
                        lines.push(ListingLine::new(Item::Alert, vec![g, a, r, l], alert));
                    }
                }
            }
        }
        for (r, result) in goal.results.iter().enumerate() {
            if wanted(Item::Result) {
                lines.push(ListingLine::new(Item::Result, vec![g, r], result));
            }
        }
    }

    lines
}

/// Render a listing, or `None` when there is nothing of that kind
pub fn render(plan: &Plan, filter: Item) -> Option<Vec<String>> {
    let lines = collect(plan, filter);
    if lines.is_empty() {
        return None;
    }

    let indent = filter == Item::All;
    let mut out = Vec::with_capacity(lines.len() + 2);
    if indent {
        if plan.owner.is_empty() {
            out.push("Plan".to_string());
        } else {
            out.push(format!("Plan of {}", plan.owner));
        }
        if !plan.vision.is_empty() {
            out.push(format!("Vision: {}", plan.vision));
        }
    }
    out.extend(lines.iter().map(|line| line.render(indent)));
    Some(out)
}

//! The plan tree and its mutation primitives
//!
//! Every child list is owned by value by its parent. Nodes are addressed
//! positionally by a 0-based path resolved top-down at call time, so an
//! index always refers to the Nth surviving child.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::error::{PlanError, Result};
use crate::core::types::{display_path, Item, MAX_CHILDREN};

/// Common surface of every record in the tree
pub trait Record {
    fn new(description: String) -> Self;
    fn description(&self) -> &str;
    fn set_description(&mut self, description: String);
    fn created(&self) -> DateTime<Local>;
}

macro_rules! impl_record {
    ($ty:ident { $($child:ident),* }) => {
        impl Record for $ty {
            fn new(description: String) -> Self {
                Self {
                    description,
                    created: Local::now(),
                    $($child: Vec::new(),)*
                }
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn set_description(&mut self, description: String) {
                self.description = description;
            }

            fn created(&self) -> DateTime<Local> {
                self.created
            }
        }
    };
}

/// Root record owning every goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub owner: String,
    pub vision: String,
    pub created: DateTime<Local>,
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub description: String,
    pub created: DateTime<Local>,
    pub actions: Vec<Action>,
    pub results: Vec<GoalResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub description: String,
    pub created: DateTime<Local>,
    pub agreements: Vec<Agreement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub description: String,
    pub created: DateTime<Local>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub description: String,
    pub created: DateTime<Local>,
}

/// An observed outcome recorded against a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub description: String,
    pub created: DateTime<Local>,
}

impl_record!(Goal { actions, results });
impl_record!(Action { agreements });
impl_record!(Agreement { alerts });
impl_record!(Alert {});
impl_record!(GoalResult {});

/// Which mutation a lookup failure should be reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Update,
    Remove,
}

impl Op {
    fn missing(self, item: Item, path: &[usize]) -> PlanError {
        let path = display_path(path);
        match self {
            Op::Add => PlanError::NothingToAdd { item, path },
            Op::Update => PlanError::NothingToUpdate { item, path },
            Op::Remove => PlanError::NothingToRemove { item, path },
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan {
    pub fn new() -> Self {
        Self {
            owner: String::new(),
            vision: String::new(),
            created: Local::now(),
            goals: Vec::new(),
        }
    }

    /// Reset every field and drop all goals
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Fill an empty owner or vision from configured defaults
    pub fn adopt_defaults(&mut self, owner: &str, vision: &str) {
        if self.owner.is_empty() {
            self.owner = owner.to_string();
        }
        if self.vision.is_empty() {
            self.vision = vision.to_string();
        }
    }

    /// Check that `item` could be added under `parent`, without mutating
    pub fn check_add(&self, item: Item, parent: &[usize]) -> Result<()> {
        if item == Item::All {
            return Err(PlanError::UnknownCommand(format!("add {}", item)));
        }
        check_arity(item, item.depth() - 1, parent)?;
        let len = match item {
            Item::Goal => Some(self.goals.len()),
            Item::Action => self.goal(parent).map(|g| g.actions.len()),
            Item::Result => self.goal(parent).map(|g| g.results.len()),
            Item::Agreement => self.action(parent).map(|a| a.agreements.len()),
            Item::Alert => self.agreement(parent).map(|a| a.alerts.len()),
            Item::All => None,
        }
        .ok_or_else(|| Op::Add.missing(item, parent))?;
        if len >= MAX_CHILDREN {
            return Err(PlanError::Capacity {
                item,
                limit: MAX_CHILDREN,
            });
        }
        Ok(())
    }

    /// Append a new record under `parent`, returning its 0-based path
    pub fn add(
        &mut self,
        item: Item,
        parent: &[usize],
        description: String,
    ) -> Result<Vec<usize>> {
        self.check_add(item, parent)?;
        let missing = || Op::Add.missing(item, parent);
        let index = match item {
            Item::Goal => push(&mut self.goals, description),
            Item::Action => push(
                &mut self.goal_mut(parent).ok_or_else(missing)?.actions,
                description,
            ),
            Item::Result => push(
                &mut self.goal_mut(parent).ok_or_else(missing)?.results,
                description,
            ),
            Item::Agreement => push(
                &mut self.action_mut(parent).ok_or_else(missing)?.agreements,
                description,
            ),
            Item::Alert => push(
                &mut self.agreement_mut(parent).ok_or_else(missing)?.alerts,
                description,
            ),
            Item::All => return Err(PlanError::UnknownCommand(format!("add {}", item))),
        };
        let mut path = parent.to_vec();
        path.push(index);
        Ok(path)
    }

    /// Current description of the record at `path`
    pub fn description(&self, item: Item, path: &[usize]) -> Result<&str> {
        check_arity(item, item.depth(), path)?;
        self.record(item, path)
            .ok_or_else(|| Op::Update.missing(item, path))
    }

    /// Replace the description of the record at `path` in place
    pub fn update(&mut self, item: Item, path: &[usize], description: String) -> Result<()> {
        check_arity(item, item.depth(), path)?;
        let (parent, last) = split(path);
        let missing = || Op::Update.missing(item, path);
        match item {
            Item::Goal => self
                .goals
                .get_mut(last)
                .ok_or_else(missing)?
                .set_description(description),
            Item::Action => self
                .goal_mut(parent)
                .and_then(|g| g.actions.get_mut(last))
                .ok_or_else(missing)?
                .set_description(description),
            Item::Result => self
                .goal_mut(parent)
                .and_then(|g| g.results.get_mut(last))
                .ok_or_else(missing)?
                .set_description(description),
            Item::Agreement => self
                .action_mut(parent)
                .and_then(|a| a.agreements.get_mut(last))
                .ok_or_else(missing)?
                .set_description(description),
            Item::Alert => self
                .agreement_mut(parent)
                .and_then(|a| a.alerts.get_mut(last))
                .ok_or_else(missing)?
                .set_description(description),
            Item::All => return Err(PlanError::UnknownCommand(format!("update {}", item))),
        }
        Ok(())
    }

    /// Remove the record at `path` together with everything beneath it
    pub fn remove(&mut self, item: Item, path: &[usize]) -> Result<()> {
        check_arity(item, item.depth(), path)?;
        let (parent, last) = split(path);
        let missing = || Op::Remove.missing(item, path);
        match item {
            Item::Goal => remove_at(&mut self.goals, last).ok_or_else(missing)?,
            Item::Action => self
                .goal_mut(parent)
                .and_then(|g| remove_at(&mut g.actions, last))
                .ok_or_else(missing)?,
            Item::Result => self
                .goal_mut(parent)
                .and_then(|g| remove_at(&mut g.results, last))
                .ok_or_else(missing)?,
            Item::Agreement => self
                .action_mut(parent)
                .and_then(|a| remove_at(&mut a.agreements, last))
                .ok_or_else(missing)?,
            Item::Alert => self
                .agreement_mut(parent)
                .and_then(|a| remove_at(&mut a.alerts, last))
                .ok_or_else(missing)?,
            Item::All => return Err(PlanError::UnknownCommand(format!("remove {}", item))),
        }
        Ok(())
    }

    /// Number of records of one kind across the whole tree
    pub fn count(&self, item: Item) -> usize {
        let goals = self.goals.iter();
        match item {
            Item::Goal => self.goals.len(),
            Item::Action => goals.map(|g| g.actions.len()).sum(),
            Item::Result => goals.map(|g| g.results.len()).sum(),
            Item::Agreement => goals
                .flat_map(|g| &g.actions)
                .map(|a| a.agreements.len())
                .sum(),
            Item::Alert => goals
                .flat_map(|g| &g.actions)
                .flat_map(|a| &a.agreements)
                .map(|a| a.alerts.len())
                .sum(),
            Item::All => Item::RECORDS.iter().map(|&i| self.count(i)).sum(),
        }
    }

    pub fn goal(&self, path: &[usize]) -> Option<&Goal> {
        self.goals.get(*path.first()?)
    }

    pub fn action(&self, path: &[usize]) -> Option<&Action> {
        self.goal(path)?.actions.get(*path.get(1)?)
    }

    pub fn agreement(&self, path: &[usize]) -> Option<&Agreement> {
        self.action(path)?.agreements.get(*path.get(2)?)
    }

    pub fn alert(&self, path: &[usize]) -> Option<&Alert> {
        self.agreement(path)?.alerts.get(*path.get(3)?)
    }

    pub fn result(&self, path: &[usize]) -> Option<&GoalResult> {
        self.goal(path)?.results.get(*path.get(1)?)
    }

    fn record(&self, item: Item, path: &[usize]) -> Option<&str> {
        match item {
            Item::Goal => self.goal(path).map(Record::description),
            Item::Action => self.action(path).map(Record::description),
            Item::Agreement => self.agreement(path).map(Record::description),
            Item::Alert => self.alert(path).map(Record::description),
            Item::Result => self.result(path).map(Record::description),
            Item::All => None,
        }
    }

    fn goal_mut(&mut self, path: &[usize]) -> Option<&mut Goal> {
        self.goals.get_mut(*path.first()?)
    }

    fn action_mut(&mut self, path: &[usize]) -> Option<&mut Action> {
        let index = *path.get(1)?;
        self.goal_mut(path)?.actions.get_mut(index)
    }

    fn agreement_mut(&mut self, path: &[usize]) -> Option<&mut Agreement> {
        let index = *path.get(2)?;
        self.action_mut(path)?.agreements.get_mut(index)
    }
}

fn check_arity(item: Item, expected: usize, path: &[usize]) -> Result<()> {
    let given = path.len();
    if given > expected {
        return Err(PlanError::TooManyIndices {
            item,
            expected,
            given,
        });
    }
    if given < expected {
        return Err(PlanError::TooFewIndices {
            item,
            expected,
            given,
        });
    }
    Ok(())
}

fn split(path: &[usize]) -> (&[usize], usize) {
    match path.split_last() {
        Some((last, parent)) => (parent, *last),
        None => (path, 0),
    }
}

fn push<T: Record>(list: &mut Vec<T>, description: String) -> usize {
    list.push(T::new(description));
    list.len() - 1
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) -> Option<()> {
    (index < list.len()).then(|| {
        list.remove(index);
    })
}

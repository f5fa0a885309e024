//! The personal development plan: tree model, listings and persistence

pub mod display;
pub mod model;
pub mod store;

pub use model::{Action, Agreement, Alert, Goal, GoalResult, Plan, Record};

//! Plankeeper - personal development planner
//!
//! A tree of goals, actions, agreements, alerts and results, edited through
//! a forgiving abbreviated command language.

pub mod command;
pub mod core;
pub mod plan;
pub mod ui;

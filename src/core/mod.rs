pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{PlanError, Result};
pub use types::{Command, Item, MAX_CHILDREN};

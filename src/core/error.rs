use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::Item;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("index 0 is not allowed, numbering starts at 1")]
    ZeroId,

    #[error("negative index {0} is not allowed")]
    NegativeId(i64),

    #[error("too many indices for {item}: expected {expected}, got {given}")]
    TooManyIndices {
        item: Item,
        expected: usize,
        given: usize,
    },

    #[error("too few indices for {item}: expected {expected}, got {given}")]
    TooFewIndices {
        item: Item,
        expected: usize,
        given: usize,
    },

    #[error("nothing at {path} to add the {item} to")]
    NothingToAdd { item: Item, path: String },

    #[error("no {item} {path} to update")]
    NothingToUpdate { item: Item, path: String },

    #[error("no {item} {path} to remove")]
    NothingToRemove { item: Item, path: String },

    #[error("too many {}, the limit is {limit}", .item.plural())]
    Capacity { item: Item, limit: usize },

    #[error("unknown command '{0}', type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed plan data in {}: {source}", .path.display())]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("line editor error: {0}")]
    Readline(String),

    #[error("IO error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl PlanError {
    /// File involved in an I/O failure, for highlighting in notices
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            PlanError::Io { path, .. } | PlanError::Serde { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

//! JSON snapshot persistence for the plan tree

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::{PlanError, Result};
use crate::plan::model::Plan;

/// Load a plan snapshot; a missing file yields an empty plan
pub fn load(path: &Path) -> Result<Plan> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("{} not found, starting a new plan", path.display());
            return Ok(Plan::new());
        }
        Err(source) => {
            return Err(PlanError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let plan: Plan = serde_json::from_str(&content).map_err(|source| PlanError::Serde {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "loaded {} goals from {}",
        plan.goals.len(),
        path.display()
    );
    Ok(plan)
}

/// Write a plan snapshot, replacing the file only once fully written
pub fn save(plan: &Plan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan).map_err(|source| PlanError::Serde {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let io_err = |source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(tmp, json).map_err(io_err)?;
    fs::rename(tmp, path).map_err(io_err)?;

    tracing::info!("saved {} goals to {}", plan.goals.len(), path.display());
    Ok(())
}

//! Orchestration output channel (`$GITHUB_OUTPUT` key=value lines).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use patrons_core::Roster;

use crate::error::{io_err, SyncError};

/// Lines reported for a run.
pub fn output_lines(changed: bool, roster: &Roster) -> Vec<String> {
    if changed {
        vec![
            "changed=true".to_string(),
            format!("paying_count={}", roster.gold.len()),
            format!("follower_count={}", roster.silver.len()),
        ]
    } else {
        vec!["changed=false".to_string()]
    }
}

/// Append the run's outputs to `path`. `None` means no orchestrator is listening.
pub fn append_outputs(path: Option<&Path>, changed: bool, roster: &Roster) -> Result<(), SyncError> {
    let Some(path) = path else {
        return Ok(());
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    for line in output_lines(changed, roster) {
        writeln!(file, "{line}").map_err(|e| io_err(path, e))?;
    }
    tracing::debug!("appended outputs to {}", path.display());
    Ok(())
}

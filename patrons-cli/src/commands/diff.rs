//! `patrons diff` — show a unified diff of what sync would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use patrons_sync::preview;

use super::{load, SourceArgs};

/// Arguments for `patrons diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Patron file to compare against.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let (config, members) = load(&self.source, self.output.as_ref())?;
        let result = preview(&config, &members)
            .with_context(|| format!("diff failed for {}", config.output_path.display()))?;

        let Some(diff) = result.diff else {
            println!("No differences for {}.", config.output_path.display());
            return Ok(());
        };
        if !result.changed {
            println!(
                "No differences for {} (only comment lines differ; sync leaves it as is).",
                config.output_path.display()
            );
            return Ok(());
        }

        if !result.existing {
            println!("{} does not exist yet.", config.output_path.display());
        }
        print!("{diff}");
        if !diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

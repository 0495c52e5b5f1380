//! `patrons sync` — regenerate the patron file and announce new supporters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use patrons_api::{Notifier, WebhookNotifier};
use patrons_core::Tier;
use patrons_sync::{run, SyncOptions, SyncReport, WriteResult};

use super::{load, transport, SourceArgs};

/// Arguments for `patrons sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Patron file to generate (defaults to src/Core/PatronsInit.lua).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Compare only. Writes nothing and sends nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not post new-supporter announcements.
    #[arg(long)]
    pub no_notify: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (config, members) = load(&self.source, self.output.as_ref())?;

        let notifier = config.webhook.url.as_ref().map(|url| {
            WebhookNotifier::new(transport(&config), url.clone(), config.webhook.footer.clone())
        });
        let options = SyncOptions {
            dry_run: self.dry_run,
            notify: !self.no_notify,
        };

        let report = run(
            &config,
            &members,
            notifier.as_ref().map(|n| n as &dyn Notifier),
            options,
        )
        .with_context(|| format!("sync failed for {}", config.output_path.display()))?;

        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    match &report.write {
        WriteResult::Unchanged { path } => {
            println!("{prefix}✓ no changes ({})", path.display());
            return;
        }
        WriteResult::Written { path } => {
            println!("{prefix}✎ updated {}", path.display());
        }
        WriteResult::WouldWrite { path } => {
            println!("{prefix}~ would update {}", path.display());
        }
    }

    for tier in Tier::all() {
        let names = report.roster.names(*tier);
        if names.is_empty() {
            continue;
        }
        let heading = match tier {
            Tier::Gold => format!("Gold patrons ({})", names.len()).yellow().bold(),
            Tier::Silver => format!("Silver supporters ({})", names.len()).white().bold(),
        };
        println!("{heading}");
        for name in names {
            println!("  - {name}");
        }
    }

    for announcement in &report.announcements {
        println!(
            "{prefix}new {}: {}",
            announcement.tier,
            announcement.names.join(", ")
        );
    }
    if !dry_run && !report.announcements.is_empty() {
        println!(
            "{} of {} announcement(s) delivered",
            report.notified,
            report.announcements.len()
        );
    }
}

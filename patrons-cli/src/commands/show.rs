//! `patrons show` — print the classified roster.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use patrons_core::{classify, Roster, Tier};

use super::{load, SourceArgs};

/// Arguments for `patrons show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let (_config, members) = load(&self.source, None)?;
        let roster = classify(&members);

        if self.json {
            print_json(&roster)?;
        } else {
            print_table(&roster);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RosterJson<'a> {
    summary: SummaryJson,
    gold: &'a [String],
    silver: &'a [String],
}

#[derive(Serialize)]
struct SummaryJson {
    paying_count: usize,
    follower_count: usize,
}

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "tier")]
    tier: String,
}

fn print_json(roster: &Roster) -> Result<()> {
    let payload = RosterJson {
        summary: SummaryJson {
            paying_count: roster.gold.len(),
            follower_count: roster.silver.len(),
        },
        gold: &roster.gold,
        silver: &roster.silver,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_table(roster: &Roster) {
    println!(
        "{} gold, {} silver",
        roster.gold.len().to_string().yellow().bold(),
        roster.silver.len().to_string().bold()
    );
    if roster.is_empty() {
        println!("No patrons yet.");
        return;
    }

    let rows: Vec<RosterRow> = roster
        .entries()
        .map(|(name, tier)| RosterRow {
            name: name.to_string(),
            tier: tier_label(tier),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn tier_label(tier: Tier) -> String {
    match tier {
        Tier::Gold => "■ gold".yellow().bold().to_string(),
        Tier::Silver => "■ silver".white().to_string(),
    }
}

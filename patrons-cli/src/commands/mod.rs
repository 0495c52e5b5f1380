//! Subcommands and the argument groups they share.

pub mod diff;
pub mod show;
pub mod sync;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use patrons_api::HttpTransport;
use patrons_core::{Config, Member};
use patrons_sync::{load_members, MemberSource};

/// Where configuration and members come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// YAML config file (defaults to ./patrons.yaml when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read members from a local JSON array instead of the API.
    #[arg(long, value_name = "JSON")]
    pub members_file: Option<PathBuf>,

    /// Campaign to read (skips campaign discovery).
    #[arg(long)]
    pub campaign_id: Option<String>,
}

impl SourceArgs {
    /// Build the layered config. `output` is the command's `--output`, if it has one.
    pub fn load_config(&self, output: Option<&PathBuf>) -> Result<Config> {
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        let mut config = Config::load_file_layer(self.config.as_deref(), &cwd)
            .context("failed to load configuration")?;
        config.apply_env();

        if let Some(id) = &self.campaign_id {
            config.campaign_id = Some(id.clone());
        }
        if let Some(path) = output {
            config.output_path = path.clone();
        }
        config.validate().context("invalid configuration")?;
        tracing::debug!("output path: {}", config.output_path.display());
        Ok(config)
    }

    pub fn member_source(&self) -> MemberSource {
        match &self.members_file {
            Some(path) => MemberSource::File(path.clone()),
            None => MemberSource::Api,
        }
    }
}

pub fn transport(config: &Config) -> HttpTransport {
    HttpTransport::new(Duration::from_secs(config.timeout_secs))
}

/// Load the config and the member list in one step.
pub fn load(source: &SourceArgs, output: Option<&PathBuf>) -> Result<(Config, Vec<Member>)> {
    let config = source.load_config(output)?;
    let members = load_members(&config, &source.member_source(), &transport(&config))
        .context("failed to load members")?;
    Ok((config, members))
}

//! Patrons core library — domain types, tier classification, configuration.
//!
//! Public API surface:
//! - [`types`] — members, tiers, the classified [`Roster`], the Lua registry contract
//! - [`roster`] — [`classify`] members into tiers
//! - [`config`] — YAML file + environment configuration
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod roster;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use roster::classify;
pub use types::{Member, PatronStatus, RegistryContract, Roster, Tier, PLACEHOLDER_NAME};

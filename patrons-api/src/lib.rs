//! # patrons-api
//!
//! Blocking client for the two upstream endpoints the sync uses (campaign
//! lookup and paginated member listing) plus the outbound chat webhook.
//!
//! All network access goes through the [`Transport`] trait; [`HttpTransport`]
//! is the `ureq` implementation used in production.

pub mod campaign;
pub mod error;
pub mod members;
pub mod transport;
pub mod webhook;

pub use campaign::resolve_campaign_id;
pub use error::ApiError;
pub use members::{fetch_all_members, FetchReport, MemberQuery, StopReason};
pub use transport::{HttpTransport, Transport};
pub use webhook::{Announcement, Notifier, WebhookNotifier};

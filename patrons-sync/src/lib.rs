//! # patrons-sync
//!
//! Change-gated publish of the roster document and everything around it.
//!
//! Call [`pipeline::load_members`] to obtain members, then [`pipeline::run`]
//! to classify, render, write (only if the roster changed), report to the
//! orchestration output and announce new supporters.

pub mod diff;
pub mod error;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod writer;

pub use error::SyncError;
pub use pipeline::{load_members, preview, run, DiffPreview, MemberSource, SyncOptions, SyncReport};
pub use writer::WriteResult;

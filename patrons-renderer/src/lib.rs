//! # patrons-renderer
//!
//! Tera-based renderer that turns a classified [`Roster`] into the Lua data
//! file the addon loads, plus the inverse: pulling entry names back out of a
//! previously rendered document.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use patrons_core::{RegistryContract, Roster};
//! use patrons_renderer::Renderer;
//!
//! fn render(roster: &Roster) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(doc) = renderer.render(roster, &RegistryContract::default()) {
//!             println!("{} bytes", doc.len());
//!         }
//!     }
//! }
//! ```
//!
//! [`Roster`]: patrons_core::Roster

pub mod context;
pub mod engine;
pub mod error;
pub mod escape;
pub mod parse;

pub use context::RosterContext;
pub use engine::{Renderer, COMMENT_MARKER};
pub use error::RenderError;
pub use escape::lua_escape;
pub use parse::extract_names;

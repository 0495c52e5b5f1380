//! Tera rendering engine for the roster document.
//!
//! The template is baked into the binary; the output is a pure function of
//! the roster and registry contract (no timestamps, no environment).

use tera::Tera;

use patrons_core::{RegistryContract, Roster};

use crate::context::RosterContext;
use crate::error::RenderError;
use crate::escape::lua_escape_filter;

const TEMPLATE_NAME: &str = "patrons_init.lua.tera";
const TEMPLATE: &str = include_str!("templates/patrons_init.lua.tera");

/// Line prefix of Lua comments. Lines starting with it are ignored when
/// comparing documents.
pub const COMMENT_MARKER: &str = "--";

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.register_filter("lua_escape", lua_escape_filter);
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tera)
}

/// Renders the Lua roster document. Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with the embedded template.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera()? })
    }

    /// Render the document for `roster`.
    pub fn render(
        &self,
        roster: &Roster,
        registry: &RegistryContract,
    ) -> Result<String, RenderError> {
        let ctx = RosterContext::from_roster(roster, registry);
        self.render_with_context(&ctx)
    }

    /// Render using a caller-provided [`RosterContext`].
    pub fn render_with_context(&self, ctx: &RosterContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(TEMPLATE_NAME, &tera_ctx)?)
    }
}

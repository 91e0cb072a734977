//! Bundled page renderers.
//!
//! - [`TextRenderer`]: fixed-width text, one form feed between pages
//! - [`JsonRenderer`]: the resolved layout as pretty JSON

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::config::ExportFormat;
use crate::error::CliResult;
use crate::export::PageRenderer;
use khata_core::{DocumentLayout, DocumentPage};

/// Renderer chosen by [`ExportFormat`].
#[derive(Debug)]
pub enum Renderer {
    Text(TextRenderer),
    Json(JsonRenderer),
}

impl Renderer {
    pub fn for_format(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Text => Renderer::Text(TextRenderer::default()),
            ExportFormat::Json => Renderer::Json(JsonRenderer::default()),
        }
    }
}

impl PageRenderer for Renderer {
    fn extension(&self) -> &'static str {
        match self {
            Renderer::Text(r) => r.extension(),
            Renderer::Json(r) => r.extension(),
        }
    }

    fn render_page(&mut self, layout: &DocumentLayout, page: &DocumentPage) -> CliResult<()> {
        match self {
            Renderer::Text(r) => r.render_page(layout, page),
            Renderer::Json(r) => r.render_page(layout, page),
        }
    }

    fn assemble(&mut self, layout: &DocumentLayout) -> CliResult<Vec<u8>> {
        match self {
            Renderer::Text(r) => r.assemble(layout),
            Renderer::Json(r) => r.assemble(layout),
        }
    }
}

use khata_core::{DocumentLayout, DocumentPage};

use crate::error::{CliError, CliResult};
use crate::export::PageRenderer;

/// Writes the whole layout as pretty JSON.
///
/// Pages are only counted while rendering; the layout already holds them.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    rendered: usize,
}

impl PageRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render_page(&mut self, _layout: &DocumentLayout, _page: &DocumentPage) -> CliResult<()> {
        self.rendered += 1;
        Ok(())
    }

    fn assemble(&mut self, layout: &DocumentLayout) -> CliResult<Vec<u8>> {
        if self.rendered != layout.pages.len() {
            return Err(CliError::Render {
                page: self.rendered + 1,
                reason: format!(
                    "{} of {} pages rendered",
                    self.rendered,
                    layout.pages.len()
                ),
            });
        }

        let mut bytes = serde_json::to_vec_pretty(layout)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

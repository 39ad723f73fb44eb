//! Display collaborator and the "show decoded cell" action.

use klv_quote::QuoteVariant;
use tracing::info;

use crate::address::CellRef;
use crate::host::{SheetError, SheetHost};

/// Dialog title used for decoded script source.
pub const DISPLAY_TITLE: &str = "Formatted Content";

/// Renders a pre-formatted, already HTML-safe text block with a copy action.
pub trait TextDisplay {
    fn show_text(&mut self, title: &str, html_safe: &str) -> Result<(), SheetError>;
}

/// Keeps every shown block in memory. Useful as a test double.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<(String, String)>,
}

impl TextDisplay for RecordingDisplay {
    fn show_text(&mut self, title: &str, html_safe: &str) -> Result<(), SheetError> {
        self.shown.push((title.to_string(), html_safe.to_string()));
        Ok(())
    }
}

/// Read one cell, decode it with `variant`, show the HTML-safe form, and
/// return the decoded source (the text a copy action must put on the
/// clipboard).
pub fn show_decoded_cell<H, D>(
    host: &H,
    display: &mut D,
    sheet: &str,
    cell: CellRef,
    variant: QuoteVariant,
) -> Result<String, SheetError>
where
    H: SheetHost + ?Sized,
    D: TextDisplay + ?Sized,
{
    let escaped = host.read_cell(sheet, cell)?.to_string();
    let raw = variant.decode(&escaped);
    let html_safe = variant.escape_for_display(&raw);

    display.show_text(DISPLAY_TITLE, &html_safe)?;
    info!(
        sheet,
        cell = %cell,
        variant = variant.as_str(),
        chars = raw.chars().count(),
        "displayed decoded cell"
    );
    Ok(raw)
}

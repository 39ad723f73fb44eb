//! Key-levels overlay built from sheet rows.
//!
//! Sheet layout (one ticker per row): ticker | supports | resistances, where
//! the level columns hold comma-separated prices (`"100, 101"`) or a single
//! numeric cell. Further columns are ignored.

use klv_sheet::CellValue;
use tracing::warn;

use crate::gap::gap_block;
use crate::{header, pine_float, pine_string, PineOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyLevelsRow {
    pub ticker: String,
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
}

impl KeyLevelsRow {
    fn is_empty(&self) -> bool {
        self.supports.is_empty() && self.resistances.is_empty()
    }
}

/// Parse sheet rows into per-ticker levels. Rows with a blank ticker are skipped.
pub fn parse_key_levels(rows: &[Vec<CellValue>]) -> Vec<KeyLevelsRow> {
    rows.iter()
        .filter_map(|row| {
            let ticker = row.first()?.to_string().trim().to_uppercase();
            if ticker.is_empty() {
                return None;
            }
            let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
            Some(KeyLevelsRow {
                supports: parse_levels(&ticker, &cell(1)),
                resistances: parse_levels(&ticker, &cell(2)),
                ticker,
            })
        })
        .collect()
}

/// Levels from one cell. Unparseable entries are dropped with a warning.
pub fn parse_levels(ticker: &str, cell: &CellValue) -> Vec<f64> {
    match cell {
        CellValue::Empty => Vec::new(),
        CellValue::Number(n) if n.is_finite() => vec![*n],
        CellValue::Number(_) => Vec::new(),
        CellValue::Text(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .filter_map(|t| match t.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    warn!(ticker, entry = t, "skipping unparseable level");
                    None
                }
            })
            .collect(),
    }
}

/// Overlay script: one `switch syminfo.ticker` arm per ticker with levels,
/// then the gap label.
pub fn key_levels_script(rows: &[KeyLevelsRow], opts: &PineOptions) -> String {
    let mut out = header(&opts.title);
    out.push('\n');

    let arms: Vec<&KeyLevelsRow> = rows.iter().filter(|r| !r.is_empty()).collect();
    if !arms.is_empty() {
        out.push_str("// Support and resistance per ticker\n");
        out.push_str("if barstate.islast\n");
        out.push_str("    switch syminfo.ticker\n");
        for row in arms {
            out.push_str(&format!("        {} =>\n", pine_string(&row.ticker)));
            for &v in &row.supports {
                out.push_str(&level_line(v, &opts.support_color));
            }
            for &v in &row.resistances {
                out.push_str(&level_line(v, &opts.resistance_color));
            }
        }
        out.push('\n');
    }

    out.push_str(&gap_block(opts));
    out
}

fn level_line(price: f64, color: &str) -> String {
    let p = pine_float(price);
    format!(
        "            line.new(bar_index - 1, {p}, bar_index, {p}, extend=extend.both, color={color})\n"
    )
}

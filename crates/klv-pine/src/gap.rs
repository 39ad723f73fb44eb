//! Gap label block.

use crate::{header, PineOptions};

/// The reference-price selection line every generated script carries.
pub const GAP_REFERENCE_LINE: &str = "refPrice = not na(todayOpen) ? todayOpen : close";

/// Standalone gap indicator.
pub fn gap_indicator(opts: &PineOptions) -> String {
    let mut out = header(&opts.title);
    out.push('\n');
    out.push_str(&gap_block(opts));
    out
}

/// Gap computation + label, without the script header.
pub(crate) fn gap_block(opts: &PineOptions) -> String {
    format!(
        r#"// Previous close and today's open, regular session only
t_rth = ticker.new(syminfo.prefix, syminfo.ticker, session.regular)
prevClose = request.security(t_rth, "D", close[1], barmerge.gaps_off, barmerge.lookahead_on)
todayOpen = request.security(t_rth, "D", open, barmerge.gaps_off, barmerge.lookahead_on)

// Today's open once it has printed, otherwise the last price
{reference}

gappct = prevClose != 0 ? 100.0 * ((refPrice - prevClose) / prevClose) : na
gapDisp = math.abs(gappct) < 3 ? math.round(gappct * 10.0) / 10.0 : math.round(gappct)
gapStr = na(gapDisp) ? "n/a" : str.tostring(gapDisp) + "%"

// Session label, display only
nyMinutes = hour(time, "America/New_York") * 60 + minute(time, "America/New_York")
sessionType = nyMinutes >= 570 and nyMinutes <= 960 ? "REGULAR" : nyMinutes >= 240 and nyMinutes < 570 ? "PREMARKET" : "AFTERHOURS"

var label gapLabel = na
if barstate.islast
    label.delete(gapLabel)
    gapLabel := label.new(bar_index, high, "Gap: " + gapStr + "\n" + sessionType, style=label.style_label_down, color={label_color}, textcolor={text_color})
"#,
        reference = GAP_REFERENCE_LINE,
        label_color = opts.label_color,
        text_color = opts.text_color,
    )
}

//! `klv gap`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use klv_gap::{evaluate, GapInput};

pub fn run(prev_close: f64, open: Option<f64>, last: f64, at: DateTime<Utc>) -> Result<()> {
    let result = evaluate(&GapInput::new(prev_close, open, last, at))?;

    let mut out = serde_json::to_value(&result).context("serialize gap result failed")?;
    if let Some(obj) = out.as_object_mut() {
        obj.insert("label".to_string(), serde_json::Value::String(result.label()));
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize gap result failed")?
    );
    Ok(())
}

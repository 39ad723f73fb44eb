//! Command handlers for `klv`.
//!
//! Shared helpers live here; command-specific logic lives in the submodules.

pub mod fundamentals;
pub mod gap;
pub mod pine;
pub mod quote;
pub mod sheet;

use anyhow::{Context, Result};
use clap::Args;
use klv_config::AppConfig;
use std::fs;
use std::io::{self, Read};

/// Where script text comes from: `--text`, `--input <file>`, or stdin.
#[derive(Args, Debug, Clone)]
pub struct TextSource {
    /// Inline text
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Read text from this file
    #[arg(long)]
    pub input: Option<String>,
}

impl TextSource {
    /// File and stdin input lose one trailing line break; inline text is
    /// taken verbatim.
    pub fn read(&self) -> Result<String> {
        if let Some(t) = &self.text {
            return Ok(t.clone());
        }
        let raw = match &self.input {
            Some(p) => fs::read_to_string(p).with_context(|| format!("read input failed: {p}"))?,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("read stdin failed")?;
                buf
            }
        };
        Ok(strip_one_newline(raw))
    }
}

fn strip_one_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}

/// Typed config from `--config` layers, or defaults when none are given.
pub fn load_app_config(paths: &[String]) -> Result<AppConfig> {
    if paths.is_empty() {
        return Ok(AppConfig::default());
    }
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = klv_config::load_layered_yaml(&path_refs)?;
    tracing::debug!(config_hash = %loaded.config_hash, "config loaded");
    loaded.app()
}

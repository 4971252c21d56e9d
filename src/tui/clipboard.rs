//! System clipboard access through `arboard`

use anyhow::{Context, Result};
use arboard::Clipboard;
use serde_json::Value;

/// Pretty JSON as shown in the detail modal and placed on the clipboard
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Copy text to the clipboard.
///
/// A fresh handle per call; fails without a display server.
pub fn copy_text(text: &str) -> Result<()> {
    Clipboard::new()
        .context("Failed to access clipboard")?
        .set_text(text)
        .context("Failed to set clipboard text")
}

pub fn copy_json(value: &Value) -> Result<()> {
    copy_text(&pretty_json(value))
}

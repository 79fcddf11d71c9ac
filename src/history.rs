//! Recent conversation context from the session transcript
//!
//! The transcript is JSON lines. Only records shaped like
//! `{"type": "user", "message": {"content": "<text>"}}` count; tool results and
//! other structured content are skipped.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TranscriptRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,

    #[serde(default)]
    message: Option<TranscriptMessage>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    #[serde(default)]
    content: serde_json::Value,
}

/// User-authored text of one transcript line, if it has any. Lines that are
/// not valid UTF-8 are rejected by the JSON parser like any other bad line.
fn user_text(line: &[u8]) -> Option<String> {
    let record: TranscriptRecord = serde_json::from_slice(line).ok()?;
    if record.kind.as_deref() != Some("user") {
        return None;
    }
    match record.message?.content {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// The last `limit` user messages of the transcript, oldest first, joined
/// with single spaces. Returns an empty string when the transcript is missing
/// or unreadable; unparseable lines are skipped one by one.
pub fn extract(transcript_path: &Path, limit: usize) -> String {
    let content = match fs::read(transcript_path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No transcript context from {:?}: {}", transcript_path, e);
            return String::new();
        }
    };

    let mut recent: Vec<String> = content
        .split(|&b| b == b'\n')
        .rev()
        .filter_map(user_text)
        .take(limit)
        .collect();
    recent.reverse();

    debug!("Collected {} recent user messages", recent.len());
    recent.join(" ")
}

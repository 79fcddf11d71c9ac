//! Hook wire types: the request read from stdin and the line written to stdout

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::RouterError;

// ============================================================================
// Input Types (from Claude Code hook)
// ============================================================================

/// Input payload from Claude Code UserPromptSubmit hook
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    /// The user's prompt text
    #[serde(default)]
    pub prompt: Option<String>,

    /// Current working directory
    #[serde(default)]
    pub cwd: Option<String>,

    /// Path to conversation transcript (JSON lines)
    #[serde(default, alias = "transcriptPath")]
    pub transcript_path: Option<String>,
}

impl HookInput {
    /// Parse the raw stdin payload
    pub fn parse(raw: &str) -> Result<Self, RouterError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The prompt, or `None` when absent or empty (nothing to route)
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// Directory to inspect for project markers, defaulting to the process cwd
    pub fn working_dir(&self) -> PathBuf {
        match self.cwd.as_deref() {
            Some(cwd) if !cwd.is_empty() => PathBuf::from(cwd),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Transcript path, or `None` when absent or empty
    pub fn transcript(&self) -> Option<&Path> {
        self.transcript_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// The selected skill and the highest-weight reason it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<system-reminder>推奨スキル: /{} - {}</system-reminder>",
            self.name, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_input() {
        let input = HookInput::parse(
            r#"{"prompt":"fix it","cwd":"/work","transcript_path":"/tmp/t.jsonl","session_id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(input.prompt(), Some("fix it"));
        assert_eq!(input.working_dir(), PathBuf::from("/work"));
        assert_eq!(input.transcript(), Some(Path::new("/tmp/t.jsonl")));
    }

    #[test]
    fn test_parse_camel_case_transcript() {
        let input = HookInput::parse(r#"{"prompt":"x","transcriptPath":"/t.jsonl"}"#).unwrap();
        assert_eq!(input.transcript(), Some(Path::new("/t.jsonl")));
    }

    #[test]
    fn test_empty_or_missing_prompt() {
        assert_eq!(HookInput::parse(r#"{"prompt":""}"#).unwrap().prompt(), None);
        assert_eq!(HookInput::parse(r#"{"cwd":"/x"}"#).unwrap().prompt(), None);
        assert_eq!(HookInput::parse(r#"{"prompt":null}"#).unwrap().prompt(), None);
    }

    #[test]
    fn test_malformed_input() {
        assert!(HookInput::parse("not json").is_err());
        assert!(HookInput::parse(r#"{"prompt": 42}"#).is_err());
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let input = HookInput::parse(r#"{"prompt":"hi","cwd":""}"#).unwrap();
        assert_eq!(input.transcript(), None);
        assert_eq!(input.working_dir(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_recommendation_line() {
        let rec = Recommendation {
            name: "ts-format".to_string(),
            reason: "keyword «typescript» matched exactly".to_string(),
        };
        assert_eq!(
            rec.to_string(),
            "<system-reminder>推奨スキル: /ts-format - keyword «typescript» matched exactly</system-reminder>"
        );
    }
}

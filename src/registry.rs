//! Skill registry loading
//!
//! The registry is a JSON object with a `skills` array of descriptors, shipped
//! next to the binary:
//!
//! ```text
//! <skill>/
//! ├── scripts/auto-skill-selector
//! └── references/skills_registry.json
//! ```
//!
//! The registry is optional. A missing or malformed file loads as an empty
//! registry, which makes the hook stay silent.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::RouterError;

/// Directory holding the registry, relative to the skill root
const REGISTRY_DIR: &str = "references";

/// Registry file name
const REGISTRY_FILE: &str = "skills_registry.json";

// ============================================================================
// Registry Types
// ============================================================================

/// Static matching signals for one skill
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillDescriptor {
    /// Skill name, emitted as `/{name}`
    pub name: String,

    /// Words and phrases matched against the prompt and history
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Technology tags this skill applies to (python, react, flutter, ...)
    #[serde(default)]
    pub tech_stack: BTreeSet<String>,

    /// File patterns; only extension patterns (".ts") are scored
    #[serde(default)]
    pub file_patterns: Vec<String>,
}

/// On-disk registry layout. Entries stay untyped so one bad descriptor
/// doesn't discard the rest.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    skills: Vec<serde_json::Value>,
}

// ============================================================================
// Loading
// ============================================================================

/// Installed registry location: `<exe>/../../references/skills_registry.json`.
///
/// The executable path is canonicalized so the lookup works when the binary is
/// invoked through a symlink.
pub fn default_path() -> Result<PathBuf, RouterError> {
    let exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .map_err(RouterError::ExecutablePath)?;
    let skill_root = exe
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| RouterError::RegistryNotFound(exe.clone()))?;
    Ok(skill_root.join(REGISTRY_DIR).join(REGISTRY_FILE))
}

/// Load and parse the registry at `path`, preserving declaration order
pub fn load_from(path: &Path) -> Result<Vec<SkillDescriptor>, RouterError> {
    if !path.exists() {
        return Err(RouterError::RegistryNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| RouterError::RegistryRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file: RegistryFile =
        serde_json::from_str(&content).map_err(|e| RouterError::RegistryParse(e.to_string()))?;

    let skills: Vec<SkillDescriptor> = file
        .skills
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(skill) => Some(skill),
            Err(e) => {
                warn!("Skipping registry entry #{}: {}", i, e);
                None
            }
        })
        .collect();

    Ok(skills)
}

/// Load the registry at `path`, degrading to an empty registry on any error
pub fn load_or_empty(path: &Path) -> Vec<SkillDescriptor> {
    match load_from(path) {
        Ok(skills) => {
            info!("Loaded {} skills from {:?}", skills.len(), path);
            skills
        }
        Err(RouterError::RegistryNotFound(path)) => {
            debug!("Skill registry not found at {:?}, using empty registry", path);
            Vec::new()
        }
        Err(e) => {
            warn!("{}, using empty registry", e);
            Vec::new()
        }
    }
}

/// Load the installed registry; never fails
pub fn load() -> Vec<SkillDescriptor> {
    match default_path() {
        Ok(path) => load_or_empty(&path),
        Err(e) => {
            warn!("{}, using empty registry", e);
            Vec::new()
        }
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_registry(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(REGISTRY_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = write_registry(
            &dir,
            r#"{"skills": [
                {"name": "flutter-dev", "keywords": ["flutter", "widget"], "tech_stack": ["dart", "flutter"], "file_patterns": [".dart"]},
                {"name": "python-dev", "keywords": ["python"]}
            ]}"#,
        );

        let skills = load_from(&path).unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "flutter-dev");
        assert_eq!(skills[0].keywords, vec!["flutter", "widget"]);
        assert!(skills[0].tech_stack.contains("dart"));
        assert_eq!(skills[0].file_patterns, vec![".dart"]);
        assert_eq!(skills[1].name, "python-dev");
        assert!(skills[1].tech_stack.is_empty());
        assert!(skills[1].file_patterns.is_empty());
    }

    #[test]
    fn test_missing_registry_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_from(&path),
            Err(RouterError::RegistryNotFound(_))
        ));
        assert!(load_or_empty(&path).is_empty());
    }

    #[test]
    fn test_malformed_registry_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_registry(&dir, "{ not json");
        assert!(matches!(load_from(&path), Err(RouterError::RegistryParse(_))));
        assert!(load_or_empty(&path).is_empty());

        let path = write_registry(&dir, r#"{"skills": "oops"}"#);
        assert!(load_or_empty(&path).is_empty());
    }

    #[test]
    fn test_missing_skills_field_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_registry(&dir, r#"{"version": "1"}"#);
        assert!(load_from(&path).unwrap().is_empty());
    }

    #[test]
    fn test_bad_entry_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_registry(
            &dir,
            r#"{"skills": [{"keywords": ["orphan"]}, {"name": "ok", "keywords": ["fine"]}]}"#,
        );
        let skills = load_or_empty(&path);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "ok");
    }

    #[test]
    fn test_default_path_layout() {
        let path = default_path().unwrap();
        assert!(path.ends_with("references/skills_registry.json"));
    }

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/etc/registry.json");
        assert_eq!(expand_home(plain), plain.to_path_buf());

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/skills/registry.json")),
                home.join("skills/registry.json")
            );
        }
    }
}

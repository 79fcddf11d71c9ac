//! Project technology detection from marker files in the working directory

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Python project markers
const PYTHON_MARKERS: &[&str] = &["pyproject.toml", "requirements.txt"];

/// Node.js package manifest
const PACKAGE_JSON: &str = "package.json";

/// Flutter / Dart package manifest
const PUBSPEC: &str = "pubspec.yaml";

/// Google Apps Script project markers
const GAS_MARKERS: &[&str] = &[".clasp.json", "appsscript.json"];

/// package.json dependency names and the tag each one implies
const DEPENDENCY_TAGS: &[(&str, &str)] = &[
    ("typescript", "typescript"),
    ("react", "react"),
    ("next", "react"),
    ("vue", "vue"),
    ("svelte", "svelte"),
    ("tailwindcss", "tailwind"),
    ("playwright", "playwright"),
    ("@playwright/test", "playwright"),
];

/// The parts of package.json we look at. Versions are never parsed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: HashMap<String, serde_json::Value>,

    #[serde(default)]
    dev_dependencies: HashMap<String, serde_json::Value>,
}

impl PackageManifest {
    fn declares(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Derive the set of technology tags for the project rooted at `cwd`.
///
/// Each check is independent. An unreadable or malformed package.json only
/// loses the framework tags; the base tags from its presence are kept.
pub fn detect(cwd: &Path) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    if any_exists(cwd, PYTHON_MARKERS) {
        tags.insert("python".to_string());
    }

    let package_json = cwd.join(PACKAGE_JSON);
    if package_json.exists() {
        tags.insert("nodejs".to_string());
        tags.insert("javascript".to_string());

        if let Some(manifest) = read_package_manifest(&package_json) {
            for (dependency, tag) in DEPENDENCY_TAGS {
                if manifest.declares(dependency) {
                    tags.insert(tag.to_string());
                }
            }
        }
    }

    if cwd.join(PUBSPEC).exists() {
        tags.insert("dart".to_string());
        tags.insert("flutter".to_string());
    }

    if any_exists(cwd, GAS_MARKERS) {
        tags.insert("gas".to_string());
        tags.insert("javascript".to_string());
    }

    debug!("Detected tech stack in {:?}: {:?}", cwd, tags);
    tags
}

fn any_exists(dir: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| dir.join(name).exists())
}

fn read_package_manifest(path: &Path) -> Option<PackageManifest> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Cannot read {:?}: {}", path, e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!("Ignoring malformed {:?}: {}", path, e);
            None
        }
    }
}

//! Parser settings and their `occlang.toml` discovery.
//!
//! A project can drop an `occlang.toml` anywhere above its sources;
//! the nearest one on the ancestor walk from the file being analyzed
//! wins. CLI flags override whatever the file provides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

const SETTINGS_FILENAME: &str = "occlang.toml";

/// How the clang backend is invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserSettings {
    /// Compiler binary to run; anything clang-compatible that accepts
    /// `-ast-dump=json`.
    pub clang_path: String,
    pub include_paths: Vec<String>,
    pub extra_flags: Vec<String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            clang_path: "clang".to_string(),
            include_paths: Vec::new(),
            extra_flags: Vec::new(),
        }
    }
}

impl ParserSettings {
    /// Settings for `source`: nearest `occlang.toml` above it, or
    /// defaults when none exists or the file does not parse.
    pub fn for_source(source: &Path) -> Self {
        let Some(toml_path) = find_settings_toml(source) else {
            return Self::default();
        };
        match load_settings(&toml_path) {
            Some(settings) => {
                debug!("[settings] loaded {}", toml_path.display());
                settings
            },
            None => Self::default(),
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.clang_path = self.clang_path.trim().to_string();
        if self.clang_path.is_empty() {
            self.clang_path = "clang".to_string();
        }
        self.include_paths =
            self.include_paths.iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect();
        self.extra_flags = self.extra_flags.iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
    }
}

/// Walks parent directories from `start` looking for `occlang.toml`.
/// Returns the path to the first one found, or `None`.
pub(crate) fn find_settings_toml(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(SETTINGS_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads and parses an `occlang.toml` file.
///
/// Returns `None` if the file cannot be read or parsed.
pub(crate) fn load_settings(path: &Path) -> Option<ParserSettings> {
    let content = std::fs::read_to_string(path).ok()?;
    let file: SettingsFile = toml::from_str(&content).ok()?;
    let mut settings = ParserSettings {
        clang_path: file.clang_path.unwrap_or_else(|| "clang".to_string()),
        include_paths: file.include_paths,
        extra_flags: file.extra_flags,
    };
    settings.normalize();
    Some(settings)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SettingsFile {
    clang_path: Option<String>,
    include_paths: Vec<String>,
    extra_flags: Vec<String>,
}

#[cfg(test)]
#[path = "../tests/src/settings_tests.rs"]
mod tests;

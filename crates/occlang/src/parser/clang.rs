use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::UnitParser;
use crate::parser::clang_nodes::ClangNode;
use crate::parser::lower::lower;
use crate::settings::ParserSettings;
use crate::tree::SyntaxNode;
use crate::unit::{BufferSnapshot, ParsedUnit};

static NEXT_AST_DUMP_ID: AtomicU64 = AtomicU64::new(1);

/// Production [`UnitParser`] backed by `clang -ast-dump=json`.
///
/// A fresh parse dumps the on-disk file directly. A reparse writes the
/// snapshot text to a unique temp file, dumps that, and rewrites any
/// temp paths in the resulting extents back to the unit's identity, so
/// records always name the file the editor knows.
#[derive(Debug)]
pub struct ClangParser {
    settings: ParserSettings,
}

impl ClangParser {
    pub fn new(settings: ParserSettings) -> Self {
        Self {
            settings,
        }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    fn dump_args(
        &self,
        source: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            "-fsyntax-only".to_string(),
            "-Xclang".to_string(),
            "-ast-dump=json".to_string(),
            "-fno-color-diagnostics".to_string(),
        ];
        for p in &self.settings.include_paths {
            args.push("-I".to_string());
            args.push(p.clone());
        }
        args.extend(self.settings.extra_flags.iter().cloned());
        args.push(source.display().to_string());
        args
    }

    /// Run the AST dump and return the raw JSON string.
    fn run_ast_dump(
        &self,
        source: &Path,
        identity: &str,
    ) -> Result<String> {
        let args = self.dump_args(source);
        debug!("[ast-dump] {} {}", self.settings.clang_path, args.join(" "));

        let output = Command::new(&self.settings.clang_path)
            .args(&args)
            .output()
            .map_err(|e| Error::parse_failure(identity, format!("failed to run `{}`: {e}", self.settings.clang_path)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.lines() {
                if line.contains("error:") {
                    warn!("[ast-dump] compiler error: {line}");
                }
            }
            debug!("[ast-dump] exited with non-zero status (partial AST may still be usable)");
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| Error::parse_failure(identity, "AST dump output was not UTF-8"))?;
        if stdout.is_empty() || !stdout.starts_with('{') {
            return Err(Error::parse_failure(identity, "AST dump produced no usable JSON"));
        }

        debug!("[ast-dump] produced {} bytes of JSON for {identity}", stdout.len());
        Ok(stdout)
    }

    fn lower_dump(
        &self,
        json: &str,
        identity: &str,
    ) -> Result<SyntaxNode> {
        let root: ClangNode = serde_json::from_str(json)
            .map_err(|e| Error::parse_failure(identity, format!("malformed AST JSON: {e}")))?;
        Ok(lower(&root))
    }
}

impl UnitParser for ClangParser {
    fn parse(
        &self,
        identity: &str,
    ) -> Result<ParsedUnit> {
        let json = self.run_ast_dump(Path::new(identity), identity)?;
        let root = self.lower_dump(&json, identity)?;
        Ok(ParsedUnit::new(identity, root))
    }

    fn reparse(
        &self,
        unit: &mut ParsedUnit,
        snapshot: &BufferSnapshot,
    ) -> Result<()> {
        let identity = unit.identity().to_owned();

        // Dump from a temp copy of the snapshot so unsaved edits are
        // reflected without touching the real file.
        let tmp_dir = std::env::temp_dir().join(format!("occlang-reparse-{}", std::process::id()));
        std::fs::create_dir_all(&tmp_dir)
            .map_err(|e| Error::parse_failure(identity.as_str(), format!("failed to create temp dir: {e}")))?;

        let dump_id = NEXT_AST_DUMP_ID.fetch_add(1, Ordering::Relaxed);
        let extension = Path::new(&identity).extension().and_then(|e| e.to_str()).unwrap_or("cpp");
        let src_file = tmp_dir.join(format!("buffer-{dump_id}.{extension}"));

        if let Err(e) = std::fs::write(&src_file, &snapshot.text) {
            let _ = std::fs::remove_dir(&tmp_dir);
            return Err(Error::parse_failure(identity.as_str(), format!("failed to write temp file: {e}")));
        }

        // Capture the temp path (raw and canonicalized) before cleanup
        // so extents can be rewritten back to the original identity.
        let mut tmp_files = vec![src_file.display().to_string()];
        if let Some(canon) = std::fs::canonicalize(&src_file).ok().map(|p| p.display().to_string())
            && !tmp_files.contains(&canon)
        {
            tmp_files.push(canon);
        }

        let dumped = self.run_ast_dump(&src_file, &identity);

        let _ = std::fs::remove_file(&src_file);
        let _ = std::fs::remove_dir(&tmp_dir);

        let mut root = self.lower_dump(&dumped?, &identity)?;
        rewrite_files(&mut root, &tmp_files, &identity);
        unit.replace_root(root);
        Ok(())
    }
}

/// Rewrite extents pointing at the temp dump file to the real identity.
fn rewrite_files(
    node: &mut SyntaxNode,
    tmp_files: &[String],
    identity: &str,
) {
    if let Some(extent) = node.extent.as_mut()
        && let Some(file) = extent.file.as_mut()
        && tmp_files.iter().any(|tmp| paths_equivalent(file, tmp))
    {
        *file = identity.to_owned();
    }
    for child in &mut node.children {
        rewrite_files(child, tmp_files, identity);
    }
}

/// Check if two file paths refer to the same file.
///
/// Handles the common case where the AST dump reports a canonicalized
/// path while the temp file list has the original path (or vice versa).
fn paths_equivalent(
    a: &str,
    b: &str,
) -> bool {
    if a == b {
        return true;
    }
    let pa = PathBuf::from(a);
    let pb = PathBuf::from(b);
    if let (Ok(ca), Ok(cb)) = (pa.canonicalize(), pb.canonicalize()) {
        return ca == cb;
    }
    false
}

#[cfg(test)]
#[path = "../../tests/src/parser/clang_tests.rs"]
mod tests;

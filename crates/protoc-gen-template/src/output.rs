//! Output collection.
//!
//! Rendered files leave the plugin inside the `CodeGeneratorResponse`;
//! protoc writes them relative to its output directory. The `render` CLI
//! command writes them directly with [`write_all`].

use prost_types::compiler::code_generator_response::File;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Turn rendered files into response files.
///
/// Paths that were already produced earlier in the run are dropped. With
/// `overwrite` disabled, paths that already exist below `root` are skipped.
pub fn collect(files: Vec<GeneratedFile>, overwrite: bool, root: &Path) -> Vec<File> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(files.len());

    for file in files {
        if !seen.insert(file.path.clone()) {
            tracing::warn!(path = %file.path, "path rendered more than once, keeping the first");
            continue;
        }
        if !overwrite && root.join(&file.path).exists() {
            tracing::info!(path = %file.path, "skipping existing file");
            continue;
        }

        out.push(File {
            name: Some(file.path),
            content: Some(file.content),
            ..Default::default()
        });
    }

    out
}

/// Write response files below `out_dir`, creating directories as needed.
pub fn write_all(files: &[File], out_dir: &Path) -> io::Result<()> {
    for file in files {
        let path = out_dir.join(file.name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.content())?;
        tracing::info!(path = %path.display(), "wrote file");
    }
    Ok(())
}

#[cfg(test)]
#[path = "output/output_tests.rs"]
mod output_tests;

//! String Constants Generator
//!
//! Embeds each file of a directory as `pub const NAME: &str = "...";` so
//! benchmarks can run scripts without touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ConstantsConfig;
use crate::emit::{render_constants, ConstantDecl, GeneratedArtifact, Summary};
use crate::escape::escape_literal;
use crate::ident::{constant_identifier, Scope};
use crate::scan::scan_files;
use crate::{GenError, GenResult};

/// Generates one string constant per file in a directory.
#[derive(Debug, Clone)]
pub struct ConstantsGenerator {
    source_dir: PathBuf,
    exclude: Vec<String>,
}

impl ConstantsGenerator {
    /// Creates a generator over `source_dir` with nothing excluded.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            exclude: Vec::new(),
        }
    }

    pub fn from_config(config: &ConstantsConfig) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            exclude: config.exclude.clone(),
        }
    }

    /// Skips files with this exact name, typically the generated file
    /// itself when it lives in the source directory.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Scans and renders without writing anything.
    pub fn build(&self) -> GenResult<GeneratedArtifact> {
        let scan = scan_files(&self.source_dir, &self.exclude)?;

        let mut scope = Scope::new("constant");
        let mut decls = Vec::with_capacity(scan.items.len());
        for entry in scan.items {
            let identifier = scope.claim(constant_identifier(&entry.raw_name))?;
            let content = read_source(&entry.path)?;
            debug!(
                "{} -> {} ({} bytes)",
                entry.path.display(),
                identifier.identifier,
                content.len()
            );
            decls.push(ConstantDecl {
                identifier,
                escaped: escape_literal(&content),
            });
        }

        let summary = Summary {
            modules: 0,
            declarations: decls.len(),
            skipped: scan.skipped,
        };
        Ok(GeneratedArtifact::new(render_constants(&decls), summary))
    }

    /// Builds and writes to `output`.
    pub fn generate(&self, output: &Path) -> GenResult<Summary> {
        let artifact = self.build()?;
        artifact.write_to(output)?;
        let summary = artifact.summary();
        info!(
            "Wrote {} constants to {} ({} skipped)",
            summary.declarations,
            output.display(),
            summary.skipped
        );
        Ok(summary)
    }
}

fn read_source(path: &Path) -> GenResult<String> {
    let bytes = fs::read(path).map_err(|e| GenError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| GenError::NonUtf8 {
        path: path.to_path_buf(),
    })
}

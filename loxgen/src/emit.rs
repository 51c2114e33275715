//! Source Emission
//!
//! Renders declarations into Rust source text and writes the result.
//! Nothing here validates identifiers or literal bodies; both arrive
//! already derived and escaped.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::ident::GeneratedIdentifier;
use crate::{GenError, GenResult};

/// A string constant to emit.
#[derive(Debug, Clone)]
pub struct ConstantDecl {
    pub identifier: GeneratedIdentifier,
    /// Literal body, already escaped
    pub escaped: String,
}

/// A test function to emit.
#[derive(Debug, Clone)]
pub struct TestFn {
    pub identifier: GeneratedIdentifier,
    /// Fixture path, already escaped
    pub path_literal: String,
}

/// A test module (one per category).
#[derive(Debug, Clone)]
pub struct TestModule {
    pub identifier: GeneratedIdentifier,
    pub functions: Vec<TestFn>,
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Modules emitted (always 0 for constants)
    pub modules: usize,
    /// Constants or test functions emitted
    pub declarations: usize,
    /// Scanned entries left out (directories, excluded names, other extensions)
    pub skipped: usize,
}

/// The full text of one generated file.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    text: String,
    summary: Summary,
}

impl GeneratedArtifact {
    pub fn new(text: String, summary: Summary) -> Self {
        Self { text, summary }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Replaces `output` with this artifact.
    ///
    /// The text goes to a temporary file next to `output` which is then
    /// renamed over it, so a failure never leaves a half-written file.
    pub fn write_to(&self, output: &Path) -> GenResult<()> {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GenError::io(dir, e))?;
        tmp.write_all(self.text.as_bytes())
            .map_err(|e| GenError::io(tmp.path(), e))?;
        tmp.persist(output)
            .map_err(|e| GenError::io(output, e.error))?;

        Ok(())
    }

    /// Whether `output` already holds exactly this artifact.
    pub fn is_current(&self, output: &Path) -> GenResult<bool> {
        match fs::read(output) {
            Ok(existing) => Ok(existing == self.text.as_bytes()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GenError::io(output, e)),
        }
    }
}

/// One `pub const` line per declaration, in order.
pub fn render_constants(decls: &[ConstantDecl]) -> String {
    let mut out = String::new();
    for decl in decls {
        out.push_str(&format!(
            "pub const {}: &str = \"{}\";\n",
            decl.identifier.identifier, decl.escaped
        ));
    }
    out
}

/// One `mod` block per module, each importing `runner` from the parent
/// scope and calling it from every test function.
pub fn render_test_suite(modules: &[TestModule], runner: &str) -> String {
    let mut out = String::new();
    for module in modules {
        out.push_str(&format!("mod {} {{\n", module.identifier.identifier));
        out.push_str(&format!("    use super::{};\n", runner));
        for func in &module.functions {
            out.push_str("    #[test]\n");
            out.push_str(&format!("    fn {}() {{\n", func.identifier.identifier));
            out.push_str(&format!("        {}(\"{}\");\n", runner, func.path_literal));
            out.push_str("    }\n");
        }
        out.push_str("}\n");
    }
    out
}

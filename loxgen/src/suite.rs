//! Test Suite Generator
//!
//! Walks `root/<category>/<fixture>.<ext>` and emits one module per
//! category with one `#[test]` per fixture:
//!
//! ```text
//! mod assignment {
//!     use super::test;
//!     #[test]
//!     fn global() {
//!         test("./lox_test/assignment/global.lox");
//!     }
//! }
//! ```
//!
//! The runner itself lives in the module that includes the generated file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::TestsConfig;
use crate::emit::{render_test_suite, GeneratedArtifact, Summary, TestFn, TestModule};
use crate::escape::escape_literal;
use crate::ident::{function_identifier, module_identifier, KeywordSet, Scope};
use crate::scan::{fixture_stem, scan_categories};
use crate::GenResult;

/// Generates a grouped test suite from a fixture tree.
#[derive(Debug, Clone)]
pub struct TestSuiteGenerator {
    fixture_root: PathBuf,
    extension: String,
    path_prefix: String,
    runner: String,
    module_keywords: KeywordSet,
    function_keywords: KeywordSet,
}

impl TestSuiteGenerator {
    /// Creates a generator with the default extension, runner and keyword
    /// sets. Runner paths are prefixed with `fixture_root` as given.
    pub fn new(fixture_root: impl Into<PathBuf>) -> Self {
        let fixture_root = fixture_root.into();
        let config = TestsConfig {
            fixture_root,
            path_prefix: None,
            ..TestsConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &TestsConfig) -> Self {
        Self {
            fixture_root: config.fixture_root.clone(),
            extension: config.extension.clone(),
            path_prefix: config.effective_prefix(),
            runner: config.runner.clone(),
            module_keywords: KeywordSet::new(
                config.module_keywords.iter().cloned(),
                config.keyword_suffix.clone(),
            ),
            function_keywords: KeywordSet::new(
                config.function_keywords.iter().cloned(),
                config.keyword_suffix.clone(),
            ),
        }
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = runner.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path handed to the runner for `category/file`.
    fn fixture_path(&self, category: &str, file: &str) -> String {
        let prefix = self.path_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", category, file)
        } else {
            format!("{}/{}/{}", prefix, category, file)
        }
    }

    /// Scans and renders without writing anything.
    pub fn build(&self) -> GenResult<GeneratedArtifact> {
        let scan = scan_categories(&self.fixture_root, &self.extension)?;
        let categories = scan.items;

        let mut module_scope = Scope::new("module");
        let mut modules = Vec::with_capacity(categories.len());
        let mut declarations = 0;

        for category in categories {
            let identifier =
                module_scope.claim(module_identifier(&category.raw_name, &self.module_keywords))?;

            let mut fn_scope = Scope::new(format!("`{}` test", category.raw_name));
            let mut functions = Vec::with_capacity(category.fixtures.len());
            for fixture in &category.fixtures {
                let Some(stem) = fixture_stem(&fixture.raw_name, &self.extension) else {
                    continue;
                };
                let fn_ident = fn_scope.claim(function_identifier(stem, &self.function_keywords))?;
                let path = self.fixture_path(&category.raw_name, &fixture.raw_name);
                debug!("{}::{} -> {}", identifier.identifier, fn_ident.identifier, path);
                functions.push(TestFn {
                    identifier: fn_ident,
                    path_literal: escape_literal(&path),
                });
            }

            declarations += functions.len();
            modules.push(TestModule {
                identifier,
                functions,
            });
        }

        let summary = Summary {
            modules: modules.len(),
            declarations,
            skipped: scan.skipped,
        };
        Ok(GeneratedArtifact::new(
            render_test_suite(&modules, &self.runner),
            summary,
        ))
    }

    /// Builds and writes to `output`.
    pub fn generate(&self, output: &Path) -> GenResult<Summary> {
        let artifact = self.build()?;
        artifact.write_to(output)?;
        let summary = artifact.summary();
        info!(
            "Wrote {} tests in {} modules to {} ({} skipped)",
            summary.declarations,
            summary.modules,
            output.display(),
            summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fixture_path() {
        let gen = TestSuiteGenerator::new("unused").path_prefix("./lox_test/");
        assert_eq!(
            gen.fixture_path("if", "else.lox"),
            "./lox_test/if/else.lox"
        );
        let gen = gen.path_prefix("");
        assert_eq!(gen.fixture_path("if", "else.lox"), "if/else.lox");
    }

    #[test]
    fn test_keywords_scoped_separately() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("if")).unwrap();
        fs::create_dir_all(dir.path().join("else")).unwrap();
        fs::write(dir.path().join("if/else.lox"), "").unwrap();
        fs::write(dir.path().join("else/while.lox"), "").unwrap();

        let artifact = TestSuiteGenerator::new(dir.path())
            .path_prefix("./lox_test")
            .build()
            .unwrap();
        let expected = "\
mod else {
    use super::test;
    #[test]
    fn while() {
        test(\"./lox_test/else/while.lox\");
    }
}
mod if_keyword {
    use super::test;
    #[test]
    fn else_keyword() {
        test(\"./lox_test/if/else.lox\");
    }
}
";
        assert_eq!(artifact.as_str(), expected);
    }

    #[test]
    fn test_custom_runner_and_extension() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("call")).unwrap();
        fs::write(dir.path().join("call/bool.fx"), "").unwrap();
        fs::write(dir.path().join("call/nil.lox"), "").unwrap();

        let artifact = TestSuiteGenerator::new(dir.path())
            .path_prefix("fx")
            .extension("fx")
            .runner("run_fixture")
            .build()
            .unwrap();
        assert_eq!(
            artifact.as_str(),
            "mod call {\n    use super::run_fixture;\n    #[test]\n    fn bool() {\n        run_fixture(\"fx/call/bool.fx\");\n    }\n}\n"
        );
        assert_eq!(artifact.summary(), Summary { modules: 1, declarations: 1, skipped: 1 });
    }

    #[test]
    fn test_module_collision_fails() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("for")).unwrap();
        fs::create_dir_all(dir.path().join("for_keyword")).unwrap();

        let err = TestSuiteGenerator::new(dir.path()).build().unwrap_err();
        assert!(matches!(err, GenError::Collision { ref identifier, .. } if identifier == "for_keyword"));
    }

    #[test]
    fn test_function_collision_within_category() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("c")).unwrap();
        fs::write(dir.path().join("c/if.lox"), "").unwrap();
        fs::write(dir.path().join("c/if_keyword.lox"), "").unwrap();

        let err = TestSuiteGenerator::new(dir.path()).build().unwrap_err();
        match err {
            GenError::Collision {
                scope,
                identifier,
                first,
                second,
            } => {
                assert_eq!(scope, "`c` test");
                assert_eq!(identifier, "if_keyword");
                assert_eq!(first, "if");
                assert_eq!(second, "if_keyword");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_same_fn_name_in_different_categories() {
        let dir = tempdir().unwrap();
        for category in ["closure", "function"] {
            fs::create_dir_all(dir.path().join(category)).unwrap();
            fs::write(dir.path().join(category).join("empty_body.lox"), "").unwrap();
        }

        let artifact = TestSuiteGenerator::new(dir.path()).build().unwrap();
        assert_eq!(artifact.summary(), Summary { modules: 2, declarations: 2, skipped: 0 });
    }
}

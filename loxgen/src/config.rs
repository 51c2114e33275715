//! Generator Configuration
//!
//! Defaults reproduce the harness layout: benchmark scripts in `./benches`,
//! fixtures in `./lox_test/<category>/<name>.lox`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ident::{FUNCTION_KEYWORDS, KEYWORD_SUFFIX, MODULE_KEYWORDS};
use crate::{GenError, GenResult};

/// Configuration for both generators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// String constants generator.
    pub constants: ConstantsConfig,

    /// Test suite generator.
    pub tests: TestsConfig,
}

/// Configuration for the string constants generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantsConfig {
    /// Directory whose files are embedded.
    pub source_dir: PathBuf,

    /// Generated file.
    pub output: PathBuf,

    /// File names in `source_dir` that are never embedded.
    pub exclude: Vec<String>,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./benches"),
            output: PathBuf::from("./src/bench.rs"),
            exclude: vec!["benches.rs".to_string()],
        }
    }
}

/// Configuration for the test suite generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestsConfig {
    /// Directory holding one subdirectory per category.
    pub fixture_root: PathBuf,

    /// Generated file.
    pub output: PathBuf,

    /// Extension that marks a fixture, with or without the leading dot.
    pub extension: String,

    /// Prefix of the path passed to the runner. Defaults to `fixture_root`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,

    /// Runner function each test calls, imported from the parent module.
    pub runner: String,

    /// Reserved words for category module names.
    pub module_keywords: Vec<String>,

    /// Reserved words for fixture function names.
    pub function_keywords: Vec<String>,

    /// Appended to a reserved name.
    pub keyword_suffix: String,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            fixture_root: PathBuf::from("./lox_test"),
            output: PathBuf::from("./others/test.rs"),
            extension: "lox".to_string(),
            path_prefix: None,
            runner: "test".to_string(),
            module_keywords: MODULE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            function_keywords: FUNCTION_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            keyword_suffix: KEYWORD_SUFFIX.to_string(),
        }
    }
}

impl TestsConfig {
    /// The prefix actually used for runner paths.
    pub fn effective_prefix(&self) -> String {
        self.path_prefix
            .clone()
            .unwrap_or_else(|| self.fixture_root.display().to_string())
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML configuration. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> GenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_toml(&content)
    }
}

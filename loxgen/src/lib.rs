//! Lox Source Generators
//!
//! Turns directories of raw fixture files into Rust source for the
//! interpreter's test and benchmark harness.
//!
//! # Pipelines
//!
//! - [`ConstantsGenerator`]: embeds every file of a directory as a
//!   `pub const NAME: &str = "...";` declaration.
//! - [`TestSuiteGenerator`]: walks a `category/fixture.lox` tree and emits
//!   one `mod` per category with one `#[test]` per fixture, each calling a
//!   shared runner with the fixture path.
//!
//! Both pipelines scan in sorted order, derive identifiers, reject
//! identifier collisions, and write their artifact in a single atomic step.
//!
//! # Example
//!
//! ```rust,ignore
//! use loxgen::{Config, TestSuiteGenerator};
//!
//! let config = Config::default();
//! let artifact = TestSuiteGenerator::from_config(&config.tests).build()?;
//! artifact.write_to(&config.tests.output)?;
//! ```

pub mod config;
pub mod constants;
pub mod emit;
pub mod escape;
pub mod ident;
pub mod scan;
pub mod suite;

pub use config::{Config, ConstantsConfig, TestsConfig};
pub use constants::ConstantsGenerator;
pub use emit::{GeneratedArtifact, Summary};
pub use escape::{escape_literal, unescape_literal};
pub use ident::{GeneratedIdentifier, KeywordSet};
pub use suite::TestSuiteGenerator;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating sources.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Source directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Not valid UTF-8: {}", .path.display())]
    NonUtf8 { path: PathBuf },

    #[error("Identifier `{identifier}` in {scope} scope is derived from both `{first}` and `{second}`")]
    Collision {
        scope: String,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

//! Identifier Derivation
//!
//! Maps filesystem names to Rust identifiers and keeps each emission scope
//! free of duplicates.
//!
//! Module names and test function names are checked against two separate
//! keyword sets, so a category called `else` is left alone while a
//! fixture called `else.lox` is suffixed.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{GenError, GenResult};

/// Suffix appended to a name that collides with a reserved word.
pub const KEYWORD_SUFFIX: &str = "_keyword";

/// Reserved words checked against category (module) names.
pub const MODULE_KEYWORDS: &[&str] = &["while", "for", "return", "super", "if"];

/// Reserved words checked against fixture (test function) names.
pub const FUNCTION_KEYWORDS: &[&str] = &["if", "else"];

/// A filesystem name paired with the identifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdentifier {
    pub source_name: String,
    pub identifier: String,
}

impl GeneratedIdentifier {
    pub fn new(source_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            identifier: identifier.into(),
        }
    }
}

/// A set of reserved words and the suffix used to step around them.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    words: FxHashSet<String>,
    suffix: String,
}

impl KeywordSet {
    /// Creates a keyword set from arbitrary words.
    pub fn new<I, S>(words: I, suffix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            suffix: suffix.into(),
        }
    }

    /// The default set for category module names.
    pub fn modules() -> Self {
        Self::new(MODULE_KEYWORDS.iter().copied(), KEYWORD_SUFFIX)
    }

    /// The default set for fixture function names.
    pub fn functions() -> Self {
        Self::new(FUNCTION_KEYWORDS.iter().copied(), KEYWORD_SUFFIX)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(name)
    }

    /// Returns `name`, suffixed if it is reserved.
    pub fn apply(&self, name: &str) -> String {
        if self.contains(name) {
            format!("{}{}", name, self.suffix)
        } else {
            name.to_string()
        }
    }
}

/// `foo.lox` -> `FOO_LOX`.
///
/// No other sanitization is done; names with characters outside
/// `[A-Za-z0-9_.]` produce identifiers the compiler will reject.
pub fn constant_identifier(file_name: &str) -> GeneratedIdentifier {
    GeneratedIdentifier::new(file_name, file_name.replace('.', "_").to_uppercase())
}

/// Category directory name, used verbatim unless reserved.
pub fn module_identifier(category: &str, keywords: &KeywordSet) -> GeneratedIdentifier {
    GeneratedIdentifier::new(category, keywords.apply(category))
}

/// Fixture file stem, used verbatim unless reserved.
pub fn function_identifier(stem: &str, keywords: &KeywordSet) -> GeneratedIdentifier {
    GeneratedIdentifier::new(stem, keywords.apply(stem))
}

/// One emission scope. Rejects a second source name that derives an
/// identifier already claimed.
#[derive(Debug)]
pub struct Scope {
    label: String,
    claimed: FxHashMap<String, String>,
}

impl Scope {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            claimed: FxHashMap::default(),
        }
    }

    pub fn claim(&mut self, ident: GeneratedIdentifier) -> GenResult<GeneratedIdentifier> {
        if let Some(first) = self.claimed.get(&ident.identifier) {
            return Err(GenError::Collision {
                scope: self.label.clone(),
                identifier: ident.identifier,
                first: first.clone(),
                second: ident.source_name,
            });
        }
        self.claimed
            .insert(ident.identifier.clone(), ident.source_name.clone());
        Ok(ident)
    }
}

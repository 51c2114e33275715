//! Directory Scanning
//!
//! Lists the entries the generators consume. Entries are sorted by file
//! name so that repeated runs over the same tree emit identical output.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::{GenError, GenResult};

/// Kind of a scanned entry. Anything that is not a directory (symlinks to
/// files, sockets, ...) counts as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry directly under a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// File name without any leading path
    pub raw_name: String,
    /// Full path of the entry
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// A category directory and the fixtures found directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCategory {
    pub raw_name: String,
    pub path: PathBuf,
    pub fixtures: Vec<SourceEntry>,
}

/// Entries kept by a scan and the number passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

/// Lists the immediate children of `dir`, sorted by name.
pub fn list_dir(dir: &Path) -> GenResult<Vec<SourceEntry>> {
    if !dir.is_dir() {
        return Err(GenError::RootNotFound(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        let raw_name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| GenError::NonUtf8 {
                path: entry.path().to_path_buf(),
            })?
            .to_string();
        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(SourceEntry {
            raw_name,
            path: entry.into_path(),
            kind,
        });
    }

    Ok(entries)
}

/// Files directly under `root`, minus any whose name is in `exclude`.
/// Subdirectories are not descended into.
pub fn scan_files(root: &Path, exclude: &[String]) -> GenResult<Scan<SourceEntry>> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in list_dir(root)? {
        if entry.kind == EntryKind::Directory {
            debug!("Skipping directory: {}", entry.path.display());
            skipped += 1;
            continue;
        }
        if exclude.iter().any(|name| *name == entry.raw_name) {
            debug!("Excluded: {}", entry.path.display());
            skipped += 1;
            continue;
        }
        files.push(entry);
    }
    Ok(Scan {
        items: files,
        skipped,
    })
}

/// Returns the part of `name` before `.{extension}`, if it has that
/// extension and a non-empty stem.
pub fn fixture_stem<'a>(name: &'a str, extension: &str) -> Option<&'a str> {
    let extension = extension.trim_start_matches('.');
    name.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// Category directories under `root`, each with the fixtures carrying
/// `extension`. Empty categories are kept.
pub fn scan_categories(root: &Path, extension: &str) -> GenResult<Scan<FixtureCategory>> {
    let mut categories = Vec::new();
    let mut skipped = 0;

    for entry in list_dir(root)? {
        if entry.kind != EntryKind::Directory {
            debug!("Skipping non-directory at fixture root: {}", entry.path.display());
            skipped += 1;
            continue;
        }

        let mut fixtures = Vec::new();
        for fixture in list_dir(&entry.path)? {
            if fixture.kind == EntryKind::File
                && fixture_stem(&fixture.raw_name, extension).is_some()
            {
                fixtures.push(fixture);
            } else {
                debug!("Skipping: {}", fixture.path.display());
                skipped += 1;
            }
        }

        categories.push(FixtureCategory {
            raw_name: entry.raw_name,
            path: entry.path,
            fixtures,
        });
    }

    Ok(Scan {
        items: categories,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fixture_stem() {
        assert_eq!(fixture_stem("closure.lox", "lox"), Some("closure"));
        assert_eq!(fixture_stem("closure.lox", ".lox"), Some("closure"));
        assert_eq!(fixture_stem("a.lox.lox", "lox"), Some("a.lox"));
        assert_eq!(fixture_stem("closurelox", "lox"), None);
        assert_eq!(fixture_stem(".lox", "lox"), None);
        assert_eq!(fixture_stem("notes.txt", "lox"), None);
    }

    #[test]
    fn test_scan_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("zoo.lox"), "").unwrap();
        fs::write(dir.path().join("alpha.lox"), "").unwrap();
        fs::write(dir.path().join("benches.rs"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner.lox"), "").unwrap();

        let scan = scan_files(dir.path(), &["benches.rs".to_string()]).unwrap();
        assert_eq!(scan.skipped, 2);
        let files = scan.items;
        let names: Vec<_> = files.iter().map(|f| f.raw_name.as_str()).collect();
        assert_eq!(names, ["alpha.lox", "zoo.lox"]);
        assert!(files.iter().all(|f| f.kind == EntryKind::File));
    }

    #[test]
    fn test_scan_categories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("while")).unwrap();
        fs::create_dir_all(root.join("assignment/deeper")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("while/syntax.lox"), "").unwrap();
        fs::write(root.join("assignment/global.lox"), "").unwrap();
        fs::write(root.join("assignment/README.md"), "").unwrap();
        fs::write(root.join("assignment/deeper/hidden.lox"), "").unwrap();
        fs::write(root.join("stray.lox"), "").unwrap();

        let scan = scan_categories(root, "lox").unwrap();
        // stray.lox, README.md and the nested directory
        assert_eq!(scan.skipped, 3);
        let categories = scan.items;
        let names: Vec<_> = categories.iter().map(|c| c.raw_name.as_str()).collect();
        assert_eq!(names, ["assignment", "empty", "while"]);

        let assignment: Vec<_> = categories[0]
            .fixtures
            .iter()
            .map(|f| f.raw_name.as_str())
            .collect();
        assert_eq!(assignment, ["global.lox"]);
        assert!(categories[1].fixtures.is_empty());
        assert_eq!(categories[2].fixtures.len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_files(&missing, &[]),
            Err(GenError::RootNotFound(_))
        ));
        assert!(matches!(
            scan_categories(&missing, "lox"),
            Err(GenError::RootNotFound(_))
        ));
    }
}

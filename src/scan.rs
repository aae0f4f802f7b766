//! Directory scanning: turns a path on disk into an [`Item`] tree.

use crate::error::{Error, Result};
use crate::{FileClass, Item};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Rust items that pull in another file of the same crate.
const REFERENCE_PATTERN: &str = concat!(
    r"(?:use crate::([^;]*?)(?:::\*)?(?:::\{[^;]*\})?;)",
    r"|(?:use super::([^;]*?)(?:::\*)?(?:::\{[^;]*\})?;)",
    r"|(?:include_str!\(([^)]*)\))",
    r"|(?:mod ([^;{}\s]*);)",
);

/// Walks directory trees, skipping ignored directory names.
pub struct Scanner {
    ignore: Vec<String>,
    references: Regex,
}

impl Scanner {
    pub fn new(ignore: &[String]) -> Result<Self> {
        Ok(Self {
            ignore: ignore.to_vec(),
            references: Regex::new(REFERENCE_PATTERN)?,
        })
    }

    /// Scans `root` and everything below it.
    ///
    /// Returns `Ok(None)` when the root itself is ignored or is neither a
    /// file nor a directory.
    pub fn scan(&self, root: &Path) -> Result<Option<Item>> {
        let root = fs::canonicalize(root).map_err(|_| Error::MissingRoot(root.to_path_buf()))?;
        Ok(self.scan_entry(&root, ""))
    }

    /// `relative` is the entry's path below the scan root, empty for the root.
    ///
    /// Symbolic links are not followed, so a link back to an ancestor cannot
    /// make the walk revisit a subtree.
    fn scan_entry(&self, path: &Path, relative: &str) -> Option<Item> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                log::warn!("Skipping {}: {err}", path.display());
                return None;
            }
        };
        let file_type = meta.file_type();

        if file_type.is_dir() {
            if self.ignore.contains(&name) {
                log::debug!("Ignoring {}", path.display());
                return None;
            }
            let mut entries: Vec<_> = match fs::read_dir(path) {
                Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
                Err(err) => {
                    log::warn!("Skipping contents of {}: {err}", path.display());
                    Vec::new()
                }
            };
            entries.sort_by_key(|entry| entry.file_name());

            let items = entries
                .iter()
                .filter_map(|entry| {
                    let child = entry.file_name().to_string_lossy().into_owned();
                    let child_relative = if relative.is_empty() {
                        child
                    } else {
                        format!("{relative}/{child}")
                    };
                    self.scan_entry(&entry.path(), &child_relative)
                })
                .collect();
            Some(Item::Folder { name, items })
        } else if file_type.is_file() {
            let class = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(FileClass::Unknown, FileClass::from_extension);
            let full_name = if relative.is_empty() {
                name.clone()
            } else {
                relative.to_string()
            };
            Some(Item::File {
                refs: self.find_refs(path),
                full_name,
                size: meta.len().max(1),
                class,
                name,
            })
        } else {
            log::debug!("Skipping {}: not a regular file or directory", path.display());
            None
        }
    }

    /// Files referenced by a Rust source.
    fn find_refs(&self, path: &Path) -> Vec<String> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            return Vec::new();
        }
        match fs::read_to_string(path) {
            Ok(source) => extract_refs(&self.references, &source),
            Err(err) => {
                log::warn!("Cannot read {} for references: {err}", path.display());
                Vec::new()
            }
        }
    }
}

fn extract_refs(pattern: &Regex, source: &str) -> Vec<String> {
    pattern
        .captures_iter(source)
        .filter_map(|caps| {
            if let Some(path) = caps.get(1).or_else(|| caps.get(2)) {
                Some(path.as_str().replace("::", "/") + ".rs")
            } else if let Some(file) = caps.get(3) {
                Some(file.as_str().replace('"', ""))
            } else {
                caps.get(4).map(|module| module.as_str().to_string() + ".rs")
            }
        })
        .collect()
}

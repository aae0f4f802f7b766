//! Draws a directory tree as nested circles in an interactive SVG map.
//!
//! The pipeline is [`scan::Scanner`] → [`layout::LayoutNode`] →
//! [`render::render_document`], with [`viewer`] describing how the generated
//! page reacts to clicks and buttons.

use serde::{Deserialize, Serialize};

pub mod assets;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod scan;
pub mod viewer;

pub use config::MapConfig;
pub use error::{Error, Result};

/// Broad category of a file, decided from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileClass {
    /// Source code (`rs`, `py`, `ts`, ...)
    Code,
    /// Tabular or sequence data (`csv`, `fasta`, ...)
    Data,
    /// Manifests and lock files (`toml`, `yaml`, `lock`)
    Configuration,
    /// Anything else
    Unknown,
}

impl FileClass {
    /// Classifies a file extension (without the leading dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "rs" | "cs" | "js" | "ts" | "r" | "cpp" | "py" => Self::Code,
            "csv" | "tsv" | "xlsx" | "xls" | "fasta" => Self::Data,
            "yaml" | "toml" | "lock" => Self::Configuration,
            _ => Self::Unknown,
        }
    }

    /// Fill colour used for files of this class.
    pub fn colour(self) -> &'static str {
        match self {
            Self::Code => "rgb(197, 134, 161)",
            Self::Data => "rgb(78, 201, 176)",
            Self::Configuration => "rgb(220, 208, 143)",
            Self::Unknown => "rgb(86, 154, 214)",
        }
    }
}

/// A node of a scanned directory tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Item {
    File {
        /// File name including extension
        name: String,
        /// Path relative to the scan root, `/` separated
        full_name: String,
        /// Size in bytes (empty files count as one byte)
        size: u64,
        class: FileClass,
        /// Other files this one pulls in (`mod`, `use crate::`, `include_str!`)
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        refs: Vec<String>,
    },
    Folder {
        name: String,
        items: Vec<Item>,
    },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::File { name, .. } | Item::Folder { name, .. } => name,
        }
    }

    /// Number of files below this item (a file counts itself).
    pub fn files(&self) -> usize {
        match self {
            Item::File { .. } => 1,
            Item::Folder { items, .. } => items.iter().map(Item::files).sum(),
        }
    }

    /// Base-2 logarithm of the item's visual weight.
    ///
    /// A file weighs its size. A folder with `n` children whose weights sum to
    /// `s` weighs `25^(1.1 n) * s * s / n`, which grows fast enough that the
    /// plain value overflows `f64` for wide folders.
    pub fn log_weight(&self) -> f64 {
        match self {
            Item::File { size, .. } => ((*size).max(1) as f64).log2(),
            Item::Folder { items, .. } => {
                if items.is_empty() {
                    return 0.0;
                }
                let len = items.len() as f64;
                let log_sum = log2_sum(items.iter().map(Item::log_weight));
                len * 1.10 * 25.0_f64.log2() + 2.0 * log_sum - len.log2()
            }
        }
    }

    /// Fill colour for files, outline colour for folders.
    pub fn colour(&self) -> &'static str {
        match self {
            Item::File { class, .. } => class.colour(),
            Item::Folder { .. } => "rgb(126, 126, 126)",
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Item::Folder { .. })
    }
}

/// `log2(Σ 2^x)` without leaving log space.
fn log2_sum(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp2()).sum::<f64>().log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> Item {
        Item::File {
            name: name.to_string(),
            full_name: name.to_string(),
            size,
            class: FileClass::Unknown,
            refs: Vec::new(),
        }
    }

    #[test]
    fn classifies_extensions() {
        assert_eq!(FileClass::from_extension("rs"), FileClass::Code);
        assert_eq!(FileClass::from_extension("fasta"), FileClass::Data);
        assert_eq!(FileClass::from_extension("lock"), FileClass::Configuration);
        assert_eq!(FileClass::from_extension("png"), FileClass::Unknown);
    }

    #[test]
    fn folder_weight_matches_closed_form() {
        let folder = Item::Folder {
            name: "src".into(),
            items: vec![file("a", 16), file("b", 16)],
        };
        // 25^(2.2) * 32 * 16
        let expected = (25.0_f64.powf(2.2) * 32.0 * 16.0).log2();
        assert!((folder.log_weight() - expected).abs() < 1e-9);
    }

    #[test]
    fn wide_folders_stay_finite() {
        let folder = Item::Folder {
            name: "wide".into(),
            items: (0..500).map(|i| file(&format!("f{i}"), 1024)).collect(),
        };
        assert!(folder.log_weight().is_finite());
        assert_eq!(folder.files(), 500);
    }

    #[test]
    fn empty_folder_weighs_one() {
        let folder = Item::Folder {
            name: "empty".into(),
            items: Vec::new(),
        };
        assert_eq!(folder.log_weight(), 0.0);
    }
}

//! Map settings, read from a RON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "repo-map";
const CONFIG_FILE: &str = "config.ron";

/// Tunables for scanning, layout and rendering.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Directory names skipped while scanning
    pub ignore: Vec<String>,
    /// Width and height of the drawing, in SVG units
    pub canvas_size: f64,
    /// Extra room around the canvas in the view box
    pub margin: f64,
    /// Minimum gap between sibling circles
    pub spacing: f64,
    /// Relaxation steps per folder and pass
    pub layout_iterations: usize,
    /// Number of relax + shrink passes
    pub layout_passes: usize,
    /// Seed for the layout's random visiting order; random when absent
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            ignore: vec![".git".into(), "target".into(), ".vscode".into()],
            canvas_size: 1024.0,
            margin: 20.0,
            spacing: 5.0,
            layout_iterations: 100,
            layout_passes: 2,
            seed: None,
        }
    }
}

impl MapConfig {
    /// Parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/repo-map/config.ron`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the explicit path if given, else the default file when it
    /// exists, else the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::info!("Using config {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(seed: Some(7), ignore: [\"node_modules\"])").unwrap();

        let config = MapConfig::load(&path).expect("config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ignore, vec!["node_modules".to_string()]);
        assert_eq!(config.canvas_size, 1024.0);
        assert_eq!(config.layout_passes, 2);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(seed: ").unwrap();

        let err = MapConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = MapConfig::resolve(Some(&dir.path().join("nope.ron")));
        assert!(matches!(result, Err(Error::Read { .. })));
    }
}

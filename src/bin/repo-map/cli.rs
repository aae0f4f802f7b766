//! Command line arguments.

use clap::Parser;
use repo_map::MapConfig;
use std::path::PathBuf;

/// Draw a directory tree as an interactive SVG map.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory to map
    pub root: PathBuf,

    /// Where to write the map
    #[arg(short, long, default_value = "map.svg")]
    pub output: PathBuf,

    /// RON config file (defaults to <config dir>/repo-map/config.ron)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra directory name to skip; repeatable
    #[arg(short, long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Seed for a reproducible layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with file names visible
    #[arg(long)]
    pub show_file_text: bool,

    /// Start with reference lines visible
    #[arg(long)]
    pub show_references: bool,

    /// Open the map zoomed on this folder (path below ROOT)
    #[arg(long, value_name = "PATH")]
    pub focus: Option<String>,

    /// Also write a PNG preview
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Write the scanned tree as JSON
    #[arg(long, value_name = "FILE")]
    pub dump_structure: Option<PathBuf>,

    /// Open the map in the default viewer when done
    #[arg(long)]
    pub open: bool,
}

impl Args {
    /// Applies command line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut MapConfig) {
        for name in &self.ignore {
            if !config.ignore.contains(name) {
                config.ignore.push(name.clone());
            }
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }

    /// `--focus` as a page label: no leading/trailing slashes, `.` for the root.
    pub fn focus_label(&self) -> Option<String> {
        let focus = self.focus.as_deref()?;
        let trimmed = focus.trim_matches('/');
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        Some(if trimmed == "." { String::new() } else { trimmed.to_string() })
    }
}

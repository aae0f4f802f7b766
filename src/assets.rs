//! Stylesheet and page script embedded into every generated map.

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Embeds the files under `assets/` into the binary.
/// In debug mode they are read from the filesystem instead.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

pub const STYLESHEET: &str = "style.css";
pub const VIEWER_SCRIPT: &str = "viewer.js";

/// Loads an embedded text asset.
pub fn load_text(name: &str) -> Result<Cow<'static, str>> {
    let file = Assets::get(name).ok_or_else(|| Error::AssetNotFound(name.to_string()))?;
    Ok(match file.data {
        Cow::Borrowed(bytes) => Cow::Borrowed(std::str::from_utf8(bytes)?),
        Cow::Owned(bytes) => Cow::Owned(std::str::from_utf8(&bytes)?.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_defines_page_entry_points() {
        let script = load_text(VIEWER_SCRIPT).unwrap();
        for entry in [
            "function load(",
            "function toggle_file_text_button(",
            "function toggle_references_button(",
            "function reset_view_button(",
        ] {
            assert!(script.contains(entry), "missing {entry}");
        }
    }

    #[test]
    fn unknown_asset_is_an_error() {
        assert!(matches!(
            load_text("missing.css"),
            Err(Error::AssetNotFound(name)) if name == "missing.css"
        ));
    }
}

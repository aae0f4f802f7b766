//! End to end: scan a directory on disk and write its map.

use repo_map::layout::LayoutNode;
use repo_map::render::{build_page, render_document, write_svg};
use repo_map::scan::Scanner;
use repo_map::viewer::{ViewController, ViewState};
use repo_map::MapConfig;
use std::fs;
use tempfile::tempdir;

fn write(root: &std::path::Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn scanned_project_renders_to_an_interactive_map() {
    let dir = tempdir().expect("failed to create temp dir");
    let root = dir.path().join("demo");
    write(&root, "Cargo.toml", "[package]\nname = \"demo\"\n");
    write(&root, "src/main.rs", "mod render;\nmod scan;\nfn main() {}\n");
    write(&root, "src/render.rs", "use crate::scan;\n");
    write(&root, "src/scan.rs", "");
    write(&root, "data/points.csv", "x,y\n1,2\n");
    write(&root, "target/debug/demo", "binary");

    let config = MapConfig {
        seed: Some(9),
        ..MapConfig::default()
    };
    let tree = Scanner::new(&config.ignore)
        .unwrap()
        .scan(&root)
        .unwrap()
        .expect("demo is a folder");
    assert_eq!(tree.files(), 5);

    let layout = LayoutNode::build(&tree, &config);
    let mut page = build_page(&layout, &config);
    let mut controller = ViewController::new(ViewState::default());
    assert_eq!(controller.load(&mut page), 3, "demo, src and data are folders");

    controller.toggle_file_text();
    let src = page.find_by_label("src").unwrap();
    page.dispatch_click(src, &mut controller);

    let document = render_document(&layout, controller.surface(), &config).unwrap();
    let output = dir.path().join("map.svg");
    write_svg(&document, &output).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("function folder_click("));
    assert!(svg.contains("--file-text-opacity: 1"));
    assert_eq!(svg.matches("class=\"ref\"").count(), 3);
    assert!(!svg.contains("debug"), "ignored directories are not drawn");
}

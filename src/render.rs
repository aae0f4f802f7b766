//! SVG output: the map document, its page model, and a PNG preview.

use crate::assets::{self, STYLESHEET, VIEWER_SCRIPT};
use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::layout::LayoutNode;
use crate::Item;
use crate::viewer::{ElementId, FOLDER_CLASS, FolderAttributes, Page, VIEW_ROOT_ID, ViewState};
use std::path::Path;
use svg::node::element::{Circle, Group, Line, Rectangle, Script, Style, Text};
use svg::Document;

const FILE_CLASS: &str = "file";
const REFERENCE_CLASS: &str = "ref";

/// Controls drawn in the top-left corner: label, element id, page callback.
const BUTTONS: [(&str, &str, &str); 3] = [
    ("Toggle file text", "toggle-file-text-button", "toggle_file_text_button()"),
    ("Reset view", "reset-view-button", "reset_view_button()"),
    ("Toggle ref lines", "toggle-references-button", "toggle_references_button()"),
];

/// Builds the interactive map for a laid out tree, starting in `state`.
pub fn render_document(
    layout: &LayoutNode,
    state: &ViewState,
    config: &MapConfig,
) -> Result<Document> {
    let margin = config.margin;
    let size = config.canvas_size;

    let (tree, lines) = plot_node(layout, layout, size);
    let mut view_root = Group::new().set("id", VIEW_ROOT_ID).add(tree).add(lines);
    if let Some(style) = state.view_root_style() {
        view_root = view_root.set("style", style);
    }

    let mut document = Document::new()
        .set("viewBox", (-margin, -margin, size + 2.0 * margin, size + 2.0 * margin))
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .set("style", state.root_style())
        .set("onload", "load()")
        .add(Style::new(assets::load_text(STYLESHEET)?.into_owned()))
        .add(
            Script::new(assets::load_text(VIEWER_SCRIPT)?.into_owned())
                .set("type", "text/javascript"),
        )
        .add(view_root);

    for (index, (label, id, callback)) in BUTTONS.iter().enumerate() {
        let pos = Point(10.0, 10.0 + 40.0 * index as f64);
        document = document.add(make_button(label, id, pos, callback));
    }
    Ok(document)
}

/// Page model mirroring the rendered groups, for driving a
/// [`ViewController`](crate::viewer::ViewController) outside a browser.
pub fn build_page(layout: &LayoutNode, config: &MapConfig) -> Page {
    let mut page = Page::new();
    let view_root = page.push(None, &[], None, FolderAttributes::default());
    push_node(&mut page, view_root, layout, "", config.canvas_size);
    page
}

fn push_node(
    page: &mut Page,
    parent: ElementId,
    node: &LayoutNode,
    label: &str,
    canvas_size: f64,
) {
    if !node.is_folder() {
        page.push(
            Some(parent),
            &[FILE_CLASS],
            Some(label),
            FolderAttributes::default(),
        );
        return;
    }
    let id = page.push(
        Some(parent),
        &[FOLDER_CLASS],
        Some(label),
        node.entity.zoom_target(canvas_size),
    );
    for child in &node.children {
        let name = child.item.name();
        let child_label = if label.is_empty() {
            name.to_string()
        } else {
            format!("{label}/{name}")
        };
        push_node(page, id, child, &child_label, canvas_size);
    }
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Rasterises the document at its view box size.
///
/// Stylesheet variables are not resolved, so the preview always shows the
/// default overlay state.
pub fn write_png(document: &Document, path: &Path) -> Result<()> {
    use resvg::{tiny_skia, usvg};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&document.to_string(), &options)
        .map_err(|err| Error::Rasterise(err.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Rasterise(format!("invalid image size {size:?}")))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .save_png(path)
        .map_err(|err| Error::Rasterise(format!("{}: {err}", path.display())))
}

/// Draws a node, returning its group and the reference lines below it.
/// Lines are kept out of the node's group so they paint above siblings.
fn plot_node(node: &LayoutNode, root: &LayoutNode, canvas_size: f64) -> (Group, Group) {
    let entity = node.entity;
    match node.item {
        Item::File { name, refs, .. } => {
            let circle = Circle::new()
                .set("cx", entity.pos.0)
                .set("cy", entity.pos.1)
                .set("r", entity.radius)
                .set("fill", node.item.colour());
            let text = label(entity.pos, name);

            let mut lines = Group::new();
            for reference in refs {
                let Some(Point(x, y)) = root.find_ref(reference) else {
                    log::debug!("Unresolved reference {reference} from {name}");
                    continue;
                };
                lines = lines.add(
                    Line::new()
                        .set("x1", entity.pos.0)
                        .set("y1", entity.pos.1)
                        .set("x2", x)
                        .set("y2", y)
                        .set("class", REFERENCE_CLASS),
                );
            }
            let group = Group::new().add(circle).add(text).set("class", FILE_CLASS);
            (group, lines)
        }
        Item::Folder { name, .. } => {
            let circle = Circle::new()
                .set("cx", entity.pos.0)
                .set("cy", entity.pos.1)
                .set("r", entity.radius)
                .set("stroke", node.item.colour());
            let text = label(Point(entity.pos.0, entity.pos.1 - entity.radius), name);

            let target = entity.zoom_target(canvas_size);
            let mut group = Group::new().add(circle).add(text).set("class", FOLDER_CLASS);
            if let Some(transform) = target.transform {
                group = group.set("data-transform", transform);
            }
            if let Some(scale) = target.text_scale {
                group = group.set("data-text-scale", scale.to_string());
            }

            let mut lines = Group::new();
            for child in &node.children {
                let (child_group, child_lines) = plot_node(child, root, canvas_size);
                group = group.add(child_group);
                lines = lines.add(child_lines);
            }
            (group, lines)
        }
    }
}

fn label(pos: Point, content: &str) -> Text {
    Text::new()
        .set("x", pos.0)
        .set("y", pos.1)
        .add(svg::node::Text::new(escape_text(content)))
}

fn make_button(text: &str, id: &str, pos: Point, callback: &str) -> Group {
    Group::new()
        .add(
            Rectangle::new()
                .set("x", pos.0)
                .set("y", pos.1)
                .set("width", 120)
                .set("height", 30),
        )
        .add(
            Text::new()
                .set("x", pos.0 + 5.0)
                .set("y", pos.1 + 20.0)
                .add(svg::node::Text::new(text)),
        )
        .set("class", "btn")
        .set("id", id)
        .set("onclick", callback)
}

/// File names end up as XML character data.
fn escape_text(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::ViewController;
    use crate::FileClass;

    fn sample_tree() -> Item {
        Item::Folder {
            name: "project".into(),
            items: vec![Item::Folder {
                name: "src".into(),
                items: vec![
                    Item::File {
                        name: "main.rs".into(),
                        full_name: "src/main.rs".into(),
                        size: 2000,
                        class: FileClass::Code,
                        refs: vec!["a&b.rs".into()],
                    },
                    Item::File {
                        name: "a&b.rs".into(),
                        full_name: "src/a&b.rs".into(),
                        size: 500,
                        class: FileClass::Code,
                        refs: Vec::new(),
                    },
                ],
            }],
        }
    }

    fn config() -> MapConfig {
        MapConfig {
            seed: Some(1),
            ..MapConfig::default()
        }
    }

    #[test]
    fn document_carries_page_hooks() {
        let tree = sample_tree();
        let config = config();
        let layout = LayoutNode::build(&tree, &config);
        let svg = render_document(&layout, &ViewState::default(), &config)
            .unwrap()
            .to_string();

        assert!(svg.contains(r#"id="view-root""#));
        assert!(svg.contains(r#"onload="load()""#));
        assert_eq!(svg.matches(r#"class="folder""#).count(), 2);
        assert_eq!(svg.matches("data-transform=").count(), 2);
        assert_eq!(svg.matches(r#"class="ref""#).count(), 1);
        assert!(svg.contains("a&amp;b.rs"));
        assert!(svg.contains("--file-text-opacity: 0"));
        for (_, _, callback) in BUTTONS {
            assert!(svg.contains(callback));
        }
    }

    #[test]
    fn initial_state_is_baked_into_styles() {
        let tree = sample_tree();
        let config = config();
        let layout = LayoutNode::build(&tree, &config);

        let mut controller = ViewController::new(ViewState::default());
        controller.toggle_references();
        controller.on_folder_click(&FolderAttributes {
            transform: Some("scale(2)".into()),
            text_scale: Some(0.5),
        });
        let svg = render_document(&layout, controller.surface(), &config)
            .unwrap()
            .to_string();

        assert!(svg.contains("--reference-opacity: 1"));
        assert!(svg.contains("--text-scaling: 0.5"));
        assert!(svg.contains("transform: scale(2)"));
    }

    #[test]
    fn page_mirrors_folders() {
        let tree = sample_tree();
        let config = config();
        let layout = LayoutNode::build(&tree, &config);
        let mut page = build_page(&layout, &config);

        assert_eq!(page.len(), 5);
        let controller = ViewController::new(ViewState::default());
        assert_eq!(controller.load(&mut page), 2);

        let src = page.find_by_label("src").expect("src folder on page");
        let element = page.element(src).unwrap();
        let expected = layout.descend("src").unwrap().entity.zoom_target(1024.0);
        assert_eq!(element.attributes, expected);
        assert!(page.find_by_label("src/main.rs").is_some());
    }

    #[test]
    fn focusing_a_file_zooms_to_its_folder() {
        let tree = sample_tree();
        let config = config();
        let layout = LayoutNode::build(&tree, &config);
        let mut page = build_page(&layout, &config);
        let mut controller = ViewController::new(ViewState::default());
        controller.load(&mut page);

        let file = page.find_by_label("src/main.rs").unwrap();
        page.dispatch_click(file, &mut controller);

        let expected = layout.descend("src").unwrap().entity.zoom_target(1024.0);
        assert_eq!(controller.surface().transform, expected.transform);
        assert_eq!(controller.surface().text_scale, expected.text_scale);
    }

    #[test]
    fn entry_named_like_the_view_root_is_focusable() {
        let tree = Item::Folder {
            name: "project".into(),
            items: vec![Item::Folder {
                name: "#view-root".into(),
                items: vec![Item::File {
                    name: "lib.rs".into(),
                    full_name: "#view-root/lib.rs".into(),
                    size: 100,
                    class: FileClass::Code,
                    refs: Vec::new(),
                }],
            }],
        };
        let config = config();
        let layout = LayoutNode::build(&tree, &config);
        let mut page = build_page(&layout, &config);
        let mut controller = ViewController::new(ViewState::default());
        controller.load(&mut page);

        let folder = page.find_by_label("#view-root").expect("folder on page");
        assert_eq!(page.element(folder).unwrap().classes, vec![FOLDER_CLASS]);
        assert_eq!(page.dispatch_click(folder, &mut controller), 1);

        let expected = layout.descend("#view-root").unwrap().entity.zoom_target(1024.0);
        assert_eq!(controller.surface().transform, expected.transform);
    }
}

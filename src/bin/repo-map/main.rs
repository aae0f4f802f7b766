mod cli;

use clap::Parser;
use cli::Args;
use color_eyre::eyre::{WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use repo_map::layout::LayoutNode;
use repo_map::render::{build_page, render_document, write_png, write_svg};
use repo_map::scan::Scanner;
use repo_map::viewer::{ViewController, ViewState};
use repo_map::{Error, Item, MapConfig};
use std::fs;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Initial view: overlay flags from the command line, then an optional
/// click on the focused folder.
fn initial_view(
    args: &Args,
    layout: &LayoutNode,
    config: &MapConfig,
) -> color_eyre::Result<ViewState> {
    let mut controller = ViewController::new(ViewState::default());
    if args.show_file_text {
        controller.toggle_file_text();
    }
    if args.show_references {
        controller.toggle_references();
    }

    if let Some(label) = args.focus_label() {
        let mut page = build_page(layout, config);
        controller.load(&mut page);
        let target = page
            .find_by_label(&label)
            .ok_or_else(|| eyre!("--focus: no file or folder named '{label}' in the map"))?;
        page.dispatch_click(target, &mut controller);
        log::info!("Focused on '{label}'");
    }

    Ok(controller.into_surface())
}

fn main() -> color_eyre::Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let args = Args::parse();
    let mut config = MapConfig::resolve(args.config.as_deref())?;
    args.apply(&mut config);
    log::debug!("Config: {config:?}");

    let progress = spinner(&format!("Scanning {}", args.root.display()));
    let scanner = Scanner::new(&config.ignore)?;
    let tree: Item = scanner
        .scan(&args.root)?
        .ok_or_else(|| Error::EmptyTree(args.root.clone()))?;
    log::info!("Scanned {} files under {}", tree.files(), args.root.display());

    if let Some(path) = &args.dump_structure {
        let json = serde_json::to_string_pretty(&tree)?;
        fs::write(path, json).wrap_err_with(|| format!("writing {}", path.display()))?;
        log::info!("Wrote structure to {}", path.display());
    }

    progress.set_message("Laying out");
    let layout = LayoutNode::build(&tree, &config);
    progress.finish_and_clear();

    let state = initial_view(&args, &layout, &config)?;
    let document = render_document(&layout, &state, &config)?;
    write_svg(&document, &args.output)?;
    println!("Wrote map to {}", args.output.display());

    if let Some(path) = &args.png {
        write_png(&document, path)?;
        println!("Wrote preview to {}", path.display());
    }

    if args.open {
        open::that(&args.output).wrap_err("opening the map")?;
    }

    Ok(())
}

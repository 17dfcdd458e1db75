use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::Level;

mod concat;
mod config;
mod publish;
mod readme;
mod render;
mod tree;
mod types;
mod walker;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("mdbinder")
        .version("0.3.0")
        .about("mdbinder: builds a summary tree for a directory of markdown notes, splices it into the README, and renders everything to a single PDF.")
        .arg(
            Arg::new("path")
                .help("Directory to process")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("PDF output file name (default: RubikCube.pdf)")
                .required(false),
        )
        .arg(
            Arg::new("no-links")
                .long("no-links")
                .help("Render the summary tree without hyperlinks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-publish")
                .long("skip-publish")
                .help("Do not run the git add/commit/push step")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let debug_mode = matches.get_flag("debug");
    tracing_subscriber::fmt()
        .with_max_level(if debug_mode { Level::DEBUG } else { Level::INFO })
        .init();

    let root = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = config::load(&root)?;
    let output_name = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| config.output.clone());

    let files = walker::collect_markdown_files(&root, &config.ignore_patterns)?;
    if files.is_empty() {
        println!("No markdown files found.");
        return Ok(());
    }

    // Locate the renderer before touching anything on disk.
    let wkhtmltopdf = render::locate_wkhtmltopdf()?;

    let opts = tree::TreeOptions {
        links: !matches.get_flag("no-links"),
    };
    let (tree_lines, pages) = tree::build_tree(&root, opts);
    tracing::debug!("{} documents mapped for the summary", pages.len());

    if readme::update_readme(&root, &config.marker_heading, &tree_lines)? {
        println!("README.md updated successfully.");
    }

    let combined = concat::combine(&files)?;

    let output_pdf = root.join(&output_name);
    render::render_pdf(&wkhtmltopdf, &combined, &output_pdf)?;
    println!("PDF created successfully: {}", output_pdf.display());

    if !matches.get_flag("skip-publish") {
        publish::publish(&root, &config.commit_message, &config.remote, &config.branch);
    }

    Ok(())
}

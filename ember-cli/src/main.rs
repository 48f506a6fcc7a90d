//! Ember CLI - headless inspector for the rendering pipeline
//!
//! Usage:
//!   ember <file>                          Print the DOM tree
//!   ember <file> --format layout          Print the box tree with geometry
//!   ember <file> --format display-list    Print the display list as JSON
//!   ember --html '<h1>Hello</h1>'         Render an inline document

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use ember_browser::{Document, FileFetcher, FontdueFontMetrics};
use ember_css::{DrawCommand, FontCache, LayoutConfig};
use ember_dom::{DomTree, NodeId};
use owo_colors::OwoColorize;
use url::Url;

/// What to print after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The parsed document tree
    Tree,
    /// Every node with its resolved style
    Styles,
    /// The box tree with geometry
    Layout,
    /// The display list as JSON
    DisplayList,
}

/// Ember - render a page headlessly and dump one pipeline stage
#[derive(Parser, Debug)]
#[command(name = "ember")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a local file
    ember ./index.html

    # Box tree at a narrow viewport
    ember ./index.html --format layout --width 400

    # Display list of an inline document with an extra stylesheet
    ember --html '<p class="a">Hi</p>' --css user.css --format display-list

    # Only the commands visible after jumping to #section-2
    ember ./index.html --format display-list --fragment section-2 --visible
"#)]
struct Cli {
    /// Path or file:/data: URL of the document
    #[arg(value_name = "FILE|URL")]
    path: Option<String>,

    /// Render this markup instead of reading a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Stylesheet applied after the document's own sheets
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Viewport width in pixels (overrides --config)
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height in pixels, used for scrolling and --visible
    #[arg(long, default_value = "600")]
    height: f32,

    /// JSON file with layout settings; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Measure text with this TrueType/OpenType font instead of fixed ratios
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Scroll to the element with this id before dumping
    #[arg(long, value_name = "ID")]
    fragment: Option<String>,

    /// With --format display-list, only print commands in the visible window
    #[arg(long)]
    visible: bool,

    /// What to print
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport_width = width;
    }
    let fonts = match &cli.font {
        Some(path) => FontCache::new(Arc::new(FontdueFontMetrics::load(path)?)),
        None => FontCache::approximate(),
    };

    let mut document = match (&cli.html, &cli.path) {
        (Some(html), _) => Document::load(html, None, &FileFetcher, config, fonts),
        (None, Some(path)) => Document::open(&document_url(path)?, &FileFetcher, config, fonts),
        (None, None) => bail!("nothing to render: pass a FILE or --html"),
    };
    if let Some(path) = &cli.css {
        let css = fs::read_to_string(path)
            .with_context(|| format!("failed to read stylesheet '{}'", path.display()))?;
        document.add_user_stylesheet(&css);
    }
    if let Some(fragment) = &cli.fragment
        && !document.scroll_to_fragment(fragment, cli.height)
    {
        eprintln!("{} no element with id '{fragment}'", "warning:".yellow().bold());
    }

    print_summary(&document);
    let output = match cli.format {
        Format::Tree => ember_html::format_tree(document.dom(), document.dom().root()),
        Format::Styles => format_styles(document.dom()),
        Format::Layout => document.layout().format(document.dom()),
        Format::DisplayList => {
            let commands: Vec<&DrawCommand> = if cli.visible {
                document.visible_commands(cli.height).collect()
            } else {
                document.display_list().iter().collect()
            };
            serde_json::to_string_pretty(&commands)?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn read_config(path: &Path) -> Result<LayoutConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Turn a command-line argument into a URL linked stylesheets can resolve
/// against. Local paths become absolute `file:` URLs.
fn document_url(arg: &str) -> Result<String> {
    if let Ok(url) = Url::parse(arg)
        && url.scheme().len() > 1
    {
        return Ok(url.to_string());
    }
    let path = fs::canonicalize(arg).with_context(|| format!("failed to open '{arg}'"))?;
    Url::from_file_path(&path)
        .map(|url| url.to_string())
        .map_err(|()| anyhow::anyhow!("cannot express '{}' as a URL", path.display()))
}

/// One-line description on stderr so stdout stays machine-readable.
fn print_summary(document: &Document) {
    let title = if document.title().is_empty() {
        "(untitled)"
    } else {
        document.title()
    };
    eprintln!(
        "{} {} {}",
        "ember:".green().bold(),
        title.bold(),
        format!(
            "({} rules, {} boxes, {} commands, height {:.1}px, scroll {:.1}px)",
            document.stylesheet().len(),
            document.layout().len(),
            document.display_list().len(),
            document.layout().document_height(),
            document.scroll()
        )
        .dimmed()
    );
}

/// Every node with its resolved style, properties sorted by name.
fn format_styles(dom: &DomTree) -> String {
    let mut out = String::new();
    write_styles(dom, dom.root(), 0, &mut out);
    out
}

fn write_styles(dom: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let label = dom
        .tag_name(id)
        .map_or_else(|| "#text".to_string(), |tag| format!("<{tag}>"));
    let _ = writeln!(out, "{indent}{label}");

    let mut properties: Vec<(&String, &String)> = dom.style(id).iter().collect();
    properties.sort();
    for (property, value) in properties {
        let _ = writeln!(out, "{indent}  {property}: {value}");
    }
    for &child in dom.children(id) {
        write_styles(dom, child, depth + 1, out);
    }
}

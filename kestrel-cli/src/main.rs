//! Kestrel CLI
//!
//! Computes one CSS property value against a synthetic parent style and
//! prints the result.
//!
//! - kestrel -p font-size 1.5em
//! - kestrel -p top 50% --cb-height 600
//! - kestrel -p color transparent --json

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use kestrel_css::{
    CalculatedStyle, ColorValue, Computation, ContainingBlock, DerivedValue, PropertyName,
    Resolution, ResolverConfig, ValueKind,
};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Kestrel: compute a CSS property value
#[derive(Parser, Debug)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Font-relative length against the default 16px parent
    kestrel -p font-size 1.5em

    # Percentage of the parent line height
    kestrel -p vertical-align 150% --parent-line-height 20

    # Percentage of the containing block, bound after the style pass
    kestrel -p top 50% --cb-width 800 --cb-height 600

    # Machine-readable output
    kestrel -p color transparent --json
"#)]
struct Cli {
    /// Value text, e.g. `1.5em` or `"Gill Sans", serif`
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    value: String,

    /// Property the value belongs to
    #[arg(short, long)]
    property: String,

    /// Parent font size in pixels (defaults to the configured default)
    #[arg(long, value_name = "PX")]
    parent_font_size: Option<f64>,

    /// Parent line height in pixels
    #[arg(long, value_name = "PX")]
    parent_line_height: Option<f64>,

    /// Containing block width in pixels
    #[arg(long, value_name = "PX")]
    cb_width: Option<f64>,

    /// Containing block height in pixels
    #[arg(long, value_name = "PX")]
    cb_height: Option<f64>,

    /// Resolver configuration as JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep fractional pixels
    #[arg(long)]
    no_snap: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// Everything known about the computed value.
#[derive(Serialize)]
struct Report<'a> {
    property: &'a PropertyName,
    specified: &'a str,
    computed: String,
    kind: ValueKind,
    state: &'a Computation,
    resolution: &'a Resolution,
    px: Option<f64>,
    color: Option<ColorValue>,
    segments: &'a [String],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };
    if cli.no_snap {
        config.snap_to_whole_pixels = false;
    }

    // Synthetic parent
    let mut parent = CalculatedStyle::root(config);
    if let Some(px) = cli.parent_font_size {
        let _ = parent.derive(PropertyName::FontSize, &format!("{px}px"))?;
    }
    if let Some(px) = cli.parent_line_height {
        let _ = parent.derive(PropertyName::LineHeight, &format!("{px}px"))?;
    }

    let property = PropertyName::from_name(&cli.property);
    let mut style = CalculatedStyle::child_of(&Rc::new(parent));
    let mut resolution = style.derive(property.clone(), &cli.value)?;

    if cli.cb_width.is_some() || cli.cb_height.is_some() {
        let block = ContainingBlock {
            width: cli.cb_width.unwrap_or_default(),
            height: cli.cb_height.unwrap_or_default(),
        };
        if let Some(value) = style.get_mut(&property)
            && value.is_pending_layout()
        {
            resolution = Resolution::Resolved {
                px: value.bind_containing_block(block)?,
            };
        }
    }

    let value = style
        .get(&property)
        .with_context(|| format!("no computed value for '{property}'"))?;

    let report = Report {
        property: &property,
        specified: &cli.value,
        computed: value.css_text(),
        kind: if value.is_list() {
            ValueKind::List
        } else {
            ValueKind::Scalar
        },
        state: value.computation(),
        resolution: &resolution,
        px: value.as_float().ok(),
        color: value.as_color().ok(),
        segments: value.as_string_array(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, value);
    }
    Ok(())
}

/// Read a [`ResolverConfig`] from a JSON file.
fn load_config(path: &Path) -> Result<ResolverConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn print_report(report: &Report<'_>, value: &DerivedValue) {
    println!("{} {}: {}", "specified".bold(), report.property, report.specified);
    println!("{} {}: {}", "computed ".bold(), report.property, report.computed.green());

    match report.resolution {
        Resolution::Resolved { px } => println!("  resolved to {px}px"),
        Resolution::PendingLayout {
            percentage, axis, ..
        } => println!(
            "  {}",
            format!("pending: {percentage}% of the containing block {axis}").yellow()
        ),
        Resolution::Unchanged => {}
    }

    if let Some(unit) = value.specified_unit() {
        println!("  specified unit: {unit:?}");
    }
    if let Ok(unit) = value.primitive_type() {
        println!("  unit: {unit:?}");
    }
    if let Some(px) = report.px {
        println!("  number: {px}");
    }
    if let Some(color) = report.color {
        println!("  color: {} (alpha {})", color.to_hex_string(), color.a);
    }
    if report.kind == ValueKind::List {
        for (i, segment) in report.segments.iter().enumerate() {
            println!("  [{i}] {segment}");
        }
    }
}

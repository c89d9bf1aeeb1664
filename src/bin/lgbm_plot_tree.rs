//! lgbm-plot-tree: render one tree of a LightGBM model dump.
//!
//! ## Usage
//!
//! ```bash
//! # DOT source of the first tree on stdout
//! lgbm-plot-tree model.json
//!
//! # Third tree with statistics, rendered to PNG by Graphviz
//! lgbm-plot-tree model.json --tree-index 2 --show-info leaf_count,data_percentage -o tree.png
//!
//! # Fit the rendering into a 8x6 inch figure at 150 dpi
//! lgbm-plot-tree model.json -o tree.png --figsize 8,6 --dpi 150
//! ```
//!
//! Configuration is layered: `lgbm-plot.toml` (or `--config`), then
//! `LGBM_PLOT_*` environment variables, then command line flags.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lightgbm_treeplot::config::{parse_precision, DEFAULT_CONFIG_FILE};
use lightgbm_treeplot::{
    create_tree_digraph, initialize_logging, plot_tree, Booster, GraphvizRasterizer,
    ImageFormat, Orientation, PlotConfig, Rasterizer,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lgbm-plot-tree")]
#[command(version, about = "Plot a single decision tree of a LightGBM model dump")]
struct Args {
    /// Model dump JSON (output of Booster.dump_model)
    model: PathBuf,

    /// Index of the tree to plot
    #[arg(long, short = 't', default_value = "0")]
    tree_index: usize,

    /// Statistics to show: split_gain, internal_value, internal_weight,
    /// internal_count, leaf_count, leaf_weight, data_percentage
    #[arg(long, value_delimiter = ',')]
    show_info: Vec<String>,

    /// Decimals for floating point values
    #[arg(long, conflicts_with = "no_rounding")]
    precision: Option<String>,

    /// Show values without rounding
    #[arg(long)]
    no_rounding: bool,

    /// Tree orientation: horizontal or vertical
    #[arg(long)]
    orientation: Option<String>,

    /// Output format: dot, png or svg (default: from --output, else dot)
    #[arg(long)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Figure size in inches as WIDTH,HEIGHT; draws the PNG onto a figure canvas
    #[arg(long, value_delimiter = ',')]
    figsize: Option<Vec<f64>>,

    /// Figure resolution
    #[arg(long)]
    dpi: Option<u32>,

    /// Graphviz `dot` executable
    #[arg(long)]
    dot: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    initialize_logging();
    let args = Args::parse();

    let config = build_config(&args)?;
    let booster = Booster::from_json_file(&args.model)
        .with_context(|| format!("Failed to read model dump {}", args.model.display()))?;
    let format = output_format(&args, &config)?;

    let rasterizer = GraphvizRasterizer::from_config(&config);

    if format == ImageFormat::Png && config.figsize.is_some() {
        let Some(output) = &args.output else {
            bail!("--figsize needs --output");
        };
        let surface = plot_tree(&booster, None, args.tree_index, &config, &rasterizer)
            .with_context(|| format!("Failed to plot tree {}", args.tree_index))?;
        surface.save_png(output)?;
        return Ok(());
    }

    let graph = create_tree_digraph(&booster, args.tree_index, &config)
        .with_context(|| format!("Failed to plot tree {}", args.tree_index))?;
    let bytes = rasterizer.render(&graph, format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<PlotConfig> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            log::debug!("using {}", DEFAULT_CONFIG_FILE);
            PlotConfig::load_from_file(DEFAULT_CONFIG_FILE)?
        }
        None => PlotConfig::default(),
    };
    config.apply_environment_overrides()?;

    if !args.show_info.is_empty() {
        config.show_info = args
            .show_info
            .iter()
            .map(|name| name.trim().parse())
            .collect::<lightgbm_treeplot::Result<_>>()?;
    }
    if args.no_rounding {
        config.precision = None;
    } else if let Some(raw) = &args.precision {
        config.precision = parse_precision(raw)?;
    }
    if let Some(raw) = &args.orientation {
        config.orientation = raw.parse::<Orientation>()?;
    }
    if let Some(size) = &args.figsize {
        match size.as_slice() {
            [width, height] => config.figsize = Some((*width, *height)),
            _ => bail!("--figsize takes WIDTH,HEIGHT"),
        }
    }
    if let Some(dpi) = args.dpi {
        config.dpi = Some(dpi);
    }
    if let Some(dot) = &args.dot {
        config.dot_binary = dot.clone();
    }

    config.validate()?;
    Ok(config)
}

fn output_format(args: &Args, config: &PlotConfig) -> Result<ImageFormat> {
    if let Some(raw) = &args.format {
        return Ok(raw.parse()?);
    }
    match &args.output {
        Some(path) => match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Ok(ext.parse()?),
            None => Ok(config.format),
        },
        None => Ok(ImageFormat::Dot),
    }
}

//! Tree plotting: dumped tree to graph, graph to pixels.
//!
//! [`create_tree_digraph`] selects a tree from any [`DumpSource`] and
//! converts it with a [`TreeRenderer`]. [`plot_tree`] additionally
//! rasterizes the graph and draws it onto a [`PlotSurface`].

pub mod format;
pub mod legend;
pub mod raster;
pub mod renderer;
pub mod surface;

pub use format::{escape_html, format_percentage, format_threshold, format_value};
pub use legend::legend_node;
pub use raster::{rasterize, GraphvizRasterizer, PixelBuffer, Rasterizer};
pub use renderer::{split_fill, TreeRenderer};
pub use surface::{canvas_size, PlotSurface};

use crate::config::PlotConfig;
use crate::core::error::Result;
use crate::graph::Digraph;
use crate::io::DumpSource;

/// Create a graph of the tree at `tree_index`.
///
/// Feature names stored in the dump label the splits when present.
pub fn create_tree_digraph<S>(source: &S, tree_index: usize, config: &PlotConfig) -> Result<Digraph>
where
    S: DumpSource + ?Sized,
{
    config.validate()?;
    let dump = source.model_dump()?;
    let tree = dump.tree(tree_index)?;
    log::debug!("plotting tree {} of {}", tree_index, dump.num_trees());

    TreeRenderer::new(config)
        .with_feature_names(dump.feature_names())
        .convert(&tree.tree_structure)
}

/// Plot the tree at `tree_index` onto `surface`.
///
/// A surface of `config.figsize` and `config.dpi` is created when none is
/// given. The tree is rendered to PNG by `rasterizer` and shown with the
/// axes hidden.
pub fn plot_tree<S>(
    source: &S,
    surface: Option<PlotSurface>,
    tree_index: usize,
    config: &PlotConfig,
    rasterizer: &dyn Rasterizer,
) -> Result<PlotSurface>
where
    S: DumpSource + ?Sized,
{
    let graph = create_tree_digraph(source, tree_index, config)?;
    let mut surface = match surface {
        Some(surface) => surface,
        None => PlotSurface::new(config.figsize, config.dpi)?,
    };

    let pixels = rasterize(&graph, rasterizer)?;
    surface.imshow(&pixels)?;
    surface.axis_off();
    Ok(surface)
}

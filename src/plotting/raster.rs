//! Rasterization through an external layout engine.
//!
//! The crate never lays graphs out itself. A [`Rasterizer`] turns a finished
//! [`Digraph`] into encoded image bytes; [`GraphvizRasterizer`] does so by
//! piping DOT source through the Graphviz `dot` executable. Engine failures
//! are reported as they come: the spawn error as [`PlotError::Io`], a
//! non-zero exit as [`PlotError::Render`] carrying the engine's stderr.

use crate::config::PlotConfig;
use crate::core::constants::DEFAULT_DOT_BINARY;
use crate::core::error::{PlotError, Result};
use crate::core::types::ImageFormat;
use crate::graph::Digraph;
use image::RgbaImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Engine turning a graph into encoded image bytes.
pub trait Rasterizer {
    /// Render `graph` in the requested format.
    fn render(&self, graph: &Digraph, format: ImageFormat) -> Result<Vec<u8>>;
}

/// Rasterizer backed by the Graphviz `dot` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphvizRasterizer {
    binary: PathBuf,
    dpi: Option<u32>,
}

impl GraphvizRasterizer {
    /// Use the given `dot` executable.
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        GraphvizRasterizer {
            binary: binary.into(),
            dpi: None,
        }
    }

    /// Build from a plot configuration.
    pub fn from_config(config: &PlotConfig) -> Self {
        let mut rasterizer = Self::new(&config.dot_binary);
        rasterizer.dpi = config.dpi;
        rasterizer
    }

    /// Ask the engine for a specific resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Path of the engine binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for GraphvizRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_BINARY)
    }
}

impl Rasterizer for GraphvizRasterizer {
    fn render(&self, graph: &Digraph, format: ImageFormat) -> Result<Vec<u8>> {
        let source = graph.to_dot();
        if format == ImageFormat::Dot {
            return Ok(source.into_bytes());
        }

        let mut command = Command::new(&self.binary);
        command.arg(format!("-T{}", format.as_str()));
        if let Some(dpi) = self.dpi {
            command.arg(format!("-Gdpi={}", dpi));
        }

        log::info!(
            "rendering {} nodes with {} -T{}",
            graph.node_count(),
            self.binary.display(),
            format
        );
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(PlotError::render(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }
}

/// Decoded RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Decode encoded image bytes (PNG or any format `image` recognizes).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(image))
    }

    /// Wrap an RGBA image.
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        PixelBuffer {
            width,
            height,
            rgba: image.into_raw(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize * self.width as usize) + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(rgba)
    }

    /// Convert back into an `image` buffer.
    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
    }
}

/// Render `graph` to PNG with `rasterizer` and decode the result.
pub fn rasterize(graph: &Digraph, rasterizer: &dyn Rasterizer) -> Result<PixelBuffer> {
    let png = rasterizer.render(graph, ImageFormat::Png)?;
    PixelBuffer::decode(&png)
}

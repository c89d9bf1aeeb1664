//! Pixel canvas standing in for a plotting figure.
//!
//! A [`PlotSurface`] is sized like a figure: inches times dots per inch. It
//! starts white with a one pixel axes frame, and [`PlotSurface::imshow`]
//! draws a rasterized tree scaled to fit and centered.

use crate::core::constants::{DEFAULT_DPI, DEFAULT_FIGSIZE, MAX_CANVAS_PIXELS_PER_SIDE, MAX_DPI};
use crate::core::error::{PlotError, Result};
use crate::plotting::raster::PixelBuffer;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// White RGBA canvas with optional axes frame.
#[derive(Debug, Clone)]
pub struct PlotSurface {
    canvas: RgbaImage,
    figsize: (f64, f64),
    dpi: u32,
    axis_visible: bool,
    image: Option<RgbaImage>,
}

impl PlotSurface {
    /// Create a surface of `figsize` inches at `dpi`.
    ///
    /// Defaults to 6.4 x 4.8 inches at 100 dpi. Sizes must be positive and
    /// finite, the DPI within `1..=2400`, and each canvas side at most
    /// [`MAX_CANVAS_PIXELS_PER_SIDE`] pixels.
    pub fn new(figsize: Option<(f64, f64)>, dpi: Option<u32>) -> Result<Self> {
        let figsize = figsize.unwrap_or(DEFAULT_FIGSIZE);
        let dpi = dpi.unwrap_or(DEFAULT_DPI);
        let (width, height) = canvas_size(figsize, dpi)?;
        log::debug!("created {}x{} px plot surface", width, height);

        Ok(PlotSurface {
            canvas: RgbaImage::from_pixel(width, height, BACKGROUND),
            figsize,
            dpi,
            axis_visible: true,
            image: None,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Figure size in inches.
    pub fn figsize(&self) -> (f64, f64) {
        self.figsize
    }

    /// Dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Whether the axes frame is drawn.
    pub fn axis_visible(&self) -> bool {
        self.axis_visible
    }

    /// Hide the axes frame.
    pub fn axis_off(&mut self) {
        self.axis_visible = false;
        self.redraw();
    }

    /// Draw `pixels` scaled to fit the canvas, aspect ratio preserved.
    ///
    /// Replaces whatever was shown before.
    pub fn imshow(&mut self, pixels: &PixelBuffer) -> Result<()> {
        let source = pixels
            .to_image()
            .ok_or_else(|| PlotError::render("pixel buffer does not match its dimensions"))?;
        if source.width() == 0 || source.height() == 0 {
            return Err(PlotError::render("cannot show an empty image"));
        }

        let scale = f64::min(
            self.width() as f64 / source.width() as f64,
            self.height() as f64 / source.height() as f64,
        );
        let width = ((source.width() as f64 * scale).round() as u32).clamp(1, self.width());
        let height = ((source.height() as f64 * scale).round() as u32).clamp(1, self.height());

        let scaled = if (width, height) == source.dimensions() {
            source
        } else {
            imageops::resize(&source, width, height, FilterType::Triangle)
        };
        self.image = Some(scaled);
        self.redraw();
        Ok(())
    }

    /// Whether an image has been drawn.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Canvas pixels.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Write the canvas as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.canvas.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("saved plot to {}", path.display());
        Ok(())
    }

    fn redraw(&mut self) {
        let (width, height) = self.canvas.dimensions();
        self.canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        if let Some(image) = &self.image {
            let x = (width - image.width()) / 2;
            let y = (height - image.height()) / 2;
            imageops::overlay(&mut self.canvas, image, x as i64, y as i64);
        }

        if self.axis_visible {
            for x in 0..width {
                self.canvas.put_pixel(x, 0, FRAME);
                self.canvas.put_pixel(x, height - 1, FRAME);
            }
            for y in 0..height {
                self.canvas.put_pixel(0, y, FRAME);
                self.canvas.put_pixel(width - 1, y, FRAME);
            }
        }
    }
}

/// Pixel size of a `figsize` inch canvas at `dpi`.
pub fn canvas_size(figsize: (f64, f64), dpi: u32) -> Result<(u32, u32)> {
    let (width_in, height_in) = figsize;
    if !(width_in.is_finite() && height_in.is_finite() && width_in > 0.0 && height_in > 0.0) {
        return Err(PlotError::invalid_parameter(
            "figsize",
            format!("({}, {})", width_in, height_in),
            "width and height must be positive",
        ));
    }
    if dpi == 0 || dpi > MAX_DPI {
        return Err(PlotError::invalid_parameter(
            "dpi",
            dpi.to_string(),
            format!("must be between 1 and {}", MAX_DPI),
        ));
    }

    let width = (width_in * dpi as f64).round().max(1.0);
    let height = (height_in * dpi as f64).round().max(1.0);
    let limit = MAX_CANVAS_PIXELS_PER_SIDE as f64;
    if width > limit || height > limit {
        return Err(PlotError::invalid_parameter(
            "figsize",
            format!("({}, {}) at {} dpi", width_in, height_in, dpi),
            format!(
                "canvas of {}x{} px exceeds {} px per side",
                width, height, MAX_CANVAS_PIXELS_PER_SIDE
            ),
        ));
    }
    Ok((width as u32, height as u32))
}

impl Default for PlotSurface {
    fn default() -> Self {
        let (width_in, height_in) = DEFAULT_FIGSIZE;
        let width = (width_in * DEFAULT_DPI as f64).round() as u32;
        let height = (height_in * DEFAULT_DPI as f64).round() as u32;
        let mut surface = PlotSurface {
            canvas: RgbaImage::new(width, height),
            figsize: DEFAULT_FIGSIZE,
            dpi: DEFAULT_DPI,
            axis_visible: true,
            image: None,
        };
        surface.redraw();
        surface
    }
}

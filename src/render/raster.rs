use std::path::Path;

use tracing::debug;

use super::{RenderError, Result};

/// Raster options for turning an SVG scene into an image file.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill painted under the scene; JPEG output needs it opaque
    pub background: tiny_skia::Color,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: tiny_skia::Color::WHITE,
        }
    }
}

/// Rasterize `svg` and write it to `path`; the extension picks the format.
/// An existing file is overwritten.
///
/// # Errors
///
/// Returns `RenderError::SvgParse` for invalid SVG, `RenderError::PixmapAlloc`
/// for degenerate sizes, or `RenderError::ImageWrite` if encoding or writing fails.
pub fn write_svg_image(svg: &str, path: &Path, options: &RasterOptions) -> Result<()> {
    let pixmap = svg_to_pixmap(svg, options)?;
    let image = pixmap_to_rgb(&pixmap);

    image.save(path).map_err(|source| RenderError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Wrote {}x{} image to {}",
        pixmap.width(),
        pixmap.height(),
        path.display()
    );
    Ok(())
}

/// Render an SVG document onto a pixmap filled with the background color.
///
/// # Errors
///
/// Returns `RenderError::SvgParse` or `RenderError::PixmapAlloc`.
pub fn svg_to_pixmap(svg: &str, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    // System fonts, with a fixed default family for unstyled text.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "DejaVu Sans".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let size = tree.size();
    let width = (size.width() * options.scale).ceil().max(1.0) as u32;
    let height = (size.height() * options.scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })?;
    pixmap.fill(options.background);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Drop alpha from a rendered pixmap; callers paint an opaque background first.
fn pixmap_to_rgb(pixmap: &tiny_skia::Pixmap) -> image::RgbImage {
    let mut rgb = image::RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in rgb.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = image::Rgb([color.red(), color.green(), color.blue()]);
    }
    rgb
}

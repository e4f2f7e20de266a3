//! Overlap diagram rendering.
//!
//! Diagrams are built as SVG scenes ([`venn`]) and rasterized with
//! `usvg`/`resvg`/`tiny-skia` ([`raster`]). The output file extension picks
//! the encoded format (PNG or JPEG).

#![forbid(unsafe_code)]

use std::path::PathBuf;

pub mod raster;
pub mod venn;

pub use venn::{write_venn_diagram, VennLayout};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to build SVG scene: {0}")]
    SvgBuild(#[from] std::fmt::Error),
    #[error("failed to parse SVG: {0}")]
    SvgParse(String),
    #[error("failed to allocate {width}x{height} pixmap for raster rendering")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to write image {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;

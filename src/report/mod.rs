//! Report assembly and PDF output.
//!
//! A report is first assembled as an immutable [`ReportDocument`], an ordered
//! list of flowable [`Block`]s, and then laid out onto US Letter pages and
//! written as a single PDF in one write.
//!
//! ## Layout
//!
//! | Block       | Font               | Notes                                  |
//! |-------------|--------------------|----------------------------------------|
//! | Title       | Helvetica-Bold 18  | centred                                |
//! | Heading     | Helvetica-Bold 14  | 12pt space before, 6pt after           |
//! | Paragraph   | Helvetica 10       | wrapped to the frame width             |
//! | Image       | n/a                | centred, drawn at the requested size   |
//! | Table       | Helvetica 10       | grey bold header, beige data, 1pt grid; smaller font if wider than the frame |
//!
//! [`ReportDocument`]: document::ReportDocument
//! [`Block`]: document::Block

use std::path::PathBuf;

pub mod document;
pub mod metrics;
pub mod pdf;

pub use document::{assemble_report, Block, ReportDocument, StatsTable};
pub use pdf::write_pdf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to compress image {}: {source}", .path.display())]
    ImageCompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

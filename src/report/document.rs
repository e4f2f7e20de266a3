use std::path::{Path, PathBuf};

use crate::analysis::stats::{StatisticsRow, STAT_COLUMNS};

/// Edge of a diagram image in the report, in points.
pub const DIAGRAM_SIZE: f32 = 200.0;

/// Default vertical gap between blocks, in points.
pub const BLOCK_GAP: f32 = 12.0;

/// Gap between the diagrams and the summary tables, in points.
pub const SECTION_GAP: f32 = 64.0;

/// Heading that introduces the statistics tables.
pub const TABLES_HEADING: &str = "Summary Tables:";

/// A single-row table: column names and one row of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    pub header: Vec<String>,
    pub values: Vec<String>,
}

impl StatsTable {
    #[must_use]
    pub fn from_stats(stats: &StatisticsRow) -> Self {
        Self {
            header: STAT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            values: stats.formatted_values(),
        }
    }
}

/// A flowable element of a report, laid out top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),
    Spacer(f32),
    Image {
        path: PathBuf,
        width: f32,
        height: f32,
    },
    Table(StatsTable),
}

/// An assembled report: blocks in display order. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    title: String,
    blocks: Vec<Block>,
}

impl ReportDocument {
    #[must_use]
    pub fn builder(title: impl Into<String>) -> ReportBuilder {
        ReportBuilder::new(title)
    }

    /// Document title, also used for PDF metadata.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Paths of every image the document embeds, in order.
    pub fn image_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.blocks.iter().filter_map(|b| match b {
            Block::Image { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }

    /// Text of every title, heading and paragraph, in order.
    pub fn headings(&self) -> impl Iterator<Item = &str> + '_ {
        self.blocks.iter().filter_map(|b| match b {
            Block::Title(t) | Block::Heading(t) | Block::Paragraph(t) => Some(t.as_str()),
            _ => None,
        })
    }
}

/// Collects blocks for a [`ReportDocument`].
#[derive(Debug)]
pub struct ReportBuilder {
    title: String,
    blocks: Vec<Block>,
}

impl ReportBuilder {
    fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            blocks: vec![Block::Title(title.clone())],
            title,
        }
    }

    #[must_use]
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    #[must_use]
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    #[must_use]
    pub fn spacer(mut self, height: f32) -> Self {
        self.blocks.push(Block::Spacer(height));
        self
    }

    #[must_use]
    pub fn image(mut self, path: impl Into<PathBuf>, width: f32, height: f32) -> Self {
        self.blocks.push(Block::Image {
            path: path.into(),
            width,
            height,
        });
        self
    }

    #[must_use]
    pub fn table(mut self, table: StatsTable) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    #[must_use]
    pub fn build(self) -> ReportDocument {
        ReportDocument {
            title: self.title,
            blocks: self.blocks,
        }
    }
}

/// Lay out the comparison report: title, each diagram under its heading,
/// then each statistics table under its heading.
#[must_use]
pub fn assemble_report(
    title: &str,
    diagrams: &[(&str, &Path)],
    tables: &[(&str, &StatisticsRow)],
) -> ReportDocument {
    let mut builder = ReportDocument::builder(title).spacer(BLOCK_GAP);

    for (i, (heading, path)) in diagrams.iter().enumerate() {
        let gap_after = if i + 1 == diagrams.len() {
            SECTION_GAP
        } else {
            BLOCK_GAP
        };
        builder = builder
            .heading(*heading)
            .spacer(BLOCK_GAP)
            .image(*path, DIAGRAM_SIZE, DIAGRAM_SIZE)
            .spacer(gap_after);
    }

    builder = builder.heading(TABLES_HEADING).spacer(BLOCK_GAP);
    for (heading, stats) in tables {
        builder = builder
            .paragraph(*heading)
            .spacer(BLOCK_GAP)
            .table(StatsTable::from_stats(stats))
            .spacer(BLOCK_GAP);
    }

    builder.build()
}

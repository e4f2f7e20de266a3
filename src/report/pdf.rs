use std::io::Write as _;
use std::path::Path;

use chrono::{Datelike, Timelike};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use super::document::{Block, ReportDocument, StatsTable};
use super::metrics::{wrap_text, Font};
use super::{ReportError, Result};

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;

const FRAME_TOP: f32 = PAGE_HEIGHT - MARGIN;
const FRAME_BOTTOM: f32 = MARGIN;
const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PRODUCER: &str = concat!("blastn-compare ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: Font,
    size: f32,
    leading: f32,
    space_before: f32,
    space_after: f32,
    centered: bool,
}

const TITLE_STYLE: TextStyle = TextStyle {
    font: Font::HelveticaBold,
    size: 18.0,
    leading: 22.0,
    space_before: 0.0,
    space_after: 6.0,
    centered: true,
};

const HEADING_STYLE: TextStyle = TextStyle {
    font: Font::HelveticaBold,
    size: 14.0,
    leading: 18.0,
    space_before: 12.0,
    space_after: 6.0,
    centered: false,
};

const BODY_STYLE: TextStyle = TextStyle {
    font: Font::Helvetica,
    size: 10.0,
    leading: 12.0,
    space_before: 0.0,
    space_after: 0.0,
    centered: false,
};

const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_LEADING: f32 = 12.0;
const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_TOP: f32 = 3.0;
const CELL_PAD_BOTTOM: f32 = 3.0;
const HEADER_PAD_BOTTOM: f32 = 12.0;
const GRID_WIDTH: f32 = 1.0;

type Rgb = (f32, f32, f32);
const BLACK: Rgb = (0.0, 0.0, 0.0);
const GREY: Rgb = (0.5, 0.5, 0.5);
const WHITESMOKE: Rgb = (0.96, 0.96, 0.96);
const BEIGE: Rgb = (0.96, 0.96, 0.86);

/// A heading's position, used for the document outline.
#[derive(Debug, Clone, PartialEq)]
struct Bookmark {
    text: String,
    page: usize,
    top: f32,
}

/// Laid-out pages: one content stream per page plus outline bookmarks.
struct Layout {
    pages: Vec<Content>,
    bookmarks: Vec<Bookmark>,
}

/// Flows blocks down the page frame, starting new pages as needed.
struct Layouter {
    pages: Vec<Content>,
    bookmarks: Vec<Bookmark>,
    y: f32,
    next_image: usize,
}

impl Layouter {
    fn new() -> Self {
        Self {
            pages: vec![Content::new()],
            bookmarks: Vec::new(),
            y: FRAME_TOP,
            next_image: 0,
        }
    }

    fn content(&mut self) -> &mut Content {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn at_page_top(&self) -> bool {
        (self.y - FRAME_TOP).abs() < f32::EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(Content::new());
        self.y = FRAME_TOP;
    }

    /// Start a new page unless `height` fits below the cursor.
    fn ensure(&mut self, height: f32) {
        if self.y - height < FRAME_BOTTOM && !self.at_page_top() {
            self.new_page();
        }
    }

    fn place(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.text(text, TITLE_STYLE),
            Block::Heading(text) => self.text(text, HEADING_STYLE),
            Block::Paragraph(text) => self.text(text, BODY_STYLE),
            Block::Spacer(height) => {
                // A spacer that does not fit ends the page
                if self.y - height < FRAME_BOTTOM {
                    self.new_page();
                } else {
                    self.y -= height;
                }
            }
            Block::Image { width, height, .. } => self.image(*width, *height),
            Block::Table(table) => self.table(table),
        }
    }

    fn text(&mut self, text: &str, style: TextStyle) {
        let lines = wrap_text(text, style.font, style.size, FRAME_WIDTH);
        #[allow(clippy::cast_precision_loss)]
        let body = lines.len() as f32 * style.leading;

        let space_before = if self.at_page_top() {
            0.0
        } else {
            style.space_before
        };
        self.ensure(space_before + body + style.space_after);
        if !self.at_page_top() {
            self.y -= space_before;
        }

        self.bookmarks.push(Bookmark {
            text: text.to_string(),
            page: self.pages.len() - 1,
            top: self.y,
        });

        for line in &lines {
            let x = if style.centered {
                MARGIN + (FRAME_WIDTH - style.font.text_width(line, style.size)) / 2.0
            } else {
                MARGIN
            };
            let baseline = self.y - style.size;
            show_text(self.content(), style.font, style.size, BLACK, x, baseline, line);
            self.y -= style.leading;
        }
        self.y -= style.space_after;
    }

    fn image(&mut self, width: f32, height: f32) {
        self.ensure(height);

        let name = image_name(self.next_image);
        self.next_image += 1;

        let x = MARGIN + (FRAME_WIDTH - width) / 2.0;
        let y = self.y - height;
        let content = self.content();
        content.save_state();
        content.transform([width, 0.0, 0.0, height, x, y]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
        self.y = y;
    }

    fn table(&mut self, table: &StatsTable) {
        let (font_size, widths) = table_layout(table);
        let total_width: f32 = widths.iter().sum();
        let header_height = CELL_PAD_TOP + TABLE_LEADING + HEADER_PAD_BOTTOM;
        let row_height = CELL_PAD_TOP + TABLE_LEADING + CELL_PAD_BOTTOM;

        self.ensure(header_height + row_height);

        let left = MARGIN + (FRAME_WIDTH - total_width) / 2.0;
        let top = self.y;
        let rows = [
            (&table.header, header_height, Font::HelveticaBold, GREY, WHITESMOKE),
            (&table.values, row_height, Font::Helvetica, BEIGE, BLACK),
        ];

        let mut row_top = top;
        for (cells, height, font, background, text_color) in rows {
            let content = self.content();
            set_fill(content, background);
            content.rect(left, row_top - height, total_width, height);
            content.fill_nonzero();

            let mut x = left;
            for (cell, width) in cells.iter().zip(&widths) {
                let text_x = x + (width - font.text_width(cell, font_size)) / 2.0;
                let baseline = row_top - CELL_PAD_TOP - font_size;
                show_text(content, font, font_size, text_color, text_x, baseline, cell);
                x += width;
            }
            row_top -= height;
        }

        // Grid around every cell
        let content = self.content();
        content.set_line_width(GRID_WIDTH);
        content.set_stroke_rgb(BLACK.0, BLACK.1, BLACK.2);
        let mut row_top = top;
        for height in [header_height, row_height] {
            let mut x = left;
            for width in &widths {
                content.rect(x, row_top - height, *width, height);
                x += width;
            }
            row_top -= height;
        }
        content.stroke();

        self.y = row_top;
    }

    fn finish(self) -> Layout {
        Layout {
            pages: self.pages,
            bookmarks: self.bookmarks,
        }
    }
}

fn image_name(index: usize) -> String {
    format!("Im{index}")
}

/// Font size and column widths for `table`. A table wider than the frame is
/// set in a smaller font so that it fits exactly.
fn table_layout(table: &StatsTable) -> (f32, Vec<f32>) {
    let widths = column_widths(table, TABLE_FONT_SIZE);
    let total: f32 = widths.iter().sum();
    if total <= FRAME_WIDTH {
        return (TABLE_FONT_SIZE, widths);
    }

    #[allow(clippy::cast_precision_loss)]
    let padding = 2.0 * CELL_PAD_X * widths.len() as f32;
    // Text width scales linearly with the font size
    let size = TABLE_FONT_SIZE * (FRAME_WIDTH - padding) / (total - padding);
    (size, column_widths(table, size))
}

fn column_widths(table: &StatsTable, font_size: f32) -> Vec<f32> {
    let columns = table.header.len().max(table.values.len());
    (0..columns)
        .map(|i| {
            let header = table
                .header
                .get(i)
                .map_or(0.0, |h| Font::HelveticaBold.text_width(h, font_size));
            let value = table
                .values
                .get(i)
                .map_or(0.0, |v| Font::Helvetica.text_width(v, font_size));
            header.max(value) + 2.0 * CELL_PAD_X
        })
        .collect()
}

fn set_fill(content: &mut Content, (r, g, b): Rgb) {
    content.set_fill_rgb(r, g, b);
}

fn show_text(content: &mut Content, font: Font, size: f32, color: Rgb, x: f32, y: f32, text: &str) {
    let encoded = encode_win_ansi(text);
    set_fill(content, color);
    content.begin_text();
    content.set_font(Name(font.resource_name()), size);
    content.next_line(x, y);
    content.show(Str(&encoded));
    content.end_text();
}

/// Encode text for the standard fonts' WinAnsi encoding; Latin-1 maps
/// directly, anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).unwrap_or(b'?'),
            _ => b'?',
        })
        .collect()
}

fn layout(doc: &ReportDocument) -> Layout {
    let mut layouter = Layouter::new();
    for block in doc.blocks() {
        layouter.place(block);
    }
    layouter.finish()
}

/// An image decoded to RGB and Flate-compressed for embedding.
struct EmbeddedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

fn load_image(path: &Path) -> Result<EmbeddedImage> {
    let rgb = image::open(path)
        .map_err(|source| ReportError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let compress_err = |source| ReportError::ImageCompress {
        path: path.to_path_buf(),
        source,
    };
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw()).map_err(compress_err)?;
    let data = encoder.finish().map_err(compress_err)?;

    Ok(EmbeddedImage {
        width: rgb.width(),
        height: rgb.height(),
        data,
    })
}

fn creation_date() -> Date {
    let now = chrono::Utc::now();
    let narrow = |v: u32| u8::try_from(v).unwrap_or(0);
    Date::new(u16::try_from(now.year()).unwrap_or(0))
        .month(narrow(now.month()))
        .day(narrow(now.day()))
        .hour(narrow(now.hour()))
        .minute(narrow(now.minute()))
        .second(narrow(now.second()))
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Render a document to PDF bytes. Images are read from disk here.
///
/// # Errors
///
/// Returns `ReportError::ImageRead` if an image cannot be decoded or
/// `ReportError::ImageCompress` if compressing it fails.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>> {
    let images = doc
        .image_paths()
        .map(load_image)
        .collect::<Result<Vec<_>>>()?;
    let layout = layout(doc);

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let outline_id = alloc.bump();
    let info_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let image_ids: Vec<Ref> = images.iter().map(|_| alloc.bump()).collect();
    let page_ids: Vec<Ref> = layout.pages.iter().map(|_| alloc.bump()).collect();
    let content_ids: Vec<Ref> = layout.pages.iter().map(|_| alloc.bump()).collect();
    let bookmark_ids: Vec<Ref> = layout.bookmarks.iter().map(|_| alloc.bump()).collect();

    let mut pdf = Pdf::new();

    let mut catalog = pdf.catalog(catalog_id);
    catalog.pages(page_tree_id);
    if !bookmark_ids.is_empty() {
        catalog.outlines(outline_id);
    }
    catalog.finish();

    pdf.document_info(info_id)
        .title(TextStr(doc.title()))
        .producer(TextStr(PRODUCER))
        .creation_date(creation_date());

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let page_count = page_ids.len() as i32;
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_count);

    for (id, font) in [(regular_id, Font::Helvetica), (bold_id, Font::HelveticaBold)] {
        pdf.type1_font(id)
            .base_font(Name(font.base_name()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (image, id) in images.iter().zip(&image_ids) {
        let mut xobject = pdf.image_xobject(*id, &image.data);
        xobject.filter(Filter::FlateDecode);
        xobject.width(to_i32(image.width));
        xobject.height(to_i32(image.height));
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();
    }

    let image_names: Vec<String> = (0..images.len()).map(image_name).collect();
    for ((content, page_id), content_id) in layout.pages.into_iter().zip(&page_ids).zip(&content_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(*content_id);

        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(Font::Helvetica.resource_name()), regular_id)
            .pair(Name(Font::HelveticaBold.resource_name()), bold_id);
        {
            let mut x_objects = resources.x_objects();
            for (name, id) in image_names.iter().zip(&image_ids) {
                x_objects.pair(Name(name.as_bytes()), *id);
            }
        }
        resources.finish();
        page.finish();

        pdf.stream(*content_id, &content.finish());
    }

    if !bookmark_ids.is_empty() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let count = bookmark_ids.len() as i32;
        let mut outline = pdf.outline(outline_id);
        outline.first(bookmark_ids[0]);
        outline.last(bookmark_ids[bookmark_ids.len() - 1]);
        outline.count(count);
        outline.finish();

        for (i, (bookmark, id)) in layout.bookmarks.iter().zip(&bookmark_ids).enumerate() {
            let mut item = pdf.outline_item(*id);
            item.title(TextStr(&bookmark.text));
            item.parent(outline_id);
            if i > 0 {
                item.prev(bookmark_ids[i - 1]);
            }
            if let Some(next) = bookmark_ids.get(i + 1) {
                item.next(*next);
            }
            item.dest()
                .page(page_ids[bookmark.page])
                .xyz(0.0, bookmark.top, None);
            item.finish();
        }
    }

    debug!(
        "Rendered report with {} pages and {} images",
        page_ids.len(),
        images.len()
    );
    Ok(pdf.finish())
}

/// Render `doc` and write it to `path` in a single write.
///
/// # Errors
///
/// Returns the errors of [`render_pdf`], or `ReportError::Write` if the file
/// cannot be written.
pub fn write_pdf(doc: &ReportDocument, path: &Path) -> Result<()> {
    let bytes = render_pdf(doc)?;
    std::fs::write(path, &bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

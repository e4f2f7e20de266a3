//! Area-proportional two-set Venn diagrams.
//!
//! Each circle's area is proportional to its set size and the centre
//! distance is solved so the lens area matches the intersection size.
//! The scene is emitted as SVG and rasterized by [`super::raster`].

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use super::raster::{write_svg_image, RasterOptions};
use super::Result;
use crate::analysis::overlap::SetOverlap;
use crate::report::metrics::Font;

/// Canvas edge in pixels (6 inches at 100 dpi).
pub const CANVAS_SIZE: f64 = 600.0;

const PLOT_LEFT: f64 = 60.0;
const PLOT_TOP: f64 = 60.0;
const PLOT_SIZE: f64 = 480.0;
const GRID_STEP: f64 = 48.0;

/// Region counts and set labels, 16pt at 100 dpi.
const LABEL_FONT_PX: f64 = 22.0;
const TITLE_FONT_PX: f64 = 17.0;

/// Horizontal space kept clear between the two set labels and at the canvas edges.
const LABEL_GAP: f64 = 12.0;
const CANVAS_PAD: f64 = 8.0;

/// The rasterizer's DejaVu Sans runs wider than the Helvetica metrics used to
/// measure labels; overestimate so a fitted label never spills.
const LABEL_WIDTH_FACTOR: f64 = 1.2;

const FIRST_COLOR: &str = "#ff0000";
const SECOND_COLOR: &str = "#008000";
const FILL_OPACITY: f64 = 0.4;

/// Gap between disjoint circles, relative to the sum of their radii.
const DISJOINT_GAP: f64 = 0.1;

/// Placeholder area for an empty set, relative to the larger set.
const EMPTY_SET_AREA: f64 = 0.05;

const BISECTION_STEPS: usize = 100;

/// Circle geometry in abstract units: first circle centred at the origin,
/// second on the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VennLayout {
    pub radius_first: f64,
    pub radius_second: f64,
    /// Distance between circle centres
    pub distance: f64,
}

impl VennLayout {
    #[must_use]
    pub fn compute(overlap: &SetOverlap) -> Self {
        let first = count_to_f64(overlap.first_total());
        let second = count_to_f64(overlap.second_total());
        let shared = count_to_f64(overlap.shared);

        let placeholder = EMPTY_SET_AREA * first.max(second).max(1.0);
        let area_first = if first > 0.0 { first } else { placeholder };
        let area_second = if second > 0.0 { second } else { placeholder };

        let r1 = (area_first / PI).sqrt();
        let r2 = (area_second / PI).sqrt();

        let distance = if overlap.shared == 0 {
            (r1 + r2) * (1.0 + DISJOINT_GAP)
        } else if overlap.only_first == 0 || overlap.only_second == 0 {
            // One set contains the other: internally tangent
            (r1 - r2).abs()
        } else {
            solve_distance(r1, r2, shared)
        };

        Self {
            radius_first: r1,
            radius_second: r2,
            distance,
        }
    }

    /// Area shared by the two circles.
    #[must_use]
    pub fn lens_area(&self) -> f64 {
        lens_area(self.radius_first, self.radius_second, self.distance)
    }

    /// Horizontal extent `(min_x, max_x)` of both circles.
    fn x_extent(&self) -> (f64, f64) {
        let min_x = (-self.radius_first).min(self.distance - self.radius_second);
        let max_x = self.radius_first.max(self.distance + self.radius_second);
        (min_x, max_x)
    }
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Intersection area of two circles with radii `r1`, `r2` whose centres are `d` apart.
#[must_use]
pub fn lens_area(r1: f64, r2: f64, d: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }

    let alpha = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let beta = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0).acos();
    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);

    r1 * r1 * alpha + r2 * r2 * beta - 0.5 * kite.max(0.0).sqrt()
}

/// Bisect for the centre distance whose lens area equals `target`.
/// Lens area shrinks monotonically as the circles move apart.
fn solve_distance(r1: f64, r2: f64, target: f64) -> f64 {
    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if lens_area(r1, r2, mid) > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Horizontal placement of one set label; `left..right` is its measured extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub left: f64,
    pub right: f64,
    pub font_size: f64,
}

/// Estimated rendered width of `text` at `size` pixels.
fn label_width(text: &str, size: f64) -> f64 {
    #[allow(clippy::cast_possible_truncation)]
    let size = size as f32;
    f64::from(Font::Helvetica.text_width(text, size)) * LABEL_WIDTH_FACTOR
}

/// Fit `text` into `available` pixels, shrinking the font when it is too wide.
fn fitted_label(text: &str, available: f64) -> (f64, f64) {
    let width = label_width(text, LABEL_FONT_PX);
    if width <= available || width <= 0.0 {
        (LABEL_FONT_PX, width)
    } else {
        let size = LABEL_FONT_PX * available / width;
        (size, label_width(text, size))
    }
}

/// Place both set labels on one line below the circles.
///
/// The canvas is split midway between the circle centres: the first label is
/// right-aligned in the left part, the second left-aligned in the right part.
/// Each sits centred under its circle when there is room, and always stays
/// inside the canvas on its own side of the split.
#[must_use]
pub fn place_set_labels(
    labels: (&str, &str),
    centres: (f64, f64),
) -> (LabelPlacement, LabelPlacement) {
    let split = ((centres.0 + centres.1) / 2.0)
        .clamp(CANVAS_PAD + LABEL_GAP, CANVAS_SIZE - CANVAS_PAD - LABEL_GAP);
    let first_limit = split - LABEL_GAP / 2.0;
    let second_limit = split + LABEL_GAP / 2.0;

    let (size, width) = fitted_label(labels.0, first_limit - CANVAS_PAD);
    let right = (centres.0 + width / 2.0)
        .min(first_limit)
        .max(CANVAS_PAD + width);
    let first = LabelPlacement {
        left: right - width,
        right,
        font_size: size,
    };

    let (size, width) = fitted_label(labels.1, CANVAS_SIZE - CANVAS_PAD - second_limit);
    let left = (centres.1 - width / 2.0)
        .max(second_limit)
        .min(CANVAS_SIZE - CANVAS_PAD - width);
    let second = LabelPlacement {
        left,
        right: left + width,
        font_size: size,
    };

    (first, second)
}

/// Build the SVG scene for one diagram.
///
/// # Errors
///
/// Returns `RenderError::SvgBuild` if formatting the scene fails.
pub fn venn_svg(overlap: &SetOverlap, labels: (&str, &str), title: &str) -> Result<String> {
    let mut svg = String::new();
    write_scene(&mut svg, overlap, labels, title)?;
    Ok(svg)
}

fn write_scene(
    svg: &mut String,
    overlap: &SetOverlap,
    labels: (&str, &str),
    title: &str,
) -> std::fmt::Result {
    let layout = VennLayout::compute(overlap);

    // Fit both circles into the plot area with a margin for set labels
    let (min_x, max_x) = layout.x_extent();
    let max_r = layout.radius_first.max(layout.radius_second);
    let span = (max_x - min_x).max(2.0 * max_r);
    let scale = (PLOT_SIZE * 0.8) / span;

    let centre_x = PLOT_LEFT + PLOT_SIZE / 2.0;
    let centre_y = PLOT_TOP + PLOT_SIZE * 0.45;
    let offset_x = centre_x - scale * (min_x + max_x) / 2.0;

    let cx1 = offset_x;
    let cx2 = offset_x + scale * layout.distance;
    let r1 = scale * layout.radius_first;
    let r2 = scale * layout.radius_second;

    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" font-family="DejaVu Sans, Arial, Helvetica, sans-serif">"#,
        size = CANVAS_SIZE
    )?;
    write!(
        svg,
        r#"<rect x="0" y="0" width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" fill="white"/>"#
    )?;

    push_grid(svg)?;

    for (cx, r, color) in [(cx1, r1, FIRST_COLOR), (cx2, r2, SECOND_COLOR)] {
        write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{centre_y:.2}" r="{r:.2}" fill="{color}" fill-opacity="{FILL_OPACITY}" stroke="none"/>"#
        )?;
    }

    // Region counts
    let left_edge_second = cx2 - r2;
    let right_edge_first = cx1 + r1;
    if overlap.only_first > 0 {
        let x = ((cx1 - r1) + left_edge_second.min(right_edge_first)) / 2.0;
        push_text(svg, x, centre_y, LABEL_FONT_PX, "middle", &overlap.only_first.to_string())?;
    }
    if overlap.only_second > 0 {
        let x = (right_edge_first.max(left_edge_second) + (cx2 + r2)) / 2.0;
        push_text(svg, x, centre_y, LABEL_FONT_PX, "middle", &overlap.only_second.to_string())?;
    }
    {
        let lens_left = left_edge_second.max(cx1 - r1);
        let lens_right = right_edge_first.min(cx2 + r2);
        let x = (lens_left + lens_right) / 2.0;
        push_text(svg, x, centre_y, LABEL_FONT_PX, "middle", &overlap.shared.to_string())?;
    }

    let label_y = (centre_y + r1.max(r2) + LABEL_FONT_PX * 1.5).min(PLOT_TOP + PLOT_SIZE - 8.0);
    let (first, second) = place_set_labels(labels, (cx1, cx2));
    push_text(svg, first.right, label_y, first.font_size, "end", labels.0)?;
    push_text(svg, second.left, label_y, second.font_size, "start", labels.1)?;

    push_text(svg, CANVAS_SIZE / 2.0, PLOT_TOP - 18.0, TITLE_FONT_PX, "middle", title)?;

    svg.push_str("</svg>");
    Ok(())
}

fn push_grid(svg: &mut String) -> std::fmt::Result {
    let right = PLOT_LEFT + PLOT_SIZE;
    let bottom = PLOT_TOP + PLOT_SIZE;

    svg.push_str(r##"<g stroke="#b0b0b0" stroke-width="0.8">"##);
    let mut offset = 0.0;
    while offset <= PLOT_SIZE + 1e-9 {
        let x = PLOT_LEFT + offset;
        let y = PLOT_TOP + offset;
        write!(
            svg,
            r#"<line x1="{x:.2}" y1="{PLOT_TOP}" x2="{x:.2}" y2="{bottom}"/><line x1="{PLOT_LEFT}" y1="{y:.2}" x2="{right}" y2="{y:.2}"/>"#
        )?;
        offset += GRID_STEP;
    }
    svg.push_str("</g>");
    Ok(())
}

fn push_text(
    svg: &mut String,
    x: f64,
    y: f64,
    size: f64,
    anchor: &str,
    text: &str,
) -> std::fmt::Result {
    write!(
        svg,
        r#"<text x="{x:.2}" y="{y:.2}" font-size="{size:.2}" text-anchor="{anchor}" dominant-baseline="middle" fill="black">{}</text>"#,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a Venn diagram of `overlap` to `path`, overwriting any existing file.
///
/// # Errors
///
/// Returns a `RenderError` if rasterization or writing the image fails.
pub fn write_venn_diagram(
    overlap: &SetOverlap,
    labels: (&str, &str),
    title: &str,
    path: &Path,
) -> Result<()> {
    debug!(
        "Venn regions for {title}: {} / {} / {}",
        overlap.only_first, overlap.shared, overlap.only_second
    );
    let svg = venn_svg(overlap, labels, title)?;
    write_svg_image(&svg, path, &RasterOptions::default())
}

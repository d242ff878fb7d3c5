// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backing storage for a built layout: flat arrays of runs, clusters,
//! line items and lines, indexed by range.

use core::ops::Range;

use crate::shape::Rect;
use crate::style::ResolvedSpanStyle;

/// Vertical font metrics for a run, in layout units.
///
/// `ascent` is negative (distance above the baseline, y-down), `descent`
/// positive.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct RunMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
    /// Extreme ascent over fallback fonts used in the run, if any.
    pub fallback_ascent: Option<f32>,
    /// Extreme descent over fallback fonts used in the run, if any.
    pub fallback_descent: Option<f32>,
}

/// A maximal same-style, same-direction run in logical order.
#[derive(Clone, Debug)]
pub(crate) struct RunData {
    /// Range of the source text, in code points.
    pub(crate) text_range: Range<usize>,
    /// Index into the resolved style table.
    pub(crate) style_index: u16,
    /// Bidi level for the run.
    pub(crate) bidi_level: u8,
    /// Range of clusters.
    pub(crate) cluster_range: Range<usize>,
    /// Metrics for the run.
    pub(crate) metrics: RunMetrics,
    /// Total advance of the run.
    pub(crate) advance: f32,
}

/// A shaped cluster, the unit of measurement and justification.
#[derive(Clone, Debug)]
pub(crate) struct ClusterData {
    /// Range of the source text, in code points.
    pub(crate) text_range: Range<usize>,
    /// Nominal advance width for this cluster.
    pub(crate) advance: f32,
    /// Justification addition on the cluster's trailing edge. Zero until
    /// the line is justified.
    pub(crate) justify: f32,
    /// Ink bounding box relative to the cluster origin.
    pub(crate) ink: Rect,
    /// True if the cluster is whitespace.
    pub(crate) whitespace: bool,
}

impl ClusterData {
    /// Advance including any justification addition.
    pub(crate) fn full_advance(&self) -> f32 {
        self.advance + self.justify
    }
}

/// The cause of a line break.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// Last line of the paragraph.
    #[default]
    None,
    /// A regular break opportunity.
    Regular,
    /// A mandatory break after a newline-class character.
    Explicit,
    /// No opportunity fit; broken at a grapheme boundary.
    Emergency,
}

/// Edit applied at the end of a line broken inside a word.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum EndHyphenEdit {
    #[default]
    NoEdit,
    InsertHyphen,
}

/// A slice of a run that landed on one line. After reordering, items are
/// stored in visual order.
#[derive(Clone, Debug)]
pub(crate) struct LineItemData {
    /// The index of the run in the runs vec.
    pub(crate) run_index: usize,
    /// Bidi level for the item (used for reordering).
    pub(crate) bidi_level: u8,
    /// Advance for the item, including justification.
    pub(crate) advance: f32,
    /// True if the item is composed entirely of whitespace.
    pub(crate) is_whitespace: bool,
    /// True if the item ends in whitespace.
    pub(crate) has_trailing_whitespace: bool,
    /// Range of the source text, in code points.
    pub(crate) text_range: Range<usize>,
    /// Range of clusters.
    pub(crate) cluster_range: Range<usize>,
}

/// Resolved geometry for one line.
#[derive(Copy, Clone, Default, Debug)]
pub struct LineMetrics {
    /// Ascent above the baseline, negative.
    pub ascent: f32,
    /// Descent below the baseline, positive.
    pub descent: f32,
    /// Typographic leading.
    pub leading: f32,
    /// Line height after the spacing multiplier and amount are applied.
    pub line_height: f32,
    /// Distance from the top of the layout to the baseline.
    pub baseline: f32,
    /// Horizontal offset applied by alignment.
    pub offset: f32,
    /// Sum of cluster advances on the line, including trailing whitespace
    /// and justification.
    pub advance: f32,
    /// Advance of the trailing whitespace at the line's logical end.
    pub trailing_whitespace: f32,
    /// Line width under the active width model, including trailing
    /// whitespace.
    pub width: f32,
    /// Line width under the active width model over the visible extent
    /// only.
    pub max_width: f32,
    /// Ink bounding box relative to the line's unaligned origin
    /// (baseline-relative vertically).
    pub ink: Rect,
}

impl LineMetrics {
    /// Natural vertical extent before spacing adjustments.
    pub fn size(&self) -> f32 {
        self.descent - self.ascent
    }
}

#[derive(Clone, Default, Debug)]
pub(crate) struct LineData {
    /// Range of the source text, in code points. Lines partition the
    /// paragraph: an ellipsized final line extends to the paragraph end.
    pub(crate) text_range: Range<usize>,
    /// Code point offset where drawing stops. Equal to `text_range.end`
    /// except on an ellipsized line.
    pub(crate) visible_end: usize,
    /// Range of line items.
    pub(crate) item_range: Range<usize>,
    /// Metrics for the line.
    pub(crate) metrics: LineMetrics,
    /// The cause of the line break.
    pub(crate) break_reason: BreakReason,
    /// Hyphen inserted when the break fell inside a word.
    pub(crate) end_hyphen: EndHyphenEdit,
    /// Advance of the inserted hyphen glyph, if any.
    pub(crate) hyphen_advance: f32,
    /// True when an ellipsis replaced the truncated tail.
    pub(crate) ellipsized: bool,
    /// Advance of the ellipsis string, if any.
    pub(crate) ellipsis_advance: f32,
    /// Maximum advance allowed for this line (after indents).
    pub(crate) max_advance: f32,
    /// Number of justification units the line received.
    pub(crate) justify_units: usize,
}

#[derive(Clone, Default, Debug)]
pub(crate) struct LayoutData {
    /// Paragraph length in code points.
    pub(crate) text_len: usize,
    pub(crate) base_level: u8,
    pub(crate) styles: Vec<ResolvedSpanStyle>,
    pub(crate) runs: Vec<RunData>,
    pub(crate) clusters: Vec<ClusterData>,
    pub(crate) line_items: Vec<LineItemData>,
    pub(crate) lines: Vec<LineData>,
    /// Requested wrap width.
    pub(crate) width: f32,
    /// Total height of all lines.
    pub(crate) height: f32,
}

impl LayoutData {
    pub(crate) fn is_rtl(&self) -> bool {
        self.base_level & 1 != 0
    }

    /// Sum of full cluster advances over a cluster range.
    pub(crate) fn cluster_advance(&self, range: Range<usize>) -> f32 {
        self.clusters[range].iter().map(|c| c.full_advance()).sum()
    }
}

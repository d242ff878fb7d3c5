// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable layout result and its read-only views.

pub(crate) mod alignment;
pub(crate) mod bounds;
pub(crate) mod data;
pub(crate) mod justify;
pub(crate) mod line_break;
pub(crate) mod metrics;
pub(crate) mod optimal;

use core::ops::Range;

pub use alignment::Alignment;
pub use bounds::WidthModel;
pub use data::{BreakReason, EndHyphenEdit, LineMetrics, RunMetrics};
pub use justify::JustificationMode;
pub use metrics::MinimumFontMetrics;
pub use optimal::BreakStrategy;

use data::{LayoutData, LineData, LineItemData};

use crate::shape::Rect;

/// An immutable sequence of positioned lines.
///
/// Built once by [`LayoutBuilder`](crate::LayoutBuilder); safe to read
/// from multiple threads concurrently. All offsets are code point
/// indices into the source paragraph.
#[derive(Clone, Debug)]
pub struct Layout {
    pub(crate) data: LayoutData,
}

impl Layout {
    /// The wrap width the layout was built with.
    pub fn width(&self) -> f32 {
        self.data.width
    }

    /// Total height of all lines.
    pub fn height(&self) -> f32 {
        self.data.height
    }

    /// True if the base direction of the layout is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.data.is_rtl()
    }

    pub fn line_count(&self) -> usize {
        self.data.lines.len()
    }

    /// Returns the line at the specified index.
    pub fn get(&self, index: usize) -> Option<Line<'_>> {
        Some(Line {
            layout: self,
            data: self.data.lines.get(index)?,
        })
    }

    /// Returns an iterator over the lines in the layout.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> + '_ + Clone {
        self.data.lines.iter().map(move |data| Line { layout: self, data })
    }

    /// The line containing a code point offset.
    pub fn line_for_offset(&self, offset: usize) -> Option<Line<'_>> {
        let index = match self
            .data
            .lines
            .binary_search_by(|line| line.text_range.start.cmp(&offset))
        {
            Ok(index) => index,
            Err(0) => return None,
            Err(index) => index - 1,
        };
        self.get(index)
    }

    /// Union of every line's ink box at its aligned position.
    ///
    /// Empty when no line carries ink.
    pub fn compute_drawing_bounding_box(&self) -> Rect {
        let mut bbox = Rect::EMPTY;
        for line in &self.data.lines {
            let metrics = &line.metrics;
            if metrics.ink.is_empty() {
                continue;
            }
            bbox = bbox.union(
                &metrics
                    .ink
                    .translate(metrics.offset, metrics.baseline),
            );
        }
        bbox
    }

    /// Horizontal shift a renderer must apply so no ink is clipped on the
    /// left edge. Paragraph-global and never negative.
    pub fn drawing_horizontal_offset(&self) -> f32 {
        let bbox = self.compute_drawing_bounding_box();
        if bbox.is_empty() {
            return 0.0;
        }
        (-bbox.x0).max(0.0)
    }
}

/// A single visual line within a layout.
#[derive(Copy, Clone)]
pub struct Line<'a> {
    layout: &'a Layout,
    data: &'a LineData,
}

impl<'a> Line<'a> {
    /// First code point of the line.
    pub fn start(&self) -> usize {
        self.data.text_range.start
    }

    /// End of the line, exclusive. Equals the next line's start; the last
    /// line ends at the paragraph length even when ellipsized.
    pub fn end(&self) -> usize {
        self.data.text_range.end
    }

    /// Where drawn content stops: excludes an ellipsized tail.
    pub fn visible_end(&self) -> usize {
        self.data.visible_end
    }

    pub fn text_range(&self) -> Range<usize> {
        self.data.text_range.clone()
    }

    pub fn metrics(&self) -> &LineMetrics {
        &self.data.metrics
    }

    /// Full line width under the active width model, trailing whitespace
    /// included.
    pub fn width(&self) -> f32 {
        self.data.metrics.width
    }

    /// Line width over the visible extent only.
    pub fn max_extent(&self) -> f32 {
        self.data.metrics.max_width
    }

    pub fn advance(&self) -> f32 {
        self.data.metrics.advance
    }

    pub fn ascent(&self) -> f32 {
        self.data.metrics.ascent
    }

    pub fn descent(&self) -> f32 {
        self.data.metrics.descent
    }

    pub fn baseline(&self) -> f32 {
        self.data.metrics.baseline
    }

    /// Horizontal offset applied by alignment.
    pub fn offset(&self) -> f32 {
        self.data.metrics.offset
    }

    pub fn break_reason(&self) -> BreakReason {
        self.data.break_reason
    }

    pub fn end_hyphen(&self) -> EndHyphenEdit {
        self.data.end_hyphen
    }

    pub fn is_ellipsized(&self) -> bool {
        self.data.ellipsized
    }

    /// Number of justification units the line received.
    pub fn justify_units(&self) -> usize {
        self.data.justify_units
    }

    /// Returns an iterator over the runs of the line, in visual order.
    pub fn runs(&self) -> impl Iterator<Item = LineRun<'a>> + '_ + Clone {
        let layout = self.layout;
        layout.data.line_items[self.data.item_range.clone()]
            .iter()
            .map(move |item| LineRun { layout, item })
    }
}

/// A same-direction slice of a run on one line.
#[derive(Copy, Clone)]
pub struct LineRun<'a> {
    layout: &'a Layout,
    item: &'a LineItemData,
}

impl LineRun<'_> {
    /// Code point range in logical order.
    pub fn text_range(&self) -> Range<usize> {
        self.item.text_range.clone()
    }

    pub fn is_rtl(&self) -> bool {
        self.item.bidi_level & 1 != 0
    }

    pub fn bidi_level(&self) -> u8 {
        self.item.bidi_level
    }

    /// Advance of the slice, justification included.
    pub fn advance(&self) -> f32 {
        self.item.advance
    }

    /// Per-cluster advances in logical order, justification included.
    pub fn cluster_advances(&self) -> impl Iterator<Item = f32> + '_ {
        self.layout.data.clusters[self.item.cluster_range.clone()]
            .iter()
            .map(|c| c.full_advance())
    }
}

// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width and ink-extent computation: the advance-based and bounds-based
//! width models.

use core::ops::Range;

use smallvec::SmallVec;

use crate::bidi::reorder_visual_runs;
use crate::layout::data::{ClusterData, LayoutData, LineData};
use crate::shape::Rect;

/// Which width model the layout uses.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum WidthModel {
    /// Line width is the sum of cluster advances.
    #[default]
    Advance,
    /// Line width also accounts for glyph ink that overshoots the
    /// advance, on either side.
    Bounds,
}

/// Horizontal extent of a cluster sequence laid out in visual order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Extent {
    /// Sum of full cluster advances.
    pub(crate) advance: f32,
    /// Leftmost ink coordinate, relative to the visual origin.
    pub(crate) ink_left: f32,
    /// Rightmost ink coordinate, relative to the visual origin.
    pub(crate) ink_right: f32,
}

impl Extent {
    const EMPTY: Self = Self {
        advance: 0.0,
        ink_left: f32::INFINITY,
        ink_right: f32::NEG_INFINITY,
    };

    fn has_ink(&self) -> bool {
        self.ink_left <= self.ink_right
    }

    /// Occupied width: the advance end or the rightmost ink, whichever is
    /// further, extended left by any ink overshooting the origin. Ink
    /// never shrinks the width below the advance.
    pub(crate) fn width(&self) -> f32 {
        if !self.has_ink() {
            return self.advance;
        }
        self.advance.max(self.ink_right) - self.ink_left.min(0.0)
    }
}

/// A same-level slice of clusters, the unit of visual reordering.
pub(crate) type VisualSlice = (u8, Range<usize>);

/// Splits a logical cluster range into per-run slices and reorders them
/// into visual order.
pub(crate) fn visual_slices(data: &LayoutData, clusters: Range<usize>) -> SmallVec<[VisualSlice; 4]> {
    let mut slices: SmallVec<[VisualSlice; 4]> = SmallVec::new();
    for run in &data.runs {
        let start = run.cluster_range.start.max(clusters.start);
        let end = run.cluster_range.end.min(clusters.end);
        if start < end {
            slices.push((run.bidi_level, start..end));
        }
    }
    reorder_visual_runs(&mut slices, |slice| slice.0);
    slices
}

/// Measures a logical cluster range, accumulating ink at visual
/// positions.
fn measure(data: &LayoutData, clusters: Range<usize>) -> Extent {
    let mut extent = Extent::EMPTY;
    let mut x = 0.0f32;
    for (level, slice) in visual_slices(data, clusters) {
        // Clusters inside an odd-level slice run visually right to left:
        // the logically first cluster is the rightmost.
        let run = &data.clusters[slice];
        let mut place = |cluster: &ClusterData| {
            if !cluster.ink.is_empty() {
                extent.ink_left = extent.ink_left.min(x + cluster.ink.x0);
                extent.ink_right = extent.ink_right.max(x + cluster.ink.x1);
            }
            x += cluster.full_advance();
        };
        if level & 1 != 0 {
            run.iter().rev().for_each(&mut place);
        } else {
            run.iter().for_each(&mut place);
        }
    }
    extent.advance = x;
    extent
}

/// Trims trailing whitespace (in logical order) off a cluster range.
pub(crate) fn trim_trailing_whitespace(data: &LayoutData, clusters: Range<usize>) -> Range<usize> {
    let mut end = clusters.end;
    while end > clusters.start && data.clusters[end - 1].whitespace {
        end -= 1;
    }
    clusters.start..end
}

/// Width the line breaker must fit into the wrap width: the extent of the
/// range with trailing whitespace removed (whitespace always hangs), plus
/// the advance of a hyphen glyph when breaking at a hyphenation point.
///
/// Under the advance model ink is ignored entirely.
pub(crate) fn fit_extent(
    data: &LayoutData,
    clusters: Range<usize>,
    model: WidthModel,
    hyphen_advance: f32,
) -> f32 {
    let visible = trim_trailing_whitespace(data, clusters);
    match model {
        WidthModel::Advance => data.cluster_advance(visible) + hyphen_advance,
        WidthModel::Bounds => measure(data, visible).width() + hyphen_advance,
    }
}

/// Computes a committed line's horizontal geometry: advance, width,
/// visible width and ink box.
///
/// Runs after reordering and justification. The full width includes the
/// line's trailing whitespace (which sits at the visual left on a
/// right-to-left line); the visible width does not.
pub(crate) fn compute_line_geometry(data: &mut LayoutData, line_idx: usize, model: WidthModel) {
    let line = &data.lines[line_idx];
    let logical = logical_cluster_range(data, line);
    let extra = line.hyphen_advance + line.ellipsis_advance;

    let full = measure(data, logical.clone());
    let visible = measure(data, trim_trailing_whitespace(data, logical.clone()));

    let trailing_whitespace = full.advance - visible.advance;
    let advance = full.advance + extra;

    let (width, max_width) = match model {
        WidthModel::Advance => (advance, visible.advance + extra),
        WidthModel::Bounds => {
            let mut full = full;
            let mut visible = visible;
            full.advance += extra;
            visible.advance += extra;
            (full.width(), visible.width())
        }
    };

    // The vertical ink extent comes from the clusters themselves; the
    // aggregated ascent and descent may be looser than the actual ink.
    let ink = if full.has_ink() {
        let mut y0 = f32::INFINITY;
        let mut y1 = f32::NEG_INFINITY;
        for cluster in &data.clusters[logical.clone()] {
            if !cluster.ink.is_empty() {
                y0 = y0.min(cluster.ink.y0);
                y1 = y1.max(cluster.ink.y1);
            }
        }
        Rect {
            x0: full.ink_left,
            y0,
            x1: full.ink_right,
            y1,
        }
    } else {
        Rect::EMPTY
    };

    let metrics = &mut data.lines[line_idx].metrics;
    metrics.advance = advance;
    metrics.trailing_whitespace = trailing_whitespace;
    metrics.width = width;
    metrics.max_width = max_width;
    metrics.ink = ink;
}

/// Logical cluster range covered by a line's items (items themselves may
/// be in visual order).
pub(crate) fn logical_cluster_range(data: &LayoutData, line: &LineData) -> Range<usize> {
    let mut start = usize::MAX;
    let mut end = 0;
    for item in &data.line_items[line.item_range.clone()] {
        start = start.min(item.cluster_range.start);
        end = end.max(item.cluster_range.end);
    }
    if start > end {
        return 0..0;
    }
    start..end
}

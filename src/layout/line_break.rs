// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use core::ops::Range;

use tracing::trace;

use crate::bidi::reorder_visual_runs;
use crate::layout::bounds::{self, WidthModel};
use crate::layout::data::{
    BreakReason, EndHyphenEdit, LayoutData, LineData, LineItemData,
};

/// Break opportunity before a code point, resolved from segmentation and
/// span filtering. Indexed by code point; entry `text_len` covers the
/// paragraph end.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum Boundary {
    #[default]
    None,
    /// A normal opportunity.
    Soft,
    /// A forced break after a newline-class character.
    Mandatory,
    /// An opportunity that requires inserting a hyphen glyph.
    Hyphen,
}

/// The line under construction.
#[derive(Clone, Default)]
struct LineState {
    clusters: Range<usize>,
    /// Advance of everything on the line, trailing whitespace included.
    x: f32,
    /// Advance at the end of the last non-whitespace cluster.
    visible_advance: f32,
    /// Streaming ink extents over visible clusters. Only valid while
    /// `uniform_ltr` holds.
    ink_left: f32,
    ink_right: f32,
    /// True while every cluster on the line has bidi level zero, so
    /// visual order equals logical order.
    uniform_ltr: bool,
}

impl LineState {
    fn new(cluster_start: usize) -> Self {
        Self {
            clusters: cluster_start..cluster_start,
            x: 0.0,
            visible_advance: 0.0,
            ink_left: f32::INFINITY,
            ink_right: f32::NEG_INFINITY,
            uniform_ltr: true,
        }
    }

    fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Iteration state stored at a break opportunity so the breaker can
/// revert to it when a later cluster overflows.
struct PrevBoundaryState {
    cluster_idx: usize,
    state: LineState,
    hyphen: bool,
    hyphen_advance: f32,
}

#[derive(Default)]
struct BreakerState {
    /// Iteration state: the current cluster.
    cluster_idx: usize,
    line: LineState,
    prev_boundary: Option<PrevBoundaryState>,
}

/// Line breaking support for a paragraph.
///
/// Produces one line per `break_next` call so the caller can vary the
/// maximum advance per line (indents).
pub(crate) struct BreakLines<'a> {
    data: &'a mut LayoutData,
    boundaries: &'a [Boundary],
    model: WidthModel,
    /// Advance of the hyphen glyph, per style index.
    hyphen_advances: &'a [f32],
    state: BreakerState,
    done: bool,
}

impl<'a> BreakLines<'a> {
    pub(crate) fn new(
        data: &'a mut LayoutData,
        boundaries: &'a [Boundary],
        model: WidthModel,
        hyphen_advances: &'a [f32],
    ) -> Self {
        data.lines.clear();
        data.line_items.clear();
        Self {
            data,
            boundaries,
            model,
            hyphen_advances,
            state: BreakerState::default(),
            done: false,
        }
    }

    /// Cluster index the next line will start at.
    pub(crate) fn cluster_cursor(&self) -> usize {
        self.state.cluster_idx
    }

    /// Computes the next line. Returns its index, or `None` when all text
    /// has been placed.
    pub(crate) fn break_next(&mut self, max_advance: f32) -> Option<usize> {
        if self.done {
            return None;
        }

        let cluster_count = self.data.clusters.len();
        while self.state.cluster_idx < cluster_count {
            let cluster_idx = self.state.cluster_idx;
            let cluster_text = self.data.clusters[cluster_idx].text_range.clone();
            let is_whitespace = self.data.clusters[cluster_idx].whitespace;
            let boundary = self.boundaries[cluster_text.start];

            match boundary {
                Boundary::Soft if !self.state.line.is_empty() => {
                    self.state.prev_boundary = Some(PrevBoundaryState {
                        cluster_idx,
                        state: self.state.line.clone(),
                        hyphen: false,
                        hyphen_advance: 0.0,
                    });
                }
                Boundary::Hyphen if !self.state.line.is_empty() => {
                    // A hyphenated candidate only counts if it still fits
                    // once the hyphen glyph is added.
                    let hyphen_advance = self.hyphen_advance_before(cluster_idx);
                    let candidate = self.state.line.clusters.start..cluster_idx;
                    let extent =
                        bounds::fit_extent(self.data, candidate, self.model, hyphen_advance);
                    if extent <= max_advance {
                        self.state.prev_boundary = Some(PrevBoundaryState {
                            cluster_idx,
                            state: self.state.line.clone(),
                            hyphen: true,
                            hyphen_advance,
                        });
                    }
                }
                _ => {}
            }

            self.append_cluster(cluster_idx);

            // A mandatory break applies after the newline cluster, which
            // trails the committed line.
            if self.boundaries[cluster_text.end] == Boundary::Mandatory {
                self.commit_line(max_advance, BreakReason::Explicit, EndHyphenEdit::NoEdit, 0.0);
                return self.start_new_line();
            }

            // Whitespace always hangs; it never overflows a line.
            if is_whitespace || self.fits(max_advance) {
                continue;
            }

            // Overflow. Take the most recent opportunity if there is one.
            if let Some(prev) = self.state.prev_boundary.take() {
                self.state.line = prev.state;
                let hyphen = if prev.hyphen {
                    EndHyphenEdit::InsertHyphen
                } else {
                    EndHyphenEdit::NoEdit
                };
                self.commit_line(max_advance, BreakReason::Regular, hyphen, prev.hyphen_advance);
                self.state.cluster_idx = prev.cluster_idx;
                return self.start_new_line();
            }

            // No opportunity: break at the cluster boundary, keeping at
            // least one cluster so the breaker always makes progress.
            if self.state.line.clusters.len() > 1 {
                self.state.line.clusters.end -= 1;
                self.commit_line(max_advance, BreakReason::Emergency, EndHyphenEdit::NoEdit, 0.0);
                self.state.cluster_idx = cluster_idx;
                return self.start_new_line();
            }

            // A single cluster wider than the wrap width: accept the
            // overflow and keep going.
        }

        // Final line, possibly empty (paragraph ending in a newline).
        self.commit_line(max_advance, BreakReason::None, EndHyphenEdit::NoEdit, 0.0);
        self.done = true;
        self.start_new_line()
    }

    fn append_cluster(&mut self, cluster_idx: usize) {
        let cluster = &self.data.clusters[cluster_idx];
        let level = self.level_of(cluster_idx);
        let line = &mut self.state.line;
        if level != 0 {
            line.uniform_ltr = false;
        }
        if !cluster.whitespace {
            if !cluster.ink.is_empty() {
                line.ink_left = line.ink_left.min(line.x + cluster.ink.x0);
                line.ink_right = line.ink_right.max(line.x + cluster.ink.x1);
            }
            line.visible_advance = line.x + cluster.advance;
        }
        line.x += cluster.advance;
        line.clusters.end = cluster_idx + 1;
        self.state.cluster_idx = cluster_idx + 1;
    }

    /// Whether the current line's visible extent fits the wrap width.
    fn fits(&self, max_advance: f32) -> bool {
        let line = &self.state.line;
        match self.model {
            WidthModel::Advance => line.visible_advance <= max_advance,
            WidthModel::Bounds if line.uniform_ltr => {
                let width = if line.ink_left <= line.ink_right {
                    line.visible_advance.max(line.ink_right) - line.ink_left.min(0.0)
                } else {
                    line.visible_advance
                };
                width <= max_advance
            }
            WidthModel::Bounds => {
                bounds::fit_extent(self.data, line.clusters.clone(), self.model, 0.0)
                    <= max_advance
            }
        }
    }

    fn level_of(&self, cluster_idx: usize) -> u8 {
        // Runs are short in number; scan from the last known position.
        self.data
            .runs
            .iter()
            .find(|run| run.cluster_range.contains(&cluster_idx))
            .map(|run| run.bidi_level)
            .unwrap_or_default()
    }

    /// Hyphen advance for the style in effect at the cluster before a
    /// break opportunity.
    fn hyphen_advance_before(&self, cluster_idx: usize) -> f32 {
        self.data
            .runs
            .iter()
            .find(|run| run.cluster_range.contains(&(cluster_idx.saturating_sub(1))))
            .map(|run| self.hyphen_advances[run.style_index as usize])
            .unwrap_or_default()
    }

    fn commit_line(
        &mut self,
        max_advance: f32,
        break_reason: BreakReason,
        end_hyphen: EndHyphenEdit,
        hyphen_advance: f32,
    ) {
        push_line(
            self.data,
            self.state.line.clusters.clone(),
            max_advance,
            break_reason,
            end_hyphen,
            hyphen_advance,
        );
    }

    /// Resets per-line state after a commit.
    fn start_new_line(&mut self) -> Option<usize> {
        self.state.line = LineState::new(self.state.cluster_idx);
        self.state.prev_boundary = None;
        Some(self.data.lines.len() - 1)
    }
}

/// Commits a cluster range as a line: slices the runs it covers into
/// line items, reorders them into visual order and pushes the line data.
pub(crate) fn push_line(
    data: &mut LayoutData,
    clusters: Range<usize>,
    max_advance: f32,
    break_reason: BreakReason,
    end_hyphen: EndHyphenEdit,
    hyphen_advance: f32,
) -> usize {
    let item_start = data.line_items.len();

    let mut needs_reorder = false;
    for (run_index, run) in data.runs.iter().enumerate() {
        let start = run.cluster_range.start.max(clusters.start);
        let end = run.cluster_range.end.min(clusters.end);
        if start >= end {
            continue;
        }
        let slice = &data.clusters[start..end];
        let text_range = slice[0].text_range.start..slice[slice.len() - 1].text_range.end;
        let is_whitespace = slice.iter().all(|c| c.whitespace);
        let has_trailing_whitespace = slice.last().is_some_and(|c| c.whitespace);
        if run.bidi_level != 0 {
            needs_reorder = true;
        }
        data.line_items.push(LineItemData {
            run_index,
            bidi_level: run.bidi_level,
            advance: slice.iter().map(|c| c.advance).sum(),
            is_whitespace,
            has_trailing_whitespace,
            text_range,
            cluster_range: start..end,
        });
    }
    let item_range = item_start..data.line_items.len();

    if needs_reorder && item_range.len() > 1 {
        reorder_visual_runs(&mut data.line_items[item_range.clone()], |item| {
            item.bidi_level
        });
    }

    let text_range = if item_range.is_empty() {
        data.text_len..data.text_len
    } else {
        let mut start = usize::MAX;
        let mut end = 0;
        for item in &data.line_items[item_range.clone()] {
            start = start.min(item.text_range.start);
            end = end.max(item.text_range.end);
        }
        start..end
    };

    trace!(
        line = data.lines.len(),
        start = text_range.start,
        end = text_range.end,
        ?break_reason,
        "committed line"
    );

    data.lines.push(LineData {
        visible_end: text_range.end,
        text_range,
        item_range,
        break_reason,
        end_hyphen,
        hyphen_advance,
        max_advance,
        ..LineData::default()
    });
    data.lines.len() - 1
}

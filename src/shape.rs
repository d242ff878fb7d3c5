// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement interface consumed by the layout engine.
//!
//! Font shaping is an external collaborator: the engine hands a
//! [`MetricsProvider`] a sub-range of the paragraph and a direction, and gets
//! back cluster boundaries, per-cluster advances, ink bounds and vertical
//! font metrics. The engine never inspects glyphs itself.

use core::ops::Range;

use crate::style::ResolvedSpanStyle;

/// An axis-aligned rectangle in layout units.
///
/// Used for per-cluster ink bounds (relative to the cluster origin on the
/// baseline) and for whole-layout drawing bounding boxes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// The empty rectangle. Unioning with it is a no-op.
    pub const EMPTY: Self = Self {
        x0: f32::INFINITY,
        y0: f32::INFINITY,
        x1: f32::NEG_INFINITY,
        y1: f32::NEG_INFINITY,
    };

    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Returns `true` if the rectangle contains no area.
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    pub fn width(&self) -> f32 {
        if self.is_empty() { 0. } else { self.x1 - self.x0 }
    }

    pub fn height(&self) -> f32 {
        if self.is_empty() { 0. } else { self.y1 - self.y0 }
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// The rectangle translated by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A request to shape one directionally-uniform, style-uniform sub-range of
/// the paragraph.
#[derive(Clone, Debug)]
pub struct ShapeRequest<'a> {
    /// Full paragraph text.
    pub text: &'a str,
    /// Code point range of the sub-run to shape.
    pub range: Range<usize>,
    /// `true` if the sub-run is right-to-left.
    pub rtl: bool,
    /// Style resolved from the paragraph's spans for this range.
    pub style: &'a ResolvedSpanStyle,
}

/// The smallest indivisible shaping unit.
///
/// A cluster may span multiple code points: ligatures merge letters, and
/// combining marks, variation selectors and emoji modifier sequences attach
/// to their base character. Clusters are the unit of justification.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedCluster {
    /// Code point range covered by the cluster, in logical order.
    pub range: Range<usize>,
    /// Nominal advance the cluster reserves for subsequent layout.
    pub advance: f32,
    /// Ink bounds relative to the cluster origin on the baseline. May start
    /// before x = 0 or extend past `advance` (overshoot).
    pub ink: Rect,
    /// `true` for space-like clusters eligible for inter-word justification
    /// and trailing-whitespace hanging.
    pub whitespace: bool,
}

/// Result of shaping one sub-run: logical-order clusters plus the font's
/// vertical metrics.
#[derive(Clone, Debug, Default)]
pub struct ShapedRun {
    /// Clusters in logical order, covering the requested range exactly.
    pub clusters: Vec<ShapedCluster>,
    /// Distance above the baseline, negative by convention.
    pub ascent: f32,
    /// Distance below the baseline, positive.
    pub descent: f32,
    /// The font's standard leading (external padding).
    pub leading: f32,
    /// Most negative ascent among fallback fonts used in the run, if any.
    /// Only consulted when fallback line spacing is enabled.
    pub fallback_ascent: Option<f32>,
    /// Largest descent among fallback fonts used in the run, if any.
    pub fallback_descent: Option<f32>,
}

impl ShapedRun {
    /// Sum of the cluster advances.
    pub fn advance(&self) -> f32 {
        self.clusters.iter().map(|c| c.advance).sum()
    }
}

/// Text measurement and shaping provider.
///
/// Implementations are expected to be pure, deterministic functions of
/// `(text, style, direction)`; the engine may shape the same range more than
/// once and assumes identical results.
pub trait MetricsProvider {
    /// Shapes a directionally-uniform sub-range of the paragraph.
    fn shape(&self, request: &ShapeRequest<'_>) -> ShapedRun;

    /// Advance of the hyphen glyph appended when a line breaks at a
    /// hyphenation point.
    fn hyphen_advance(&self, style: &ResolvedSpanStyle) -> f32 {
        let _ = style;
        0.0
    }

    /// Advance of the ellipsis glyph substituted on a truncated line.
    fn ellipsis_advance(&self, style: &ResolvedSpanStyle) -> f32 {
        let _ = style;
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_with_empty_is_identity() {
        let r = Rect::new(-2.0, 0.0, 5.0, 10.0);
        assert_eq!(r.union(&Rect::EMPTY), r);
        assert_eq!(Rect::EMPTY.union(&r), r);
        assert!(Rect::EMPTY.union(&Rect::EMPTY).is_empty());
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 4.0, 1.0);
        let b = Rect::new(-1.5, 0.5, 3.0, 2.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(-1.5, 0.0, 4.0, 2.0));
        assert_eq!(u.width(), 5.5);
        assert_eq!(u.height(), 2.0);
    }

    #[test]
    fn translate_moves_ink() {
        let r = Rect::new(-1.0, 0.0, 2.0, 1.0).translate(10.0, 5.0);
        assert_eq!(r, Rect::new(9.0, 5.0, 12.0, 6.0));
        assert!(Rect::EMPTY.translate(10.0, 5.0).is_empty());
    }
}

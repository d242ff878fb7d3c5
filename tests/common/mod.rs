// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic fixtures shared by the integration tests.

use std::ops::Range;

use paraline::{
    BreakKind, BreakOpportunity, IcuSegmenter, LineBreakStyle, MetricsProvider, Rect,
    ResolvedSpanStyle, ResolvedWordStyle, Segmentation, ShapeRequest, ShapedCluster, ShapedRun,
};

/// Advance of one code point at the default size.
pub const EM: f32 = 10.0;

/// A synthetic font where every code point is one cluster of `EM`
/// advance, with an ascent of `EM` and no descent or leading.
///
/// Specific letters carry ink that overshoots the advance box:
/// `b`/`c`/`d` overshoot to the right by 5, 10 and 15 units, and
/// `e`/`f`/`g` overshoot to the left by the same amounts. Dalet (`ד`)
/// overshoots to the right by 15 for right-to-left cases. Whitespace
/// has no ink.
pub struct BlockFont;

impl MetricsProvider for BlockFont {
    fn shape(&self, request: &ShapeRequest<'_>) -> ShapedRun {
        let em = EM * request.style.relative_size;
        let clusters = request
            .text
            .chars()
            .enumerate()
            .skip(request.range.start)
            .take(request.range.len())
            .map(|(offset, ch)| {
                let ink = match ch {
                    _ if ch.is_whitespace() => Rect::EMPTY,
                    'b' => Rect::new(0.0, -em, em + 5.0, 0.0),
                    'c' => Rect::new(0.0, -em, em + 10.0, 0.0),
                    'd' | '\u{05D3}' => Rect::new(0.0, -em, em + 15.0, 0.0),
                    'e' => Rect::new(-5.0, -em, em, 0.0),
                    'f' => Rect::new(-10.0, -em, em, 0.0),
                    'g' => Rect::new(-15.0, -em, em, 0.0),
                    _ => Rect::new(0.0, -em, em, 0.0),
                };
                ShapedCluster {
                    range: offset..offset + 1,
                    advance: em,
                    ink,
                    whitespace: ch.is_whitespace(),
                }
            })
            .collect();
        ShapedRun {
            clusters,
            ascent: -em,
            descent: 0.0,
            leading: 0.0,
            fallback_ascent: None,
            fallback_descent: None,
        }
    }

    fn hyphen_advance(&self, style: &ResolvedSpanStyle) -> f32 {
        5.0 * style.relative_size
    }

    fn ellipsis_advance(&self, style: &ResolvedSpanStyle) -> f32 {
        EM * style.relative_size
    }
}

/// The real ICU segmenter, with synthetic hyphenation points at the
/// midpoint of every word of four or more bytes.
pub struct HyphenatingSegmenter(pub IcuSegmenter);

impl HyphenatingSegmenter {
    pub fn new() -> Self {
        Self(IcuSegmenter::new())
    }
}

impl Segmentation for HyphenatingSegmenter {
    fn line_breaks(
        &self,
        text: &str,
        style: LineBreakStyle,
        word_style: ResolvedWordStyle,
        locale: Option<&str>,
    ) -> Vec<BreakOpportunity> {
        self.0.line_breaks(text, style, word_style, locale)
    }

    fn hyphenation_points(
        &self,
        _text: &str,
        word: Range<usize>,
        _locale: Option<&str>,
    ) -> Vec<usize> {
        if word.len() >= 4 {
            vec![word.start + word.len() / 2]
        } else {
            Vec::new()
        }
    }
}

/// A segmenter with hand-scripted soft break offsets per word style.
///
/// Offsets are byte offsets; tests use ASCII so they coincide with code
/// point indices. The end of text is always an opportunity.
pub struct ScriptedSegmenter {
    pub normal: Vec<usize>,
    pub phrase: Vec<usize>,
}

impl Segmentation for ScriptedSegmenter {
    fn line_breaks(
        &self,
        text: &str,
        _style: LineBreakStyle,
        word_style: ResolvedWordStyle,
        _locale: Option<&str>,
    ) -> Vec<BreakOpportunity> {
        let offsets = match word_style {
            ResolvedWordStyle::Normal => &self.normal,
            ResolvedWordStyle::Phrase => &self.phrase,
        };
        let mut breaks: Vec<BreakOpportunity> = offsets
            .iter()
            .map(|&offset| BreakOpportunity {
                offset,
                kind: BreakKind::Soft,
            })
            .collect();
        breaks.push(BreakOpportunity {
            offset: text.len(),
            kind: BreakKind::Soft,
        });
        breaks
    }
}

/// Text ranges of all lines, for partition assertions.
pub fn line_ranges(layout: &paraline::Layout) -> Vec<(usize, usize)> {
    layout.lines().map(|l| (l.start(), l.end())).collect()
}

// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Break opportunity discovery: the `Segmentation` trait and the bundled
//! ICU4X-backed implementation.

use core::ops::Range;

use icu_segmenter::options::{LineBreakOptions, LineBreakStrictness};
use icu_segmenter::{
    GraphemeClusterSegmenter, GraphemeClusterSegmenterBorrowed, LineSegmenter,
    LineSegmenterBorrowed,
};

use crate::style::LineBreakStyle;

/// How a break opportunity was produced.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BreakKind {
    /// A forced break after a newline-class character. The breaker must
    /// take it.
    Mandatory,
    /// A normal UAX#14 opportunity.
    Soft,
    /// An intra-word opportunity that requires inserting a hyphen glyph.
    Hyphen,
}

/// A position the line breaker may end a line at.
///
/// `offset` is a byte offset into the text handed to [`Segmentation`];
/// the paragraph converts to code point indices.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BreakOpportunity {
    pub offset: usize,
    pub kind: BreakKind,
}

/// Word-level breaking granularity after auto resolution.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum ResolvedWordStyle {
    #[default]
    Normal,
    /// Keep phrases together: only opportunities preceded by whitespace
    /// (and mandatory ones) survive.
    Phrase,
}

/// Source of break opportunities and boundary data.
///
/// Implementations must be deterministic pure functions of their inputs.
pub trait Segmentation {
    /// All break opportunities in `text`, in ascending offset order,
    /// excluding offset zero and including `text.len()`.
    fn line_breaks(
        &self,
        text: &str,
        style: LineBreakStyle,
        word_style: ResolvedWordStyle,
        locale: Option<&str>,
    ) -> Vec<BreakOpportunity>;

    /// Grapheme cluster boundaries in `text`, including 0 and `text.len()`.
    ///
    /// The default reports every code point boundary.
    fn graphemes(&self, text: &str) -> Vec<usize> {
        let mut boundaries: Vec<usize> =
            text.char_indices().map(|(offset, _)| offset).collect();
        boundaries.push(text.len());
        boundaries
    }

    /// Valid hyphen insertion points inside `word`, as byte offsets into
    /// `text`. Empty when the implementation has no pattern data for the
    /// locale.
    fn hyphenation_points(
        &self,
        _text: &str,
        _word: Range<usize>,
        _locale: Option<&str>,
    ) -> Vec<usize> {
        Vec::new()
    }
}

/// Characters that force a line break after themselves.
pub(crate) fn is_mandatory_break_char(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{2028}' | '\u{2029}'
    )
}

/// The bundled `Segmentation` implementation, backed by `icu_segmenter`
/// compiled data.
pub struct IcuSegmenter {
    /// One line segmenter per strictness; `LineBreakStyle::None` uses the
    /// data default.
    line_default: LineSegmenterBorrowed<'static>,
    line_loose: LineSegmenterBorrowed<'static>,
    line_normal: LineSegmenterBorrowed<'static>,
    line_strict: LineSegmenterBorrowed<'static>,
    grapheme: GraphemeClusterSegmenterBorrowed<'static>,
}

impl IcuSegmenter {
    pub fn new() -> Self {
        let with_strictness = |strictness| {
            let mut options = LineBreakOptions::default();
            options.strictness = strictness;
            LineSegmenter::new_auto(options)
        };
        Self {
            line_default: with_strictness(None),
            line_loose: with_strictness(Some(LineBreakStrictness::Loose)),
            line_normal: with_strictness(Some(LineBreakStrictness::Normal)),
            line_strict: with_strictness(Some(LineBreakStrictness::Strict)),
            grapheme: GraphemeClusterSegmenter::new(),
        }
    }

    fn segmenter_for(
        &self,
        style: LineBreakStyle,
        locale: Option<&str>,
    ) -> LineSegmenterBorrowed<'static> {
        let style = match style {
            // CSS `line-break: auto` resolves by content language; strict
            // kinsoku for Japanese, normal everywhere else.
            LineBreakStyle::Auto => {
                if locale.is_some_and(|l| l == "ja" || l.starts_with("ja-")) {
                    LineBreakStyle::Strict
                } else {
                    LineBreakStyle::Normal
                }
            }
            other => other,
        };
        match style {
            LineBreakStyle::None => self.line_default,
            LineBreakStyle::Loose => self.line_loose,
            LineBreakStyle::Normal => self.line_normal,
            LineBreakStyle::Strict => self.line_strict,
            LineBreakStyle::Auto => unreachable!(),
        }
    }
}

impl Default for IcuSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmentation for IcuSegmenter {
    fn line_breaks(
        &self,
        text: &str,
        style: LineBreakStyle,
        word_style: ResolvedWordStyle,
        locale: Option<&str>,
    ) -> Vec<BreakOpportunity> {
        let segmenter = self.segmenter_for(style, locale);
        let mut opportunities = Vec::new();
        for offset in segmenter.segment_str(text) {
            if offset == 0 {
                continue;
            }
            let preceding = text[..offset]
                .chars()
                .next_back()
                .unwrap_or('\0');
            let kind = if is_mandatory_break_char(preceding) {
                BreakKind::Mandatory
            } else {
                BreakKind::Soft
            };
            if word_style == ResolvedWordStyle::Phrase
                && kind == BreakKind::Soft
                && offset < text.len()
                && !preceding.is_whitespace()
            {
                continue;
            }
            opportunities.push(BreakOpportunity { offset, kind });
        }
        opportunities
    }

    fn graphemes(&self, text: &str) -> Vec<usize> {
        self.grapheme.segment_str(text).collect()
    }
}

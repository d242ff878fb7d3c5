// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span attributes and their resolution into per-range styles.
//!
//! Spans are immutable range-tagged attributes attached to the paragraph at
//! construction. They are resolved into an ordered sequence of
//! non-overlapping style runs once, during layout setup, rather than being
//! consulted through any ambient lookup.

use core::ops::Range;

/// Line break strictness, mirroring CSS `line-break`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineBreakStyle {
    /// No style-based restriction; the segmenter's default rules apply.
    #[default]
    None,
    /// The least restrictive rule set, for short lines.
    Loose,
    /// The default rule set.
    Normal,
    /// Additionally forbids breaks between character-class pairs that
    /// `Normal` permits, such as a small kana or prolonged sound mark
    /// following its base.
    Strict,
    /// `Strict` when script metadata indicates a need for it, else `Normal`.
    Auto,
}

/// Script-dependent word grouping for line breaking.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineBreakWordStyle {
    /// Break at any opportunity the segmenter reports, down to grapheme
    /// granularity for scripts that permit it.
    #[default]
    None,
    /// Break only at phrase boundaries (whitespace and mandatory breaks).
    Phrase,
    /// Compute both; adopt the phrase result when it costs at most one
    /// extra line over the grapheme-level result.
    Auto,
}

/// Per-region line breaking configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBreakConfig {
    pub style: LineBreakStyle,
    pub word_style: LineBreakWordStyle,
}

impl LineBreakConfig {
    pub fn new(style: LineBreakStyle, word_style: LineBreakWordStyle) -> Self {
        Self { style, word_style }
    }
}

/// A style override attached to a half-open code point range of the
/// paragraph.
#[derive(Clone, Debug, PartialEq)]
pub enum SpanProperty {
    /// Forbid break opportunities strictly inside the range.
    NoBreak,
    /// Line break configuration override for the range.
    LineBreak(LineBreakConfig),
    /// Additional margin at the leading edge of lines starting in the range.
    LeadingMargin(f32),
    /// Font size multiplier relative to the base size.
    RelativeSize(f32),
    /// BCP-47 language tag for the range.
    Locale(String),
}

/// A [`SpanProperty`] with the range it applies to.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub range: Range<usize>,
    pub property: SpanProperty,
}

/// Fully resolved style for one contiguous range of the paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpanStyle {
    /// Font size multiplier.
    pub relative_size: f32,
    /// Language tag, if any span supplied one.
    pub locale: Option<String>,
    /// Effective line break configuration.
    pub line_break: LineBreakConfig,
    /// `true` if the range lies inside a no-break span.
    pub no_break: bool,
    /// Leading margin applied to lines that start in this range.
    pub leading_margin: f32,
}

impl Default for ResolvedSpanStyle {
    fn default() -> Self {
        Self {
            relative_size: 1.0,
            locale: None,
            line_break: LineBreakConfig::default(),
            no_break: false,
            leading_margin: 0.0,
        }
    }
}

impl ResolvedSpanStyle {
    fn apply(&mut self, property: &SpanProperty) {
        match property {
            SpanProperty::NoBreak => self.no_break = true,
            SpanProperty::LineBreak(config) => self.line_break = *config,
            SpanProperty::LeadingMargin(margin) => self.leading_margin = *margin,
            SpanProperty::RelativeSize(size) => self.relative_size = *size,
            SpanProperty::Locale(locale) => self.locale = Some(locale.clone()),
        }
    }
}

/// A maximal contiguous range sharing one resolved style.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StyleRun {
    pub(crate) range: Range<usize>,
    pub(crate) style_index: u16,
}

/// Resolves overlapping spans into a style table plus an ordered sequence of
/// non-overlapping style runs covering `0..len`.
///
/// Later spans win where they overlap earlier ones. Caller validates span
/// ranges first.
pub(crate) fn resolve_spans(
    spans: &[Span],
    len: usize,
) -> (Vec<ResolvedSpanStyle>, Vec<StyleRun>) {
    if len == 0 {
        return (vec![ResolvedSpanStyle::default()], Vec::new());
    }

    // Collect the distinct range endpoints, then fold every span into each
    // fragment it covers. Paragraph spans are few; quadratic in span count
    // is fine.
    let mut cuts: Vec<usize> = vec![0, len];
    for span in spans {
        if span.range.start < len {
            cuts.push(span.range.start);
        }
        if span.range.end <= len {
            cuts.push(span.range.end);
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut styles: Vec<ResolvedSpanStyle> = Vec::new();
    let mut runs: Vec<StyleRun> = Vec::new();
    for window in cuts.windows(2) {
        let range = window[0]..window[1];
        if range.is_empty() {
            continue;
        }
        let mut style = ResolvedSpanStyle::default();
        for span in spans {
            if span.range.start <= range.start && range.end <= span.range.end {
                style.apply(&span.property);
            }
        }
        // Coalesce adjacent fragments that resolved identically.
        if let (Some(last_run), Some(last_style)) = (runs.last_mut(), styles.last()) {
            if *last_style == style && last_run.range.end == range.start {
                last_run.range.end = range.end;
                continue;
            }
        }
        let style_index = match styles.iter().position(|s| *s == style) {
            Some(index) => index,
            None => {
                styles.push(style);
                styles.len() - 1
            }
        };
        runs.push(StyleRun {
            range,
            style_index: style_index as u16,
        });
    }
    (styles, runs)
}

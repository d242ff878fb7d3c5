// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout construction: configuration, validation and orchestration of
//! the breaking, justification, metrics and alignment passes.

use thiserror::Error;
use tracing::debug;

use crate::bidi::{self, TextDirection};
use crate::layout::alignment::{align_lines, Alignment};
use crate::layout::bounds::{self, WidthModel};
use crate::layout::data::{
    BreakReason, ClusterData, EndHyphenEdit, LayoutData, RunData, RunMetrics,
};
use crate::layout::justify::{justify_lines, JustificationMode};
use crate::layout::line_break::{push_line, Boundary, BreakLines};
use crate::layout::metrics::{
    aggregate_line_metrics, position_lines, MinimumFontMetrics, VerticalConfig,
};
use crate::layout::optimal::{break_optimal, BreakStrategy};
use crate::layout::Layout;
use crate::paragraph::Paragraph;
use crate::segment::{
    is_mandatory_break_char, BreakKind, ResolvedWordStyle, Segmentation,
};
use crate::shape::{MetricsProvider, ShapeRequest};
use crate::style::{
    resolve_spans, LineBreakStyle, LineBreakWordStyle, ResolvedSpanStyle, SpanProperty,
    StyleRun,
};

/// Where overflowing content is truncated.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum TruncateAt {
    /// Replace the overflowing tail of the last line with an ellipsis.
    End,
}

/// How aggressively words are hyphenated.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum HyphenationFrequency {
    #[default]
    None,
    Full,
}

/// Layout construction failure.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("wrap width must be a non-negative number, got {0}")]
    InvalidWidth(f32),
    #[error("span {start}..{end} is outside the paragraph (length {len})")]
    InvalidSpan {
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("invalid style value: {0}")]
    InvalidStyle(&'static str),
    #[error("ellipsized width must be a non-negative number, got {0}")]
    InvalidEllipsizedWidth(f32),
}

/// Builder for a [`Layout`].
///
/// Holds the paragraph and its collaborators by reference; all setters
/// are chainable.
pub struct LayoutBuilder<'a, M: MetricsProvider, S: Segmentation> {
    paragraph: &'a Paragraph,
    provider: &'a M,
    segmentation: &'a S,
    alignment: Alignment,
    text_direction: TextDirection,
    spacing_multiplier: f32,
    spacing_amount: f32,
    font_padding_included: bool,
    fallback_line_spacing: bool,
    ellipsize: Option<TruncateAt>,
    ellipsized_width: Option<f32>,
    max_lines: Option<usize>,
    break_strategy: BreakStrategy,
    hyphenation_frequency: HyphenationFrequency,
    indents_left: Vec<f32>,
    indents_right: Vec<f32>,
    justification_mode: JustificationMode,
    justify_trailing_whitespace: bool,
    line_break_style: LineBreakStyle,
    line_break_word_style: LineBreakWordStyle,
    minimum_font_metrics: Option<MinimumFontMetrics>,
    use_bounds_for_width: bool,
}

impl<'a, M: MetricsProvider, S: Segmentation> LayoutBuilder<'a, M, S> {
    pub fn new(paragraph: &'a Paragraph, provider: &'a M, segmentation: &'a S) -> Self {
        Self {
            paragraph,
            provider,
            segmentation,
            alignment: Alignment::Normal,
            text_direction: TextDirection::FirstStrongLtr,
            spacing_multiplier: 1.0,
            spacing_amount: 0.0,
            font_padding_included: true,
            fallback_line_spacing: false,
            ellipsize: None,
            ellipsized_width: None,
            max_lines: None,
            break_strategy: BreakStrategy::Simple,
            hyphenation_frequency: HyphenationFrequency::None,
            indents_left: Vec::new(),
            indents_right: Vec::new(),
            justification_mode: JustificationMode::None,
            justify_trailing_whitespace: false,
            line_break_style: LineBreakStyle::Normal,
            line_break_word_style: LineBreakWordStyle::None,
            minimum_font_metrics: None,
            use_bounds_for_width: false,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    /// Line spacing as a multiplier of the natural line height plus a
    /// fixed amount.
    pub fn line_spacing(mut self, multiplier: f32, amount: f32) -> Self {
        self.spacing_multiplier = multiplier;
        self.spacing_amount = amount;
        self
    }

    /// Whether the font's leading pads the first and last lines.
    pub fn font_padding_included(mut self, included: bool) -> Self {
        self.font_padding_included = included;
        self
    }

    /// Let metrics of fallback fonts within a run raise line height.
    pub fn fallback_line_spacing(mut self, enabled: bool) -> Self {
        self.fallback_line_spacing = enabled;
        self
    }

    pub fn ellipsize(mut self, truncate: Option<TruncateAt>) -> Self {
        self.ellipsize = truncate;
        self
    }

    /// Width the ellipsized line is fitted to, when different from the
    /// wrap width.
    pub fn ellipsized_width(mut self, width: Option<f32>) -> Self {
        self.ellipsized_width = width;
        self
    }

    pub fn max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn break_strategy(mut self, strategy: BreakStrategy) -> Self {
        self.break_strategy = strategy;
        self
    }

    pub fn hyphenation_frequency(mut self, frequency: HyphenationFrequency) -> Self {
        self.hyphenation_frequency = frequency;
        self
    }

    /// Per-line margins, in layout units. Lines past the end of either
    /// slice repeat its last value.
    pub fn indents(mut self, left: &[f32], right: &[f32]) -> Self {
        self.indents_left = left.to_vec();
        self.indents_right = right.to_vec();
        self
    }

    pub fn justification_mode(mut self, mode: JustificationMode) -> Self {
        self.justification_mode = mode;
        self
    }

    /// Count trailing whitespace as justification units.
    pub fn justify_trailing_whitespace(mut self, enabled: bool) -> Self {
        self.justify_trailing_whitespace = enabled;
        self
    }

    /// Paragraph-level line break configuration; spans may override it
    /// per range.
    pub fn line_break_config(
        mut self,
        style: LineBreakStyle,
        word_style: LineBreakWordStyle,
    ) -> Self {
        self.line_break_style = style;
        self.line_break_word_style = word_style;
        self
    }

    pub fn minimum_font_metrics(mut self, minimum: Option<MinimumFontMetrics>) -> Self {
        self.minimum_font_metrics = minimum;
        self
    }

    /// Switch from the advance-based to the ink-bounds width model.
    pub fn use_bounds_for_width(mut self, enabled: bool) -> Self {
        self.use_bounds_for_width = enabled;
        self
    }

    /// Builds the layout at the given wrap width.
    pub fn build(self, width: f32) -> Result<Layout, BuildError> {
        if width.is_nan() || width < 0.0 {
            return Err(BuildError::InvalidWidth(width));
        }
        if let Some(ew) = self.ellipsized_width {
            if ew.is_nan() || ew < 0.0 {
                return Err(BuildError::InvalidEllipsizedWidth(ew));
            }
        }
        if self.spacing_multiplier.is_nan() || self.spacing_amount.is_nan() {
            return Err(BuildError::InvalidStyle("line spacing is NaN"));
        }
        self.validate_spans()?;

        let text = self.paragraph.text();
        let levels = bidi::resolve_levels(text, self.text_direction);
        debug!(
            base_level = levels.base_level,
            mixed = levels.is_mixed,
            "resolved bidi levels"
        );
        let (styles, style_runs) = resolve_spans(self.paragraph.spans(), self.paragraph.len());

        let mut data = LayoutData {
            text_len: self.paragraph.len(),
            base_level: levels.base_level,
            width,
            ..Default::default()
        };
        self.shape_runs(&mut data, &styles, &style_runs, &levels.levels);
        data.styles = styles;

        let hyphen_advances: Vec<f32> = data
            .styles
            .iter()
            .map(|style| self.provider.hyphen_advance(style))
            .collect();
        let margins = self.cluster_margins(&data);

        let model = if self.use_bounds_for_width {
            WidthModel::Bounds
        } else {
            WidthModel::Advance
        };

        let boundaries = self.compute_boundaries(&data, &style_runs, ResolvedWordStyle::Normal);
        match self.line_break_word_style {
            LineBreakWordStyle::None => {
                self.break_lines(&mut data, &boundaries, model, &hyphen_advances, &margins, width);
            }
            LineBreakWordStyle::Phrase => {
                let phrase =
                    self.compute_boundaries(&data, &style_runs, ResolvedWordStyle::Phrase);
                self.break_lines(&mut data, &phrase, model, &hyphen_advances, &margins, width);
            }
            LineBreakWordStyle::Auto => {
                // Adopt phrase-granularity breaking only when it does not
                // cost an extra line over the default granularity.
                self.break_lines(&mut data, &boundaries, model, &hyphen_advances, &margins, width);
                let normal_count = data.lines.len();
                let phrase =
                    self.compute_boundaries(&data, &style_runs, ResolvedWordStyle::Phrase);
                self.break_lines(&mut data, &phrase, model, &hyphen_advances, &margins, width);
                if data.lines.len() < normal_count + 1 {
                    debug!(
                        lines = data.lines.len(),
                        normal = normal_count,
                        "word style auto: keeping phrase breaks"
                    );
                } else {
                    self.break_lines(
                        &mut data,
                        &boundaries,
                        model,
                        &hyphen_advances,
                        &margins,
                        width,
                    );
                }
            }
        }

        self.apply_max_lines(&mut data, model, &margins, width);

        justify_lines(
            &mut data,
            self.justification_mode,
            self.justify_trailing_whitespace,
        );

        let vertical = VerticalConfig {
            spacing_multiplier: self.spacing_multiplier,
            spacing_amount: self.spacing_amount,
            font_padding_included: self.font_padding_included,
            fallback_line_spacing: self.fallback_line_spacing,
            minimum: self.minimum_font_metrics,
        };
        aggregate_line_metrics(&mut data, &vertical);
        for line_idx in 0..data.lines.len() {
            bounds::compute_line_geometry(&mut data, line_idx, model);
        }
        position_lines(&mut data, &vertical);
        align_lines(&mut data, self.alignment);

        Ok(Layout { data })
    }

    fn validate_spans(&self) -> Result<(), BuildError> {
        let len = self.paragraph.len();
        for span in self.paragraph.spans() {
            if span.range.start > span.range.end || span.range.end > len {
                return Err(BuildError::InvalidSpan {
                    start: span.range.start,
                    end: span.range.end,
                    len,
                });
            }
            match &span.property {
                SpanProperty::RelativeSize(size) if !(size.is_finite() && *size > 0.0) => {
                    return Err(BuildError::InvalidStyle(
                        "relative size must be finite and positive",
                    ));
                }
                SpanProperty::LeadingMargin(margin)
                    if !(margin.is_finite() && *margin >= 0.0) =>
                {
                    return Err(BuildError::InvalidStyle(
                        "leading margin must be finite and non-negative",
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Splits the paragraph into direction- and style-uniform runs and
    /// shapes each one.
    fn shape_runs(
        &self,
        data: &mut LayoutData,
        styles: &[ResolvedSpanStyle],
        style_runs: &[StyleRun],
        levels: &[u8],
    ) {
        let text = self.paragraph.text();
        for style_run in style_runs {
            let style = &styles[style_run.style_index as usize];
            let mut start = style_run.range.start;
            while start < style_run.range.end {
                let level = levels[start];
                let mut end = start + 1;
                while end < style_run.range.end && levels[end] == level {
                    end += 1;
                }

                let shaped = self.provider.shape(&ShapeRequest {
                    text,
                    range: start..end,
                    rtl: level & 1 != 0,
                    style,
                });
                let cluster_start = data.clusters.len();
                let mut advance = 0.0;
                for cluster in &shaped.clusters {
                    advance += cluster.advance;
                    data.clusters.push(ClusterData {
                        text_range: cluster.range.clone(),
                        advance: cluster.advance,
                        justify: 0.0,
                        ink: cluster.ink,
                        whitespace: cluster.whitespace,
                    });
                }
                data.runs.push(RunData {
                    text_range: start..end,
                    style_index: style_run.style_index,
                    bidi_level: level,
                    cluster_range: cluster_start..data.clusters.len(),
                    metrics: RunMetrics {
                        ascent: shaped.ascent,
                        descent: shaped.descent,
                        leading: shaped.leading,
                        fallback_ascent: shaped.fallback_ascent,
                        fallback_descent: shaped.fallback_descent,
                    },
                    advance,
                });
                start = end;
            }
        }
    }

    /// Leading margin of the style governing each cluster, indexed by
    /// cluster. Lets the per-line wrap width be computed while the
    /// breaker holds the layout data mutably.
    fn cluster_margins(&self, data: &LayoutData) -> Vec<f32> {
        let mut margins = vec![0.0; data.clusters.len()];
        for run in &data.runs {
            let margin = data.styles[run.style_index as usize].leading_margin;
            for slot in &mut margins[run.cluster_range.clone()] {
                *slot = margin;
            }
        }
        margins
    }

    /// Wrap width for one line: layout width minus per-line indents and
    /// the leading margin of the style at the line start.
    fn max_advance_for(
        &self,
        margins: &[f32],
        width: f32,
        line_number: usize,
        start_cluster: usize,
    ) -> f32 {
        let indent = |indents: &[f32]| -> f32 {
            match indents.len() {
                0 => 0.0,
                n => indents[line_number.min(n - 1)],
            }
        };
        let margin = margins.get(start_cluster).copied().unwrap_or(0.0);
        (width - indent(&self.indents_left) - indent(&self.indents_right) - margin).max(0.0)
    }

    /// Resolves one boundary per code point from segmentation, spans and
    /// hyphenation.
    fn compute_boundaries(
        &self,
        data: &LayoutData,
        style_runs: &[StyleRun],
        word_style: ResolvedWordStyle,
    ) -> Vec<Boundary> {
        let paragraph = self.paragraph;
        let text = paragraph.text();
        let mut boundaries = vec![Boundary::None; paragraph.len() + 1];

        // Segment each maximal range sharing one line break configuration.
        let mut idx = 0;
        while idx < style_runs.len() {
            let key = self.segment_key(data, &style_runs[idx], word_style);
            let start = style_runs[idx].range.start;
            let mut end = style_runs[idx].range.end;
            while idx + 1 < style_runs.len()
                && self.segment_key(data, &style_runs[idx + 1], word_style) == key
            {
                idx += 1;
                end = style_runs[idx].range.end;
            }
            idx += 1;

            let (style, run_word_style, locale) = key;
            let byte_start = paragraph.byte_offset(start);
            let byte_end = paragraph.byte_offset(end);
            let sub = &text[byte_start..byte_end];
            for opportunity in
                self.segmentation
                    .line_breaks(sub, style, run_word_style, locale.as_deref())
            {
                let offset = paragraph.char_offset(byte_start + opportunity.offset);
                boundaries[offset] = match opportunity.kind {
                    BreakKind::Mandatory => Boundary::Mandatory,
                    BreakKind::Soft => Boundary::Soft,
                    BreakKind::Hyphen => Boundary::Hyphen,
                };
            }
        }

        // Mandatory breaks never depend on segmentation ranges; heal any
        // that fell on a segment edge.
        let mut prev: Option<char> = None;
        for (offset, ch) in text.chars().enumerate() {
            if let Some(prev) = prev {
                if is_mandatory_break_char(prev) && !(prev == '\r' && ch == '\n') {
                    boundaries[offset] = Boundary::Mandatory;
                }
            }
            prev = Some(ch);
        }
        if prev.is_some_and(is_mandatory_break_char) {
            boundaries[paragraph.len()] = Boundary::Mandatory;
        }

        if self.hyphenation_frequency == HyphenationFrequency::Full {
            self.add_hyphenation_points(data, &mut boundaries);
        }

        // No-break spans suppress opportunities strictly inside them,
        // hyphenation points included.
        for style_run in style_runs {
            if data.styles[style_run.style_index as usize].no_break {
                for boundary in
                    &mut boundaries[style_run.range.start + 1..style_run.range.end]
                {
                    if !matches!(boundary, Boundary::Mandatory) {
                        *boundary = Boundary::None;
                    }
                }
            }
        }

        boundaries
    }

    fn segment_key(
        &self,
        data: &LayoutData,
        style_run: &StyleRun,
        word_style: ResolvedWordStyle,
    ) -> (LineBreakStyle, ResolvedWordStyle, Option<String>) {
        let style = &data.styles[style_run.style_index as usize];
        let break_style = match style.line_break.style {
            LineBreakStyle::None => self.line_break_style,
            other => other,
        };
        let run_word_style = match style.line_break.word_style {
            LineBreakWordStyle::Phrase => ResolvedWordStyle::Phrase,
            LineBreakWordStyle::None | LineBreakWordStyle::Auto => word_style,
        };
        (break_style, run_word_style, style.locale.clone())
    }

    /// Finds words (maximal runs of non-whitespace code points with no
    /// break opportunity inside) and asks the segmentation collaborator
    /// for hyphen insertion points.
    fn add_hyphenation_points(&self, data: &LayoutData, boundaries: &mut [Boundary]) {
        let paragraph = self.paragraph;
        let text = paragraph.text();
        let len = paragraph.len();

        let mut word_start: Option<usize> = None;
        for offset in 0..=len {
            let is_word_char = offset < len
                && paragraph.char_at(offset).is_some_and(|c| !c.is_whitespace());
            let splits =
                offset == len || boundaries[offset] != Boundary::None || !is_word_char;

            if let Some(start) = word_start {
                if splits {
                    if offset > start + 1 {
                        let locale = self.locale_at(data, start);
                        let byte_range =
                            paragraph.byte_offset(start)..paragraph.byte_offset(offset);
                        for point in self.segmentation.hyphenation_points(
                            text,
                            byte_range,
                            locale.as_deref(),
                        ) {
                            let cp = paragraph.char_offset(point);
                            if boundaries[cp] == Boundary::None {
                                boundaries[cp] = Boundary::Hyphen;
                            }
                        }
                    }
                    word_start = None;
                }
            }
            if word_start.is_none() && is_word_char {
                word_start = Some(offset);
            }
        }
    }

    fn locale_at(&self, data: &LayoutData, offset: usize) -> Option<String> {
        data.runs
            .iter()
            .find(|run| run.text_range.contains(&offset))
            .and_then(|run| data.styles[run.style_index as usize].locale.clone())
    }

    /// Runs the configured break strategy, filling `data.lines`.
    fn break_lines(
        &self,
        data: &mut LayoutData,
        boundaries: &[Boundary],
        model: WidthModel,
        hyphen_advances: &[f32],
        margins: &[f32],
        width: f32,
    ) {
        if self.try_fast_single_line(data, boundaries, model, margins, width) {
            return;
        }
        match self.break_strategy {
            BreakStrategy::Simple => {
                let mut line_number = 0;
                let mut breaker = BreakLines::new(data, boundaries, model, hyphen_advances);
                loop {
                    let start = breaker.cluster_cursor();
                    let max_advance = self.max_advance_for(margins, width, line_number, start);
                    if breaker.break_next(max_advance).is_none() {
                        break;
                    }
                    line_number += 1;
                }
            }
            strategy => {
                break_optimal(
                    data,
                    boundaries,
                    model,
                    hyphen_advances,
                    strategy,
                    |line_number, start_cluster| {
                        self.max_advance_for(margins, width, line_number, start_cluster)
                    },
                );
            }
        }
    }

    /// Commits the whole paragraph as one line when it is direction- and
    /// style-uniform, has no forced breaks and fits the width.
    fn try_fast_single_line(
        &self,
        data: &mut LayoutData,
        boundaries: &[Boundary],
        model: WidthModel,
        margins: &[f32],
        width: f32,
    ) -> bool {
        if data.styles.len() != 1
            || data.runs.len() > 1
            || boundaries.contains(&Boundary::Mandatory)
        {
            return false;
        }
        let max_advance = self.max_advance_for(margins, width, 0, 0);
        let cluster_count = data.clusters.len();
        if bounds::fit_extent(data, 0..cluster_count, model, 0.0) > max_advance {
            return false;
        }
        debug!("single line fast path");
        data.lines.clear();
        data.line_items.clear();
        push_line(
            data,
            0..cluster_count,
            max_advance,
            BreakReason::None,
            EndHyphenEdit::NoEdit,
            0.0,
        );
        true
    }

    /// Enforces the line limit: truncates overflowing lines, optionally
    /// substituting an ellipsis on the last kept line. The last line's
    /// end always extends to the paragraph length so lines keep
    /// partitioning the text.
    fn apply_max_lines(
        &self,
        data: &mut LayoutData,
        model: WidthModel,
        margins: &[f32],
        width: f32,
    ) {
        let Some(max_lines) = self.max_lines else {
            return;
        };
        if max_lines == 0 || data.lines.len() <= max_lines {
            return;
        }

        let last_idx = max_lines - 1;
        let last_clusters = bounds::logical_cluster_range(data, &data.lines[last_idx]);
        let item_start = data.lines[last_idx].item_range.start;
        data.lines.truncate(last_idx);
        data.line_items.truncate(item_start);
        let start_cluster = last_clusters.start;

        let (end_cluster, ellipsis_advance, max_advance) = match self.ellipsize {
            Some(TruncateAt::End) => {
                let style_index = data
                    .runs
                    .iter()
                    .find(|run| run.cluster_range.contains(&start_cluster))
                    .map(|run| run.style_index as usize)
                    .unwrap_or(0);
                let ellipsis_advance =
                    self.provider.ellipsis_advance(&data.styles[style_index]);
                let max_advance = self.ellipsized_width.unwrap_or_else(|| {
                    self.max_advance_for(margins, width, last_idx, start_cluster)
                });

                // Fill the line with as many clusters as fit next to the
                // ellipsis, but keep at least one.
                let mut end = start_cluster;
                while end < data.clusters.len() {
                    let extent =
                        bounds::fit_extent(data, start_cluster..end + 1, model, 0.0);
                    if extent + ellipsis_advance > max_advance && end > start_cluster {
                        break;
                    }
                    end += 1;
                }
                (end, ellipsis_advance, max_advance)
            }
            None => (
                last_clusters.end,
                0.0,
                self.max_advance_for(margins, width, last_idx, start_cluster),
            ),
        };

        let line_idx = push_line(
            data,
            start_cluster..end_cluster,
            max_advance,
            BreakReason::None,
            EndHyphenEdit::NoEdit,
            0.0,
        );
        let visible_end = data.lines[line_idx].text_range.end;
        let line = &mut data.lines[line_idx];
        line.visible_end = visible_end;
        line.text_range.end = data.text_len;
        if self.ellipsize.is_some() {
            line.ellipsized = true;
            line.ellipsis_advance = ellipsis_advance;
            debug!(line = line_idx, visible_end, "ellipsized layout");
        }
    }
}

// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking behavior: wrapping, forced breaks, hyphenation,
//! truncation and break strategies.

mod common;

use common::{line_ranges, BlockFont, HyphenatingSegmenter, ScriptedSegmenter};
use paraline::{
    BreakReason, BreakStrategy, EndHyphenEdit, HyphenationFrequency, IcuSegmenter, Layout,
    LayoutBuilder, LineBreakStyle, LineBreakWordStyle, Paragraph, SpanProperty, TruncateAt,
};
use pretty_assertions::assert_eq;

fn build(text: &str, width: f32) -> Layout {
    let paragraph = Paragraph::new(text);
    LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .build(width)
        .unwrap()
}

#[test]
fn wraps_at_spaces() {
    let layout = build("aaaa bbbb cccc", 100.0);
    assert_eq!(line_ranges(&layout), vec![(0, 10), (10, 14)]);
    assert_eq!(layout.get(0).unwrap().break_reason(), BreakReason::Regular);
    assert_eq!(layout.get(1).unwrap().break_reason(), BreakReason::None);
}

#[test]
fn trailing_whitespace_hangs() {
    let layout = build("aaaa bbbb cccc", 100.0);
    let first = layout.get(0).unwrap();
    // The trailing space is part of the line's advance but not its
    // visible extent, and never causes a break by itself.
    assert_eq!(first.advance(), 100.0);
    assert_eq!(first.max_extent(), 90.0);
}

#[test]
fn mandatory_breaks_partition_the_text() {
    let layout = build("aa\nbb\ncc", 1000.0);
    assert_eq!(line_ranges(&layout), vec![(0, 3), (3, 6), (6, 8)]);
    assert_eq!(layout.get(0).unwrap().break_reason(), BreakReason::Explicit);
    assert_eq!(layout.get(1).unwrap().break_reason(), BreakReason::Explicit);
    assert_eq!(layout.get(2).unwrap().break_reason(), BreakReason::None);
}

#[test]
fn trailing_newline_yields_empty_line() {
    let layout = build("aaaa\n", 1000.0);
    assert_eq!(line_ranges(&layout), vec![(0, 5), (5, 5)]);
    // The empty line inherits the previous line's metrics.
    assert_eq!(layout.height(), 20.0);
}

#[test]
fn crlf_is_one_break() {
    let layout = build("aa\r\nbb", 1000.0);
    assert_eq!(line_ranges(&layout), vec![(0, 4), (4, 6)]);
}

#[test]
fn unbreakable_text_breaks_at_cluster() {
    let layout = build("aaaaaaaa", 50.0);
    assert_eq!(line_ranges(&layout), vec![(0, 5), (5, 8)]);
    assert_eq!(
        layout.get(0).unwrap().break_reason(),
        BreakReason::Emergency
    );
}

#[test]
fn no_break_span_suppresses_opportunities() {
    let mut paragraph = Paragraph::new("aaaa bbbb");
    paragraph.add_span(0..9, SpanProperty::NoBreak);
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .build(50.0)
        .unwrap();
    // The space no longer offers a break, leaving only emergency breaks.
    assert_eq!(
        layout.get(0).unwrap().break_reason(),
        BreakReason::Emergency
    );
}

#[test]
fn no_break_span_disables_hyphenation() {
    let mut paragraph = Paragraph::new("aaaaaaaa");
    paragraph.add_span(0..8, SpanProperty::NoBreak);
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &HyphenatingSegmenter::new())
        .hyphenation_frequency(HyphenationFrequency::Full)
        .build(50.0)
        .unwrap();

    // The word's midpoint no longer offers a hyphen break, leaving only
    // an emergency break.
    assert_eq!(line_ranges(&layout), vec![(0, 5), (5, 8)]);
    let first = layout.get(0).unwrap();
    assert_eq!(first.break_reason(), BreakReason::Emergency);
    assert_eq!(first.end_hyphen(), EndHyphenEdit::NoEdit);
}

#[test]
fn hyphenation_point_inserts_hyphen() {
    let paragraph = Paragraph::new("aaaaaaaa");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &HyphenatingSegmenter::new())
        .hyphenation_frequency(HyphenationFrequency::Full)
        .build(50.0)
        .unwrap();

    assert_eq!(line_ranges(&layout), vec![(0, 4), (4, 8)]);
    let first = layout.get(0).unwrap();
    assert_eq!(first.break_reason(), BreakReason::Regular);
    assert_eq!(first.end_hyphen(), EndHyphenEdit::InsertHyphen);
    // The hyphen glyph's advance counts toward the line.
    assert_eq!(first.advance(), 45.0);
    assert_eq!(layout.get(1).unwrap().end_hyphen(), EndHyphenEdit::NoEdit);
}

#[test]
fn ellipsis_replaces_overflowing_tail() {
    let paragraph = Paragraph::new("aaaa bbbb cccc dddd");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .max_lines(Some(2))
        .ellipsize(Some(TruncateAt::End))
        .build(50.0)
        .unwrap();

    assert_eq!(layout.line_count(), 2);
    let last = layout.get(1).unwrap();
    assert!(last.is_ellipsized());
    assert_eq!(last.visible_end(), 10);
    // The lines still partition the full paragraph.
    assert_eq!(last.end(), 19);
    assert_eq!(last.end_hyphen(), EndHyphenEdit::NoEdit);
}

#[test]
fn ellipsis_suppresses_trailing_hyphen() {
    let paragraph = Paragraph::new("aaaaaaaa");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &HyphenatingSegmenter::new())
        .hyphenation_frequency(HyphenationFrequency::Full)
        .max_lines(Some(1))
        .ellipsize(Some(TruncateAt::End))
        .build(50.0)
        .unwrap();

    assert_eq!(layout.line_count(), 1);
    let line = layout.get(0).unwrap();
    assert!(line.is_ellipsized());
    assert_eq!(line.end_hyphen(), EndHyphenEdit::NoEdit);
    assert_eq!(line.visible_end(), 4);
    assert_eq!(line.end(), 8);
}

#[test]
fn ellipsized_width_overrides_wrap_width() {
    let paragraph = Paragraph::new("aaaa aaaa aaaa");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .max_lines(Some(1))
        .ellipsize(Some(TruncateAt::End))
        .ellipsized_width(Some(30.0))
        .build(50.0)
        .unwrap();

    // Two clusters plus the ellipsis fill the narrower width exactly.
    let line = layout.get(0).unwrap();
    assert!(line.is_ellipsized());
    assert_eq!(line.visible_end(), 2);
    assert_eq!(line.advance(), 30.0);
    assert_eq!(line.end(), 14);
}

#[test]
fn max_lines_without_ellipsis_extends_last_line() {
    let paragraph = Paragraph::new("aaaa bbbb cccc dddd");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .max_lines(Some(2))
        .build(50.0)
        .unwrap();

    assert_eq!(line_ranges(&layout), vec![(0, 5), (5, 19)]);
    let last = layout.get(1).unwrap();
    assert!(!last.is_ellipsized());
    assert_eq!(last.visible_end(), 10);
}

#[test]
fn indents_narrow_lines_and_clamp() {
    let paragraph = Paragraph::new("aaaa bbbb cccc");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .indents(&[60.0], &[])
        .build(100.0)
        .unwrap();
    // The single entry applies to every line: each gets 40 units.
    assert_eq!(line_ranges(&layout), vec![(0, 5), (5, 10), (10, 14)]);

    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .indents(&[0.0, 60.0], &[])
        .build(100.0)
        .unwrap();
    assert_eq!(line_ranges(&layout), vec![(0, 10), (10, 14)]);
}

#[test]
fn balanced_and_high_quality_agree_on_even_split() {
    let paragraph = Paragraph::new("aaaa bbbb cccc dddd");
    for strategy in [BreakStrategy::Balanced, BreakStrategy::HighQuality] {
        let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
            .break_strategy(strategy)
            .build(95.0)
            .unwrap();
        assert_eq!(line_ranges(&layout), vec![(0, 10), (10, 19)]);
    }
}

#[test]
fn optimal_strategy_honors_mandatory_breaks() {
    let paragraph = Paragraph::new("aa\nbb cc dd");
    let layout = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .break_strategy(BreakStrategy::Balanced)
        .build(50.0)
        .unwrap();
    assert_eq!(layout.get(0).unwrap().break_reason(), BreakReason::Explicit);
    assert_eq!(layout.get(0).unwrap().text_range(), 0..3);
}

#[test]
fn strict_style_forbids_break_before_prolonged_sound_mark() {
    // カーナビ at a width of one ideograph: normal rules permit the break
    // before the prolonged sound mark, strict rules must fall back to an
    // emergency break at the same position.
    let paragraph = Paragraph::new("\u{30AB}\u{30FC}\u{30CA}\u{30D3}");
    let normal = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .line_break_config(LineBreakStyle::Normal, LineBreakWordStyle::None)
        .build(15.0)
        .unwrap();
    let strict = LayoutBuilder::new(&paragraph, &BlockFont, &IcuSegmenter::new())
        .line_break_config(LineBreakStyle::Strict, LineBreakWordStyle::None)
        .build(15.0)
        .unwrap();

    assert_eq!(normal.get(0).unwrap().text_range(), 0..1);
    assert_eq!(normal.get(0).unwrap().break_reason(), BreakReason::Regular);
    assert_eq!(strict.get(0).unwrap().break_reason(), BreakReason::Emergency);
}

#[test]
fn auto_word_style_keeps_phrase_when_free() {
    let paragraph = Paragraph::new("aabbccdd");
    let segmenter = ScriptedSegmenter {
        normal: vec![2, 4, 6],
        phrase: vec![4],
    };
    let auto = LayoutBuilder::new(&paragraph, &BlockFont, &segmenter)
        .line_break_config(LineBreakStyle::Normal, LineBreakWordStyle::Auto)
        .build(40.0)
        .unwrap();
    let phrase = LayoutBuilder::new(&paragraph, &BlockFont, &segmenter)
        .line_break_config(LineBreakStyle::Normal, LineBreakWordStyle::Phrase)
        .build(40.0)
        .unwrap();
    assert_eq!(line_ranges(&auto), line_ranges(&phrase));
    assert_eq!(line_ranges(&auto), vec![(0, 4), (4, 8)]);
}

#[test]
fn auto_word_style_rejects_costly_phrase() {
    let paragraph = Paragraph::new("aabbccdd");
    let segmenter = ScriptedSegmenter {
        normal: vec![2, 4, 6],
        phrase: vec![1, 3, 5, 7],
    };
    let auto = LayoutBuilder::new(&paragraph, &BlockFont, &segmenter)
        .line_break_config(LineBreakStyle::Normal, LineBreakWordStyle::Auto)
        .build(20.0)
        .unwrap();
    // Phrase breaking would cost five lines against four; auto falls back
    // to the default granularity, line for line.
    assert_eq!(
        line_ranges(&auto),
        vec![(0, 2), (2, 4), (4, 6), (6, 8)]
    );
}

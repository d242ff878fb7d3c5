// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional analysis: base direction resolution and embedding levels.

use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

/// Base paragraph direction heuristic.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum TextDirection {
    /// Direction of the first strong character, left-to-right if none.
    #[default]
    FirstStrongLtr,
    /// Direction of the first strong character, right-to-left if none.
    FirstStrongRtl,
    /// Force left-to-right.
    Ltr,
    /// Force right-to-left.
    Rtl,
}

/// Resolved embedding levels for one paragraph.
#[derive(Clone, Debug)]
pub(crate) struct BidiLevels {
    pub(crate) base_level: u8,
    /// One level per code point, in logical order.
    pub(crate) levels: Vec<u8>,
    /// True when any level differs from the base. Uniform paragraphs can
    /// skip run splitting and reordering entirely.
    pub(crate) is_mixed: bool,
}

/// Computes UAX#9 embedding levels for the whole paragraph.
///
/// The base level is fixed up front from the direction heuristic, so
/// per-line resolution is unnecessary: levels of a sub-range equal the
/// levels that range would receive laid out alone with the same base.
pub(crate) fn resolve_levels(text: &str, direction: TextDirection) -> BidiLevels {
    let base = base_level(text, direction);
    let info = BidiInfo::new(text, Some(base));
    let mut levels = Vec::with_capacity(text.chars().count());
    let mut is_mixed = false;
    for (byte_pos, _) in text.char_indices() {
        let level = info.levels[byte_pos].number();
        is_mixed |= level != base.number();
        levels.push(level);
    }
    BidiLevels {
        base_level: base.number(),
        levels,
        is_mixed,
    }
}

fn base_level(text: &str, direction: TextDirection) -> Level {
    match direction {
        TextDirection::Ltr => Level::ltr(),
        TextDirection::Rtl => Level::rtl(),
        TextDirection::FirstStrongLtr => first_strong(text).unwrap_or_else(Level::ltr),
        TextDirection::FirstStrongRtl => first_strong(text).unwrap_or_else(Level::rtl),
    }
}

/// Scans for the first character with a strong bidi class.
fn first_strong(text: &str) -> Option<Level> {
    for ch in text.chars() {
        match bidi_class(ch) {
            BidiClass::L => return Some(Level::ltr()),
            BidiClass::R | BidiClass::AL => return Some(Level::rtl()),
            _ => {}
        }
    }
    None
}

/// Reorders same-level runs into visual order (UAX#9 rule L2).
///
/// Finds the highest level and the lowest odd level, then reverses each
/// maximal sequence of runs at or above every level in between, from
/// highest to lowest.
pub(crate) fn reorder_visual_runs<T>(runs: &mut [T], level_of: impl Fn(&T) -> u8) {
    let run_count = runs.len();

    let mut max_level = 0;
    let mut lowest_odd_level = u8::MAX;
    for run in runs.iter() {
        let level = level_of(run);
        if level > max_level {
            max_level = level;
        }
        if level & 1 != 0 && level < lowest_odd_level {
            lowest_odd_level = level;
        }
    }

    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < run_count {
            if level_of(&runs[i]) >= level {
                let mut end = i + 1;
                while end < run_count && level_of(&runs[end]) >= level {
                    end += 1;
                }

                let mut j = i;
                let mut k = end - 1;
                while j < k {
                    runs.swap(j, k);
                    j += 1;
                    k -= 1;
                }

                i = end;
            }
            i += 1;
        }
    }
}

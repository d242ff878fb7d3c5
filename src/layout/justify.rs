// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Justification: distributing slack across a line's clusters or word
//! gaps, with half additions at the visual edges.

use smallvec::SmallVec;

use crate::layout::bounds;
use crate::layout::data::{BreakReason, LayoutData};

/// How lines are stretched to the wrap width.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum JustificationMode {
    #[default]
    None,
    /// Stretch whitespace gaps between words.
    InterWord,
    /// Stretch every cluster boundary.
    InterCharacter,
}

/// Distributes justification slack on every eligible line.
///
/// Lines ending in a mandatory break and the paragraph's last line keep
/// their natural width. Each justification unit receives the same
/// addition `a = extra / (units - 1)` on its trailing edge, except the
/// visually-first and visually-last units which receive `a / 2` (no space
/// is needed before the line start or after the line end), so the total
/// added is exactly `a * (units - 1)` regardless of direction.
pub(crate) fn justify_lines(
    data: &mut LayoutData,
    mode: JustificationMode,
    justify_trailing_whitespace: bool,
) {
    if mode == JustificationMode::None {
        return;
    }
    for line_idx in 0..data.lines.len() {
        let line = &data.lines[line_idx];
        if matches!(line.break_reason, BreakReason::None | BreakReason::Explicit) {
            continue;
        }

        let logical = bounds::logical_cluster_range(data, line);
        let visible = bounds::trim_trailing_whitespace(data, logical.clone());
        let unit_range = if justify_trailing_whitespace {
            logical
        } else {
            visible.clone()
        };

        let natural = data.cluster_advance(visible) + line.hyphen_advance;
        let extra = line.max_advance - natural;
        if extra <= 0.0 {
            continue;
        }

        // Unit clusters in visual order.
        let mut units: SmallVec<[usize; 16]> = SmallVec::new();
        for (_, slice) in bounds::visual_slices(data, unit_range) {
            for cluster_idx in slice {
                let cluster = &data.clusters[cluster_idx];
                let is_unit = match mode {
                    JustificationMode::InterCharacter => true,
                    JustificationMode::InterWord => cluster.whitespace,
                    JustificationMode::None => unreachable!(),
                };
                if is_unit {
                    units.push(cluster_idx);
                }
            }
        }

        if units.len() < 2 {
            continue;
        }
        let addition = extra / (units.len() - 1) as f32;
        for &cluster_idx in &units {
            data.clusters[cluster_idx].justify += addition;
        }
        data.clusters[units[0]].justify -= addition / 2.0;
        data.clusters[*units.last().unwrap()].justify -= addition / 2.0;

        // Item advances were summed before justification; refresh them.
        let line = &data.lines[line_idx];
        for item_idx in line.item_range.clone() {
            let range = data.line_items[item_idx].cluster_range.clone();
            data.line_items[item_idx].advance = data.cluster_advance(range);
        }
        data.lines[line_idx].justify_units = units.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::data::{
        ClusterData, LineData, LineItemData, RunData, RunMetrics,
    };
    use crate::shape::Rect;

    fn line_data(advances: &[f32], whitespace: &[bool], bidi_level: u8) -> LayoutData {
        let n = advances.len();
        let clusters: Vec<ClusterData> = advances
            .iter()
            .zip(whitespace)
            .enumerate()
            .map(|(i, (&advance, &ws))| ClusterData {
                text_range: i..i + 1,
                advance,
                justify: 0.0,
                ink: Rect::EMPTY,
                whitespace: ws,
            })
            .collect();
        LayoutData {
            text_len: n,
            base_level: bidi_level & 1,
            runs: vec![RunData {
                text_range: 0..n,
                style_index: 0,
                bidi_level,
                cluster_range: 0..n,
                metrics: RunMetrics::default(),
                advance: advances.iter().sum(),
            }],
            clusters,
            line_items: vec![LineItemData {
                run_index: 0,
                bidi_level,
                advance: advances.iter().sum(),
                is_whitespace: false,
                has_trailing_whitespace: *whitespace.last().unwrap(),
                text_range: 0..n,
                cluster_range: 0..n,
            }],
            lines: vec![LineData {
                text_range: 0..n,
                visible_end: n,
                item_range: 0..1,
                break_reason: BreakReason::Regular,
                max_advance: 60.0,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn edge_clusters_receive_half_additions() {
        let mut data = line_data(&[10.0, 10.0, 10.0], &[false, false, false], 0);
        justify_lines(&mut data, JustificationMode::InterCharacter, false);
        // extra = 30, a = 15: half, full, half.
        let additions: Vec<f32> = data.clusters.iter().map(|c| c.justify).collect();
        assert_eq!(additions, vec![7.5, 15.0, 7.5]);
        assert_eq!(additions.iter().sum::<f32>(), 30.0);
        assert_eq!(data.lines[0].justify_units, 3);
    }

    #[test]
    fn rtl_halves_visual_edges_not_logical() {
        let mut data = line_data(&[10.0, 10.0, 10.0], &[false, false, false], 1);
        justify_lines(&mut data, JustificationMode::InterCharacter, false);
        // Visual order is reversed, but halving is symmetric here: the
        // logical first and last clusters are the visual last and first.
        let additions: Vec<f32> = data.clusters.iter().map(|c| c.justify).collect();
        assert_eq!(additions, vec![7.5, 15.0, 7.5]);
    }

    #[test]
    fn inter_word_stretches_gaps_only() {
        let mut data = line_data(
            &[10.0, 5.0, 10.0, 5.0, 10.0],
            &[false, true, false, true, false],
            0,
        );
        justify_lines(&mut data, JustificationMode::InterWord, false);
        // natural = 40, extra = 20, two gap units, a = 20.
        let additions: Vec<f32> = data.clusters.iter().map(|c| c.justify).collect();
        assert_eq!(additions, vec![0.0, 10.0, 0.0, 10.0, 0.0]);
        assert_eq!(additions.iter().sum::<f32>(), 20.0);
    }

    #[test]
    fn last_and_explicit_lines_keep_natural_width() {
        let mut data = line_data(&[10.0, 10.0, 10.0], &[false, false, false], 0);
        data.lines[0].break_reason = BreakReason::None;
        justify_lines(&mut data, JustificationMode::InterCharacter, false);
        assert!(data.clusters.iter().all(|c| c.justify == 0.0));

        data.lines[0].break_reason = BreakReason::Explicit;
        justify_lines(&mut data, JustificationMode::InterCharacter, false);
        assert!(data.clusters.iter().all(|c| c.justify == 0.0));
    }

    #[test]
    fn trailing_whitespace_units_when_enabled() {
        let mut data = line_data(
            &[10.0, 10.0, 10.0, 5.0],
            &[false, false, false, true],
            0,
        );
        justify_lines(&mut data, JustificationMode::InterCharacter, true);
        assert_eq!(data.lines[0].justify_units, 4);
        // extra is still measured to the visible width (30): a = 10.
        let additions: Vec<f32> = data.clusters.iter().map(|c| c.justify).collect();
        assert_eq!(additions, vec![5.0, 10.0, 10.0, 5.0]);
    }
}

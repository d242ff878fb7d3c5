// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-line vertical metrics: run aggregation, minimum-metrics floors and
//! vertical positioning.

use crate::layout::data::{LayoutData, RunMetrics};

/// Lower bound on line metrics. `ascent` is negative, like run ascents.
///
/// The floor never shrinks a line: natural metrics that already exceed it
/// are left untouched.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MinimumFontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// Resolved vertical configuration for a layout.
#[derive(Copy, Clone, Debug)]
pub(crate) struct VerticalConfig {
    pub(crate) spacing_multiplier: f32,
    pub(crate) spacing_amount: f32,
    pub(crate) font_padding_included: bool,
    pub(crate) fallback_line_spacing: bool,
    pub(crate) minimum: Option<MinimumFontMetrics>,
}

impl Default for VerticalConfig {
    fn default() -> Self {
        Self {
            spacing_multiplier: 1.0,
            spacing_amount: 0.0,
            font_padding_included: true,
            fallback_line_spacing: false,
            minimum: None,
        }
    }
}

/// Computes ascent, descent and leading for every line.
///
/// Whitespace-only items do not contribute; a line with no other content
/// falls back to the metrics of its first run, and a fully empty line
/// (paragraph ending in a newline) inherits the previous line's metrics.
pub(crate) fn aggregate_line_metrics(data: &mut LayoutData, config: &VerticalConfig) {
    for line_idx in 0..data.lines.len() {
        let line = &data.lines[line_idx];
        let mut ascent = 0.0f32;
        let mut descent = 0.0f32;
        let mut leading = 0.0f32;
        let mut have_metrics = false;

        for item in &data.line_items[line.item_range.clone()] {
            if item.is_whitespace {
                continue;
            }
            let metrics = &data.runs[item.run_index].metrics;
            let (run_ascent, run_descent) = effective_metrics(metrics, config);
            ascent = ascent.min(run_ascent);
            descent = descent.max(run_descent);
            leading = leading.max(metrics.leading);
            have_metrics = true;
        }

        if !have_metrics {
            if let Some(item) = data.line_items[line.item_range.clone()].first() {
                // Whitespace-only line.
                let metrics = &data.runs[item.run_index].metrics;
                let (run_ascent, run_descent) = effective_metrics(metrics, config);
                ascent = run_ascent;
                descent = run_descent;
                leading = metrics.leading;
            } else if line_idx > 0 {
                // Empty trailing line after a final newline.
                let prev = data.lines[line_idx - 1].metrics;
                ascent = prev.ascent;
                descent = prev.descent;
                leading = prev.leading;
            } else if let Some(run) = data.runs.first() {
                let (run_ascent, run_descent) = effective_metrics(&run.metrics, config);
                ascent = run_ascent;
                descent = run_descent;
                leading = run.metrics.leading;
            }
        }

        if let Some(minimum) = config.minimum {
            ascent = ascent.min(minimum.ascent.floor());
            descent = descent.max(minimum.descent.ceil());
        }

        let metrics = &mut data.lines[line_idx].metrics;
        metrics.ascent = ascent;
        metrics.descent = descent;
        metrics.leading = leading;
    }
}

fn effective_metrics(metrics: &RunMetrics, config: &VerticalConfig) -> (f32, f32) {
    let mut ascent = metrics.ascent;
    let mut descent = metrics.descent;
    if config.fallback_line_spacing {
        if let Some(fallback) = metrics.fallback_ascent {
            ascent = ascent.min(fallback);
        }
        if let Some(fallback) = metrics.fallback_descent {
            descent = descent.max(fallback);
        }
    }
    (ascent, descent)
}

/// Stacks the lines vertically: line heights, baselines and total layout
/// height. Font padding extends the first line upward and the last line
/// downward by the line's leading.
pub(crate) fn position_lines(data: &mut LayoutData, config: &VerticalConfig) {
    let line_count = data.lines.len();
    // f64 accumulation keeps tall layouts from drifting.
    let mut y = 0.0f64;
    for line_idx in 0..line_count {
        let metrics = &mut data.lines[line_idx].metrics;

        let mut ascent = metrics.ascent;
        let mut descent = metrics.descent;
        if config.font_padding_included {
            if line_idx == 0 {
                ascent -= metrics.leading;
            }
            if line_idx == line_count - 1 {
                descent += metrics.leading;
            }
        }

        let natural = descent - ascent;
        let line_height = natural * config.spacing_multiplier + config.spacing_amount;
        metrics.line_height = line_height;
        metrics.baseline = (y - f64::from(ascent)) as f32;
        y += f64::from(line_height);
    }
    data.height = y as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::data::{
        ClusterData, LayoutData, LineData, LineItemData, RunData, RunMetrics,
    };
    use crate::shape::Rect;

    fn one_line_data(metrics: RunMetrics) -> LayoutData {
        LayoutData {
            text_len: 1,
            runs: vec![RunData {
                text_range: 0..1,
                style_index: 0,
                bidi_level: 0,
                cluster_range: 0..1,
                metrics,
                advance: 10.0,
            }],
            clusters: vec![ClusterData {
                text_range: 0..1,
                advance: 10.0,
                justify: 0.0,
                ink: Rect::EMPTY,
                whitespace: false,
            }],
            line_items: vec![LineItemData {
                run_index: 0,
                bidi_level: 0,
                advance: 10.0,
                is_whitespace: false,
                has_trailing_whitespace: false,
                text_range: 0..1,
                cluster_range: 0..1,
            }],
            lines: vec![LineData {
                text_range: 0..1,
                visible_end: 1,
                item_range: 0..1,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn minimum_metrics_never_shrink() {
        let natural = RunMetrics {
            ascent: -10.0,
            descent: 4.0,
            ..Default::default()
        };
        let config = VerticalConfig {
            minimum: Some(MinimumFontMetrics {
                ascent: -7.5,
                descent: 6.2,
            }),
            ..Default::default()
        };
        let mut data = one_line_data(natural);
        aggregate_line_metrics(&mut data, &config);
        // Natural ascent exceeds the floor; descent is raised and ceiled.
        assert_eq!(data.lines[0].metrics.ascent, -10.0);
        assert_eq!(data.lines[0].metrics.descent, 7.0);

        let config = VerticalConfig {
            minimum: Some(MinimumFontMetrics {
                ascent: -12.3,
                descent: 2.0,
            }),
            ..Default::default()
        };
        let mut data = one_line_data(natural);
        aggregate_line_metrics(&mut data, &config);
        assert_eq!(data.lines[0].metrics.ascent, -13.0);
        assert_eq!(data.lines[0].metrics.descent, 4.0);
    }

    #[test]
    fn fallback_metrics_only_apply_when_enabled() {
        let metrics = RunMetrics {
            ascent: -10.0,
            descent: 3.0,
            fallback_ascent: Some(-14.0),
            fallback_descent: Some(5.0),
            ..Default::default()
        };
        let mut data = one_line_data(metrics);
        aggregate_line_metrics(&mut data, &VerticalConfig::default());
        assert_eq!(data.lines[0].metrics.ascent, -10.0);

        let mut data = one_line_data(metrics);
        let config = VerticalConfig {
            fallback_line_spacing: true,
            ..Default::default()
        };
        aggregate_line_metrics(&mut data, &config);
        assert_eq!(data.lines[0].metrics.ascent, -14.0);
        assert_eq!(data.lines[0].metrics.descent, 5.0);
    }

    #[test]
    fn spacing_multiplier_and_amount() {
        let mut data = one_line_data(RunMetrics {
            ascent: -10.0,
            descent: 2.0,
            ..Default::default()
        });
        let config = VerticalConfig {
            spacing_multiplier: 1.5,
            spacing_amount: 3.0,
            ..Default::default()
        };
        aggregate_line_metrics(&mut data, &config);
        position_lines(&mut data, &config);
        assert_eq!(data.lines[0].metrics.line_height, 12.0 * 1.5 + 3.0);
        assert_eq!(data.lines[0].metrics.baseline, 10.0);
        assert_eq!(data.height, 21.0);
    }
}

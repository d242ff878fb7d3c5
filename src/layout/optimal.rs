// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimal line breaking: a dynamic program over break candidates that
//! minimizes squared slack across the paragraph.

use tracing::trace;

use crate::layout::bounds::{self, WidthModel};
use crate::layout::data::{BreakReason, EndHyphenEdit, LayoutData};
use crate::layout::line_break::{push_line, Boundary};

/// Line breaking strategy.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum BreakStrategy {
    /// Greedy, first-fit breaking.
    #[default]
    Simple,
    /// Minimize slack over all lines, including the last.
    Balanced,
    /// Minimize slack over all lines; the last line is free.
    HighQuality,
}

/// Cost for a line wider than its wrap width. Dominates any slack cost so
/// overfull lines only appear when nothing fits.
const OVERFULL_COST: f64 = 1e12;
/// Cost for breaking at a bare cluster boundary instead of a break
/// opportunity.
const DESPERATE_COST: f64 = 1e10;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum CandidateKind {
    Soft,
    Mandatory,
    Hyphen,
    /// A cluster boundary with no opportunity; last resort.
    Desperate,
}

#[derive(Clone, Debug)]
struct Candidate {
    /// Lines ending at this candidate stop before this cluster.
    cluster_end: usize,
    kind: CandidateKind,
    hyphen_advance: f32,
}

#[derive(Copy, Clone, Debug)]
struct Node {
    cost: f64,
    /// Number of lines on the best path to this candidate.
    lines: usize,
    /// Predecessor candidate index plus one; zero is the paragraph start.
    prev: usize,
}

/// Breaks the whole paragraph with the dynamic program and commits the
/// resulting lines. `max_advance_for` maps a line number and start
/// cluster to the wrap width for that line (per-line indents and leading
/// margins).
pub(crate) fn break_optimal(
    data: &mut LayoutData,
    boundaries: &[Boundary],
    model: WidthModel,
    hyphen_advances: &[f32],
    strategy: BreakStrategy,
    max_advance_for: impl Fn(usize, usize) -> f32,
) {
    data.lines.clear();
    data.line_items.clear();

    let cluster_count = data.clusters.len();
    if cluster_count == 0 {
        push_line(
            data,
            0..0,
            max_advance_for(0, 0),
            BreakReason::None,
            EndHyphenEdit::NoEdit,
            0.0,
        );
        return;
    }

    let candidates = collect_candidates(data, boundaries, hyphen_advances);

    // Prefix sums of nominal advances and the visible (trailing
    // whitespace trimmed) end for every prefix.
    let mut prefix = Vec::with_capacity(cluster_count + 1);
    let mut trim = Vec::with_capacity(cluster_count + 1);
    prefix.push(0.0f64);
    trim.push(0usize);
    for (i, cluster) in data.clusters.iter().enumerate() {
        prefix.push(prefix[i] + f64::from(cluster.advance));
        trim.push(if cluster.whitespace { trim[i] } else { i + 1 });
    }

    let visible_advance = |start: usize, end: usize| -> f32 {
        let end = trim[end].max(start);
        (prefix[end] - prefix[start]) as f32
    };

    let last = candidates.len() - 1;
    let mut nodes: Vec<Option<Node>> = vec![None; candidates.len()];
    for k in 0..candidates.len() {
        let candidate = &candidates[k];
        let mut best: Option<Node> = None;

        // Scan predecessors backwards; `j == 0` is the paragraph start.
        for j in (0..=k).rev() {
            let (start, base) = if j == 0 {
                (
                    0,
                    Node {
                        cost: 0.0,
                        lines: 0,
                        prev: 0,
                    },
                )
            } else {
                match nodes[j - 1] {
                    Some(node) => (candidates[j - 1].cluster_end, node),
                    None => continue,
                }
            };
            if start >= candidate.cluster_end {
                continue;
            }

            let max_advance = max_advance_for(base.lines, start);
            let lower_bound = visible_advance(start, candidate.cluster_end);
            let overfull = lower_bound > max_advance;
            // Widths only grow as the start moves back; once even the
            // advance sum overflows, earlier starts are hopeless. The
            // adjacent predecessor is still evaluated so an overfull
            // path always exists.
            if overfull && j != k {
                break;
            }

            let width = match model {
                WidthModel::Advance => lower_bound + candidate.hyphen_advance,
                WidthModel::Bounds => bounds::fit_extent(
                    data,
                    start..candidate.cluster_end,
                    model,
                    candidate.hyphen_advance,
                ),
            };

            let slack = f64::from(max_advance - width);
            let mut line_cost = if width > max_advance {
                OVERFULL_COST + slack * slack
            } else if k == last && strategy == BreakStrategy::HighQuality {
                0.0
            } else {
                slack * slack
            };
            match candidate.kind {
                CandidateKind::Hyphen => {
                    let penalty = f64::from(0.5 * max_advance);
                    line_cost += penalty * penalty;
                }
                CandidateKind::Desperate => line_cost += DESPERATE_COST,
                _ => {}
            }

            let node = Node {
                cost: base.cost + line_cost,
                lines: base.lines + 1,
                prev: j,
            };
            let better = match &best {
                None => true,
                Some(b) => {
                    node.cost < b.cost
                        || (node.cost == b.cost
                            && (node.lines < b.lines
                                || (node.lines == b.lines && node.prev < b.prev)))
                }
            };
            if better {
                best = Some(node);
            }

            // A line cannot span a mandatory break.
            if j > 0 && candidates[j - 1].kind == CandidateKind::Mandatory {
                break;
            }
        }

        nodes[k] = best;
    }

    // Recover the path.
    let mut path = Vec::new();
    let mut k = last + 1;
    while k > 0 {
        path.push(k - 1);
        k = nodes[k - 1].expect("every candidate is reachable").prev;
    }
    path.reverse();

    trace!(lines = path.len(), strategy = ?strategy, "optimal break path");

    let mut start = 0;
    let mut line_number = 0;
    for (i, &k) in path.iter().enumerate() {
        let candidate = &candidates[k];
        let is_last = i + 1 == path.len();
        let reason = match candidate.kind {
            _ if is_last && candidate.kind != CandidateKind::Mandatory => BreakReason::None,
            CandidateKind::Mandatory => BreakReason::Explicit,
            CandidateKind::Desperate => BreakReason::Emergency,
            _ => BreakReason::Regular,
        };
        let end_hyphen = if candidate.kind == CandidateKind::Hyphen {
            EndHyphenEdit::InsertHyphen
        } else {
            EndHyphenEdit::NoEdit
        };
        push_line(
            data,
            start..candidate.cluster_end,
            max_advance_for(line_number, start),
            reason,
            end_hyphen,
            candidate.hyphen_advance,
        );
        start = candidate.cluster_end;
        line_number += 1;

        // A paragraph ending in a newline still has a final empty line.
        if is_last && candidate.kind == CandidateKind::Mandatory {
            push_line(
                data,
                start..start,
                max_advance_for(line_number, start),
                BreakReason::None,
                EndHyphenEdit::NoEdit,
                0.0,
            );
        }
    }
}

/// Collects break candidates in cluster order: one per cluster boundary,
/// upgraded to soft, hyphen or mandatory where an opportunity exists. The
/// final candidate always covers the paragraph end.
fn collect_candidates(
    data: &LayoutData,
    boundaries: &[Boundary],
    hyphen_advances: &[f32],
) -> Vec<Candidate> {
    let cluster_count = data.clusters.len();
    let hyphen_advance_before = |cluster_end: usize| -> f32 {
        data.runs
            .iter()
            .find(|run| run.cluster_range.contains(&(cluster_end - 1)))
            .map(|run| hyphen_advances[run.style_index as usize])
            .unwrap_or_default()
    };

    let mut candidates = Vec::with_capacity(cluster_count);
    for end in 1..=cluster_count {
        // A mandatory boundary sits after the newline cluster; soft and
        // hyphen boundaries before the next cluster.
        let cluster = &data.clusters[end - 1];
        if boundaries[cluster.text_range.end] == Boundary::Mandatory {
            candidates.push(Candidate {
                cluster_end: end,
                kind: CandidateKind::Mandatory,
                hyphen_advance: 0.0,
            });
            continue;
        }
        let kind = if end == cluster_count {
            CandidateKind::Soft
        } else {
            match boundaries[data.clusters[end].text_range.start] {
                Boundary::Soft => CandidateKind::Soft,
                Boundary::Hyphen => CandidateKind::Hyphen,
                _ => CandidateKind::Desperate,
            }
        };
        let hyphen_advance = if kind == CandidateKind::Hyphen {
            hyphen_advance_before(end)
        } else {
            0.0
        };
        candidates.push(Candidate {
            cluster_end: end,
            kind,
            hyphen_advance,
        });
    }
    candidates
}

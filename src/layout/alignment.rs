// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal line alignment.

use crate::layout::data::LayoutData;

/// Paragraph alignment, relative to the resolved base direction.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum Alignment {
    /// Flush with the start edge: left for LTR paragraphs, right for RTL.
    #[default]
    Normal,
    /// Flush with the end edge.
    Opposite,
    Center,
}

/// Computes each line's horizontal offset within the layout width.
///
/// Free space is measured against the visible line width, so hanging
/// trailing whitespace does not affect alignment. On right-to-left lines
/// that whitespace sits at the visual left; the offset shifts past it so
/// the visible content lands on the alignment edge.
pub(crate) fn align_lines(data: &mut LayoutData, alignment: Alignment) {
    let is_rtl = data.is_rtl();
    let width = data.width;
    for line in &mut data.lines {
        let free_space = width - line.metrics.max_width;
        line.metrics.offset = match (alignment, is_rtl) {
            (Alignment::Normal, false) | (Alignment::Opposite, true) => 0.0,
            (Alignment::Normal, true) | (Alignment::Opposite, false) => free_space,
            (Alignment::Center, _) => free_space * 0.5,
        };
        if is_rtl {
            line.metrics.offset -= line.metrics.trailing_whitespace;
        }
    }
}

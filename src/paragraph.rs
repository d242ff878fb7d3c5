// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable paragraph input: code points plus ranged span attributes.

use core::ops::Range;

use crate::style::{Span, SpanProperty};

/// An immutable run of text with style-override spans.
///
/// All public offsets into the paragraph are code point indices; the
/// paragraph owns the mapping to the UTF-8 byte offsets used by the
/// segmentation and bidi collaborators.
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    text: String,
    /// Byte offset of each code point, plus a trailing entry for the text
    /// length. `byte_of.len() == char_len + 1`.
    byte_of: Vec<usize>,
    spans: Vec<Span>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut byte_of: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        byte_of.push(text.len());
        Self {
            text,
            byte_of,
            spans: Vec::new(),
        }
    }

    /// Attaches a span to a half-open code point range.
    ///
    /// Span validity is checked at `build()` time, not here.
    pub fn add_span(&mut self, range: Range<usize>, property: SpanProperty) {
        self.spans.push(Span { range, property });
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.byte_of.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of the code point at `offset` (or the text length for
    /// `offset == len()`).
    pub(crate) fn byte_offset(&self, offset: usize) -> usize {
        self.byte_of[offset]
    }

    /// Code point index for a byte offset returned by a collaborator.
    ///
    /// The byte offset must fall on a code point boundary.
    pub(crate) fn char_offset(&self, byte: usize) -> usize {
        match self.byte_of.binary_search(&byte) {
            Ok(index) => index,
            // Collaborators only ever report boundaries; an interior byte
            // would indicate a broken Segmentation impl. Snap back rather
            // than panic.
            Err(index) => index - 1,
        }
    }

    pub(crate) fn char_at(&self, offset: usize) -> Option<char> {
        self.text[self.byte_of[offset]..].chars().next()
    }
}

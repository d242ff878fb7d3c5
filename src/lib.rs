// Copyright 2026 the Paraline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph line breaking and layout.
//!
//! Paraline turns a [`Paragraph`] of styled text into a [`Layout`]: a
//! sequence of positioned lines with resolved metrics. It performs
//! bidirectional analysis, line segmentation, greedy or optimal line
//! breaking, justification, vertical metrics aggregation and alignment.
//! Glyph measurement is delegated to a [`MetricsProvider`] so the crate
//! stays independent of any particular font stack.
//!
//! All offsets in the public API are code point indices into the
//! paragraph text.
//!
//! ```
//! # use paraline::*;
//! # fn demo<M: MetricsProvider, S: Segmentation>(provider: &M, segmentation: &S) {
//! let paragraph = Paragraph::new("hello world");
//! let layout = LayoutBuilder::new(&paragraph, provider, segmentation)
//!     .alignment(Alignment::Normal)
//!     .build(100.0)
//!     .unwrap();
//! for line in layout.lines() {
//!     let _ = (line.baseline(), line.offset(), line.width());
//! }
//! # }
//! ```

mod bidi;
mod builder;
mod paragraph;

pub mod layout;
pub mod segment;
pub mod shape;
pub mod style;

pub use bidi::TextDirection;
pub use builder::{BuildError, HyphenationFrequency, LayoutBuilder, TruncateAt};
pub use layout::{
    Alignment, BreakReason, BreakStrategy, EndHyphenEdit, JustificationMode, Layout, Line,
    LineMetrics, LineRun, MinimumFontMetrics, RunMetrics, WidthModel,
};
pub use paragraph::Paragraph;
pub use segment::{BreakKind, BreakOpportunity, IcuSegmenter, ResolvedWordStyle, Segmentation};
pub use shape::{MetricsProvider, Rect, ShapeRequest, ShapedCluster, ShapedRun};
pub use style::{
    LineBreakConfig, LineBreakStyle, LineBreakWordStyle, ResolvedSpanStyle, Span, SpanProperty,
};

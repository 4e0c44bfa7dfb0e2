#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared text primitives for the Tessera front end.
//!
//! - [`Position`] and [`LineIndex`]: character offsets to line/column
//! - [`SourceMap`]: owned sources addressed by [`SourceId`]
//! - [`Colors`]: ANSI palette for traces and dumps

mod colors;
mod position;
mod source_map;

pub use colors::Colors;
pub use position::{LineIndex, Position};
pub use source_map::{Source, SourceId, SourceKind, SourceMap};

#[cfg(test)]
mod source_map_tests;

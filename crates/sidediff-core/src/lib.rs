//! Line and word diff engine for side-by-side text comparison.
//!
//! Takes two texts and produces one row per displayed line, pairing the old
//! and new sides, detecting modified lines, and diffing within them.
//!
//! # Key Types
//!
//! - [`ComputedLineInformation`] / [`LineInformation`] / [`DiffInformation`] -- Engine output
//! - [`DiffMethod`] -- Granularity of the intra-line diff
//! - [`SequenceDiffer`] / [`SimilarDiffer`] -- The underlying sequence differencer
//! - [`DisplayBlock`] / [`SkippedBlock`] -- Folding of unchanged context
//! - [`DiffConfig`] -- TOML-loadable settings

pub mod compute;
pub mod config;
pub mod differ;
pub mod error;
pub mod fold;
pub mod lines;
pub mod method;
pub mod tokenize;
pub mod types;

pub use compute::{
    compute_line_information, compute_line_information_from_bytes, compute_line_information_with,
    compute_word_diff, ComputeOptions,
};
pub use config::DiffConfig;
pub use differ::{ChangeKind, Chunk, LineDiffOptions, SequenceDiffer, SimilarDiffer};
pub use error::{DiffError, DiffResult, Side};
pub use fold::{fold_unchanged, DisplayBlock, FoldOptions, SkippedBlock};
pub use method::DiffMethod;
pub use similar::Algorithm;
pub use types::{
    ComputedLineInformation, DiffInformation, DiffStats, DiffType, DiffValue, LineInformation,
};

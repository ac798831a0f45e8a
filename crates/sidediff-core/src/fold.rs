//! Context folding: which rows to show around the changes.
//!
//! Given a computed diff, unchanged rows far from any change collapse into
//! skipped blocks that a viewer can render as a single "N lines hidden"
//! marker and expand on demand.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ComputedLineInformation;

/// Options for [`fold_unchanged`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldOptions {
    /// Unchanged rows kept visible before and after each changed row.
    pub extra_lines_surrounding_diff: usize,
    /// Start rows of skipped blocks the viewer has expanded.
    pub expanded: BTreeSet<usize>,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            extra_lines_surrounding_diff: 3,
            expanded: BTreeSet::new(),
        }
    }
}

/// A run of hidden unchanged rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBlock {
    /// Index of the first hidden row.
    pub start: usize,
    /// Number of hidden rows.
    pub count: usize,
    /// Old-side line number of the first hidden row.
    pub left_line_number: Option<usize>,
    /// New-side line number of the first hidden row.
    pub right_line_number: Option<usize>,
}

/// One entry of the folded display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayBlock {
    /// Show the row at this index.
    Row(usize),
    /// Show a marker for hidden rows.
    Skipped(SkippedBlock),
}

/// Fold unchanged rows that are not within the context window of a change.
///
/// Changed rows are always shown. When nothing changed, all rows fold into
/// one block.
pub fn fold_unchanged(computed: &ComputedLineInformation, options: &FoldOptions) -> Vec<DisplayBlock> {
    let rows = &computed.line_information;
    let extra = options.extra_lines_surrounding_diff;

    let mut visible = vec![false; rows.len()];
    for (i, row) in rows.iter().enumerate() {
        if row.is_changed() {
            let end = (i + extra).min(rows.len() - 1);
            for flag in &mut visible[i.saturating_sub(extra)..=end] {
                *flag = true;
            }
        }
    }

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        if visible[i] {
            blocks.push(DisplayBlock::Row(i));
            i += 1;
            continue;
        }

        let start = i;
        while i < rows.len() && !visible[i] {
            i += 1;
        }
        if options.expanded.contains(&start) {
            blocks.extend((start..i).map(DisplayBlock::Row));
        } else {
            blocks.push(DisplayBlock::Skipped(SkippedBlock {
                start,
                count: i - start,
                left_line_number: rows[start].left.as_ref().and_then(|side| side.line_number),
                right_line_number: rows[start].right.as_ref().and_then(|side| side.line_number),
            }));
        }
    }

    debug!(rows = rows.len(), blocks = blocks.len(), "folded unchanged rows");
    blocks
}

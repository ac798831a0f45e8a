//! The line diff engine.
//!
//! Runs a line-granularity diff, expands every chunk into comparison rows,
//! pairs a removed line with the added line at the same position of the
//! immediately following chunk, and diffs each such pair within the line.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::differ::{ChangeKind, Chunk, LineDiffOptions, SequenceDiffer, SimilarDiffer};
use crate::error::{DiffError, DiffResult, Side};
use crate::lines::{construct_lines, extract_line};
use crate::method::DiffMethod;
use crate::types::{ComputedLineInformation, DiffInformation, DiffType, DiffValue, LineInformation};

/// Options for [`compute_line_information`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputeOptions {
    /// Show modified lines whole instead of diffing within them.
    pub disable_word_diff: bool,
    /// Granularity used within modified lines.
    pub compare_method: DiffMethod,
    /// Added to every line number, for texts that are a slice of a file.
    pub line_number_offset: usize,
}

/// Compare two texts line by line using the default differ.
pub fn compute_line_information(
    old_text: &str,
    new_text: &str,
    options: &ComputeOptions,
) -> DiffResult<ComputedLineInformation> {
    compute_line_information_with(&SimilarDiffer::default(), old_text, new_text, options)
}

/// Compare two byte buffers, rejecting anything that is not UTF-8 text.
pub fn compute_line_information_from_bytes(
    old: &[u8],
    new: &[u8],
    options: &ComputeOptions,
) -> DiffResult<ComputedLineInformation> {
    let old_text =
        std::str::from_utf8(old).map_err(|e| DiffError::invalid_input(Side::Old, e.to_string()))?;
    let new_text =
        std::str::from_utf8(new).map_err(|e| DiffError::invalid_input(Side::New, e.to_string()))?;
    compute_line_information(old_text, new_text, options)
}

/// Compare two texts line by line with a caller-supplied differ.
///
/// Trailing whitespace of both texts is ignored. Errors from the differ
/// are returned as-is and no partial result is produced.
pub fn compute_line_information_with(
    differ: &dyn SequenceDiffer,
    old_text: &str,
    new_text: &str,
    options: &ComputeOptions,
) -> DiffResult<ComputedLineInformation> {
    let line_options = LineDiffOptions {
        newline_is_token: true,
        ignore_case: false,
    };
    let chunks = differ.diff_lines(old_text.trim_end(), new_text.trim_end(), &line_options)?;
    debug!(chunks = chunks.len(), method = %options.compare_method, "line diff computed");

    let mut walker = LineWalker::new(differ, &chunks, options);
    for index in 0..chunks.len() {
        walker.walk_chunk(index)?;
    }
    let computed = walker.finish();
    debug!(
        rows = computed.line_information.len(),
        hunks = computed.diff_lines.len(),
        "line information computed"
    );
    Ok(computed)
}

/// Diff one old line against one new line at `method` granularity.
///
/// Returns the segments of the old side (removed and unchanged) and of the
/// new side (added and unchanged).
pub fn compute_word_diff(
    old_line: &str,
    new_line: &str,
    method: DiffMethod,
    differ: &dyn SequenceDiffer,
) -> DiffResult<(Vec<DiffInformation>, Vec<DiffInformation>)> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for chunk in differ.diff_at_granularity(method, old_line, new_line)? {
        match chunk.kind {
            ChangeKind::Added => right.push(DiffInformation::segment(DiffType::Added, chunk.value)),
            ChangeKind::Removed => left.push(DiffInformation::segment(DiffType::Removed, chunk.value)),
            ChangeKind::Unchanged => {
                let segment = DiffInformation::segment(DiffType::Default, chunk.value);
                left.push(segment.clone());
                right.push(segment);
            }
        }
    }
    Ok((left, right))
}

/// Per-call state of the engine.
struct LineWalker<'a> {
    differ: &'a dyn SequenceDiffer,
    chunks: &'a [Chunk],
    options: &'a ComputeOptions,
    left_line_number: usize,
    right_line_number: usize,
    /// `(chunk, line)` positions of added lines already shown as the right
    /// half of a modification.
    consumed: HashSet<(usize, usize)>,
    rows: Vec<LineInformation>,
    diff_lines: Vec<usize>,
}

impl<'a> LineWalker<'a> {
    fn new(differ: &'a dyn SequenceDiffer, chunks: &'a [Chunk], options: &'a ComputeOptions) -> Self {
        Self {
            differ,
            chunks,
            options,
            left_line_number: options.line_number_offset,
            right_line_number: options.line_number_offset,
            consumed: HashSet::new(),
            rows: Vec::new(),
            diff_lines: Vec::new(),
        }
    }

    fn walk_chunk(&mut self, index: usize) -> DiffResult<()> {
        let chunks = self.chunks;
        let chunk = &chunks[index];
        for (line_index, line) in construct_lines(&chunk.value).into_iter().enumerate() {
            if self.consumed.contains(&(index, line_index)) {
                continue;
            }
            let row = match chunk.kind {
                ChangeKind::Unchanged => self.unchanged_row(line),
                ChangeKind::Removed => self.removed_row(index, line_index, line)?,
                ChangeKind::Added => self.added_row(line),
            };
            self.push(row);
        }
        Ok(())
    }

    fn unchanged_row(&mut self, line: &str) -> LineInformation {
        self.left_line_number += 1;
        self.right_line_number += 1;
        LineInformation {
            left: Some(DiffInformation::line(self.left_line_number, DiffType::Default, line)),
            right: Some(DiffInformation::line(self.right_line_number, DiffType::Default, line)),
        }
    }

    fn added_row(&mut self, line: &str) -> LineInformation {
        self.right_line_number += 1;
        LineInformation {
            left: None,
            right: Some(DiffInformation::line(self.right_line_number, DiffType::Added, line)),
        }
    }

    fn removed_row(&mut self, index: usize, line_index: usize, line: &str) -> DiffResult<LineInformation> {
        self.left_line_number += 1;
        let shown = if line.is_empty() { " " } else { line };
        let mut left = DiffInformation::line(self.left_line_number, DiffType::Removed, shown);

        // Pairing stops at the first empty added line so that paired rows
        // stay a prefix of the added block.
        let chunks = self.chunks;
        let follows_pair = line_index == 0 || self.consumed.contains(&(index + 1, line_index - 1));
        let paired = chunks
            .get(index + 1)
            .filter(|next| next.is_added() && follows_pair)
            .and_then(|next| extract_line(&next.value, line_index))
            .filter(|line| !line.is_empty());

        let Some(new_line) = paired else {
            return Ok(LineInformation { left: Some(left), right: None });
        };

        self.right_line_number += 1;
        self.consumed.insert((index + 1, line_index));
        trace!(
            left = self.left_line_number,
            right = self.right_line_number,
            "paired removed and added line"
        );

        let mut right = DiffInformation::line(self.right_line_number, DiffType::Added, new_line);
        if !self.options.disable_word_diff {
            let (left_segments, right_segments) =
                compute_word_diff(line, new_line, self.options.compare_method, self.differ)?;
            left.value = DiffValue::Segments(left_segments);
            right.value = DiffValue::Segments(right_segments);
        }
        Ok(LineInformation { left: Some(left), right: Some(right) })
    }

    fn push(&mut self, row: LineInformation) {
        let counter = self.rows.len();
        if row.is_changed() && self.diff_lines.last() != Some(&counter) {
            self.diff_lines.push(counter);
        }
        self.rows.push(row);
    }

    fn finish(self) -> ComputedLineInformation {
        ComputedLineInformation {
            line_information: self.rows,
            diff_lines: self.diff_lines,
        }
    }
}

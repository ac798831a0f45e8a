//! The sequence differencer: turns two texts into ordered change chunks.
//!
//! The engine only talks to a [`SequenceDiffer`]. [`SimilarDiffer`] is the
//! default implementation, running the `similar` crate's algorithms over
//! token slices produced by [`crate::tokenize`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag};

use crate::error::DiffResult;
use crate::method::DiffMethod;
use crate::tokenize;

/// Classification of a [`Chunk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Removed,
}

/// A run of text belonging entirely to one classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub kind: ChangeKind,
    pub value: String,
}

impl Chunk {
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self { kind: ChangeKind::Unchanged, value: value.into() }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self { kind: ChangeKind::Added, value: value.into() }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self { kind: ChangeKind::Removed, value: value.into() }
    }

    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == ChangeKind::Removed
    }
}

/// Options for line-granularity diffing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineDiffOptions {
    /// Treat line terminators as tokens of their own.
    pub newline_is_token: bool,
    /// Compare lines case-insensitively.
    pub ignore_case: bool,
}

impl Default for LineDiffOptions {
    fn default() -> Self {
        Self {
            newline_is_token: true,
            ignore_case: false,
        }
    }
}

/// A generic sequence differencer.
///
/// Implementations must emit chunks in document order, with removals
/// before additions inside each changed region, and never emit an empty
/// chunk. Concatenating the unchanged and removed chunks must give the old
/// text; unchanged and added chunks give the new text.
pub trait SequenceDiffer: Send + Sync {
    /// Diff two texts line by line.
    fn diff_lines(&self, old: &str, new: &str, options: &LineDiffOptions) -> DiffResult<Vec<Chunk>>;

    /// Diff two texts at the given granularity.
    fn diff_at_granularity(&self, method: DiffMethod, old: &str, new: &str) -> DiffResult<Vec<Chunk>>;
}

/// [`SequenceDiffer`] backed by the `similar` crate.
#[derive(Clone, Copy, Debug)]
pub struct SimilarDiffer {
    algorithm: Algorithm,
}

impl Default for SimilarDiffer {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
        }
    }
}

impl SimilarDiffer {
    /// A differ using the Myers algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// A differ using a specific `similar` algorithm.
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    fn diff_tokens<'a>(
        &self,
        old: &[&'a str],
        new: &[&'a str],
        key: impl Fn(&'a str) -> Cow<'a, str>,
    ) -> Vec<Chunk> {
        let old_keys: Vec<Cow<'a, str>> = old.iter().map(|t| key(*t)).collect();
        let new_keys: Vec<Cow<'a, str>> = new.iter().map(|t| key(*t)).collect();

        let mut builder = ChunkBuilder::default();
        for op in similar::capture_diff_slices(self.algorithm, &old_keys, &new_keys) {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                // Unchanged spans take the new side's text.
                DiffTag::Equal => builder.unchanged(&new[new_range].concat()),
                DiffTag::Delete => builder.removed(&old[old_range].concat()),
                DiffTag::Insert => builder.added(&new[new_range].concat()),
                DiffTag::Replace => {
                    builder.removed(&old[old_range].concat());
                    builder.added(&new[new_range].concat());
                }
            }
        }
        builder.finish()
    }
}

impl SequenceDiffer for SimilarDiffer {
    fn diff_lines(&self, old: &str, new: &str, options: &LineDiffOptions) -> DiffResult<Vec<Chunk>> {
        let old_tokens = tokenize::line_tokens(old, options.newline_is_token);
        let new_tokens = tokenize::line_tokens(new, options.newline_is_token);
        let chunks = if options.ignore_case {
            self.diff_tokens(&old_tokens, &new_tokens, |t| Cow::Owned(t.to_lowercase()))
        } else {
            self.diff_tokens(&old_tokens, &new_tokens, Cow::Borrowed)
        };
        Ok(chunks)
    }

    fn diff_at_granularity(&self, method: DiffMethod, old: &str, new: &str) -> DiffResult<Vec<Chunk>> {
        let chunks = match method {
            DiffMethod::Chars => self.diff_tokens(
                &tokenize::char_tokens(old),
                &tokenize::char_tokens(new),
                Cow::Borrowed,
            ),
            DiffMethod::Words => self.diff_tokens(
                &tokenize::word_tokens(old),
                &tokenize::word_tokens(new),
                |t| {
                    if t.chars().all(char::is_whitespace) {
                        Cow::Borrowed(" ")
                    } else {
                        Cow::Borrowed(t)
                    }
                },
            ),
            DiffMethod::WordsWithSpace => self.diff_tokens(
                &tokenize::word_tokens(old),
                &tokenize::word_tokens(new),
                Cow::Borrowed,
            ),
            DiffMethod::Lines => self.diff_tokens(
                &tokenize::line_tokens(old, false),
                &tokenize::line_tokens(new, false),
                Cow::Borrowed,
            ),
            DiffMethod::TrimmedLines => self.diff_tokens(
                &tokenize::line_tokens(old, false),
                &tokenize::line_tokens(new, false),
                |t| Cow::Borrowed(t.trim()),
            ),
            DiffMethod::Sentences => self.diff_tokens(
                &tokenize::sentence_tokens(old),
                &tokenize::sentence_tokens(new),
                Cow::Borrowed,
            ),
            DiffMethod::Css => self.diff_tokens(
                &tokenize::css_tokens(old),
                &tokenize::css_tokens(new),
                Cow::Borrowed,
            ),
        };
        Ok(chunks)
    }
}

/// Accumulates chunks, holding back removals and additions until the next
/// unchanged span so that each changed region emits removals first.
#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<Chunk>,
    removed: String,
    added: String,
}

impl ChunkBuilder {
    fn unchanged(&mut self, value: &str) {
        self.flush();
        if value.is_empty() {
            return;
        }
        match self.chunks.last_mut() {
            Some(last) if last.kind == ChangeKind::Unchanged => last.value.push_str(value),
            _ => self.chunks.push(Chunk::unchanged(value)),
        }
    }

    fn removed(&mut self, value: &str) {
        self.removed.push_str(value);
    }

    fn added(&mut self, value: &str) {
        self.added.push_str(value);
    }

    fn flush(&mut self) {
        if !self.removed.is_empty() {
            self.chunks.push(Chunk::removed(std::mem::take(&mut self.removed)));
        }
        if !self.added.is_empty() {
            self.chunks.push(Chunk::added(std::mem::take(&mut self.added)));
        }
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(old: &str, new: &str) -> Vec<Chunk> {
        SimilarDiffer::new()
            .diff_lines(old, new, &LineDiffOptions::default())
            .unwrap()
    }

    fn granular(method: DiffMethod, old: &str, new: &str) -> Vec<Chunk> {
        SimilarDiffer::new().diff_at_granularity(method, old, new).unwrap()
    }

    fn side_text(chunks: &[Chunk], skip: ChangeKind) -> String {
        chunks
            .iter()
            .filter(|c| c.kind != skip)
            .map(|c| c.value.as_str())
            .collect()
    }

    #[test]
    fn modified_line_yields_removed_then_added() {
        assert_eq!(
            lines("test\n    oldLine", "test\n    newLine"),
            vec![
                Chunk::unchanged("test\n"),
                Chunk::removed("    oldLine"),
                Chunk::added("    newLine"),
            ]
        );
    }

    #[test]
    fn appended_line_carries_its_newline() {
        assert_eq!(
            lines("test", "test\n    newLine"),
            vec![Chunk::unchanged("test"), Chunk::added("\n    newLine")]
        );
    }

    #[test]
    fn identical_texts_are_one_chunk() {
        assert_eq!(lines("a\nb", "a\nb"), vec![Chunk::unchanged("a\nb")]);
        assert!(lines("", "").is_empty());
    }

    #[test]
    fn ignore_case_matches_lines() {
        let chunks = SimilarDiffer::new()
            .diff_lines(
                "Hello\nworld",
                "hello\nworld",
                &LineDiffOptions { newline_is_token: true, ignore_case: true },
            )
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChangeKind::Unchanged);
    }

    #[test]
    fn char_diff_isolates_changed_span() {
        assert_eq!(
            granular(DiffMethod::Chars, "    oldLine", "    newLine"),
            vec![
                Chunk::unchanged("    "),
                Chunk::removed("old"),
                Chunk::added("new"),
                Chunk::unchanged("Line"),
            ]
        );
    }

    #[test]
    fn word_diff_is_coarser_than_char_diff() {
        let chars = granular(DiffMethod::Chars, "Hello World", "My Updated Name");
        let words = granular(DiffMethod::Words, "Hello World", "My Updated Name");
        assert_ne!(chars, words);
        assert!(words.len() < chars.len());
    }

    #[test]
    fn words_ignore_whitespace_width() {
        let chunks = granular(DiffMethod::Words, "a  b", "a b");
        assert_eq!(chunks, vec![Chunk::unchanged("a b")]);
        let chunks = granular(DiffMethod::WordsWithSpace, "a  b", "a b");
        assert!(chunks.iter().any(Chunk::is_removed));
    }

    #[test]
    fn trimmed_lines_ignore_indentation() {
        let chunks = granular(DiffMethod::TrimmedLines, "  x", "x");
        assert_eq!(chunks, vec![Chunk::unchanged("x")]);
    }

    #[test]
    fn changed_regions_list_removals_first() {
        for method in DiffMethod::ALL {
            let chunks = granular(method, "one two. three", "uno two! tres");
            for pair in chunks.windows(2) {
                assert!(!(pair[0].is_added() && pair[1].is_removed()), "{method}: {chunks:?}");
            }
        }
    }

    #[test]
    fn sides_reconstruct_inputs() {
        let old = "fn main() { println!(\"hi\"); }";
        let new = "fn main() { eprintln!(\"bye\"); }";
        for method in [DiffMethod::Chars, DiffMethod::WordsWithSpace, DiffMethod::Css, DiffMethod::Lines] {
            let chunks = granular(method, old, new);
            assert_eq!(side_text(&chunks, ChangeKind::Added), old, "{method}");
            assert_eq!(side_text(&chunks, ChangeKind::Removed), new, "{method}");
        }
    }

    #[test]
    fn patience_algorithm_also_supported() {
        let differ = SimilarDiffer::with_algorithm(Algorithm::Patience);
        let chunks = differ
            .diff_lines("a\nb\nc", "a\nc", &LineDiffOptions::default())
            .unwrap();
        assert!(chunks.iter().any(Chunk::is_removed));
        assert!(!chunks.iter().any(Chunk::is_added));
    }
}

//! Output model of the engine: per-side diff units and comparison rows.

use serde::{Deserialize, Serialize};

/// Classification of a unit of diff output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    /// Present unchanged on both sides.
    #[default]
    Default,
    /// Present only in the new document.
    Added,
    /// Present only in the old document.
    Removed,
}

impl DiffType {
    /// Returns `true` for [`DiffType::Added`] and [`DiffType::Removed`].
    pub fn is_changed(self) -> bool {
        !matches!(self, DiffType::Default)
    }
}

/// Content of a [`DiffInformation`].
///
/// A plain line of text, or, for a modified line, the ordered intra-line
/// segments whose concatenation is the line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    Text(String),
    Segments(Vec<DiffInformation>),
}

impl DiffValue {
    /// Returns `true` if this value carries intra-line segments.
    pub fn is_segments(&self) -> bool {
        matches!(self, DiffValue::Segments(_))
    }
}

impl From<&str> for DiffValue {
    fn from(value: &str) -> Self {
        DiffValue::Text(value.to_string())
    }
}

impl From<String> for DiffValue {
    fn from(value: String) -> Self {
        DiffValue::Text(value)
    }
}

/// One unit of diff output: a side of a row, or a segment inside a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffInformation {
    pub value: DiffValue,
    /// 1-based line number in the respective document. Segments carry none.
    #[serde(rename = "lineNumber", default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(rename = "type")]
    pub diff_type: DiffType,
}

impl DiffInformation {
    /// A numbered line of text.
    pub fn line(line_number: usize, diff_type: DiffType, value: impl Into<DiffValue>) -> Self {
        Self {
            value: value.into(),
            line_number: Some(line_number),
            diff_type,
        }
    }

    /// An unnumbered intra-line segment.
    pub fn segment(diff_type: DiffType, value: impl Into<String>) -> Self {
        Self {
            value: DiffValue::Text(value.into()),
            line_number: None,
            diff_type,
        }
    }

    /// The full text of this unit, concatenating segments if present.
    pub fn text(&self) -> String {
        match &self.value {
            DiffValue::Text(text) => text.clone(),
            DiffValue::Segments(segments) => segments.iter().map(DiffInformation::text).collect(),
        }
    }
}

/// A single row of the comparison: the old side and the new side.
///
/// `left` is never [`DiffType::Added`] and `right` is never
/// [`DiffType::Removed`]. A side with no corresponding line is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<DiffInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<DiffInformation>,
}

impl LineInformation {
    /// Returns `true` if either side is added or removed.
    pub fn is_changed(&self) -> bool {
        [&self.left, &self.right]
            .into_iter()
            .flatten()
            .any(|side| side.diff_type.is_changed())
    }

    /// Returns `true` if the row pairs a removed line with an added one.
    pub fn is_modification(&self) -> bool {
        matches!(
            (&self.left, &self.right),
            (Some(l), Some(r)) if l.diff_type == DiffType::Removed && r.diff_type == DiffType::Added
        )
    }
}

/// Change counts over a computed diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Rows with an added right side (modifications included).
    pub additions: usize,
    /// Rows with a removed left side (modifications included).
    pub deletions: usize,
    /// Rows pairing a removed line with an added line.
    pub modifications: usize,
}

/// The complete engine output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLineInformation {
    #[serde(rename = "lineInformation")]
    pub line_information: Vec<LineInformation>,
    /// Index of every changed row, in order and without duplicates.
    #[serde(rename = "diffLines")]
    pub diff_lines: Vec<usize>,
}

impl ComputedLineInformation {
    /// Returns `true` if no row carries a change.
    pub fn is_unchanged(&self) -> bool {
        self.diff_lines.is_empty()
    }

    /// Indices of every changed row, in order.
    pub fn changed_rows(&self) -> Vec<usize> {
        self.line_information
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_changed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Count additions, deletions and modifications.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for row in &self.line_information {
            if matches!(&row.left, Some(l) if l.diff_type == DiffType::Removed) {
                stats.deletions += 1;
            }
            if matches!(&row.right, Some(r) if r.diff_type == DiffType::Added) {
                stats.additions += 1;
            }
            if row.is_modification() {
                stats.modifications += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed_row(n: usize, text: &str) -> LineInformation {
        LineInformation {
            left: Some(DiffInformation::line(n, DiffType::Removed, text)),
            right: None,
        }
    }

    #[test]
    fn text_concatenates_segments() {
        let info = DiffInformation::line(
            2,
            DiffType::Removed,
            DiffValue::Segments(vec![
                DiffInformation::segment(DiffType::Default, "    "),
                DiffInformation::segment(DiffType::Removed, "old"),
                DiffInformation::segment(DiffType::Default, "Line"),
            ]),
        );
        assert_eq!(info.text(), "    oldLine");
    }

    #[test]
    fn default_rows_are_not_changed() {
        let row = LineInformation {
            left: Some(DiffInformation::line(1, DiffType::Default, "a")),
            right: Some(DiffInformation::line(1, DiffType::Default, "a")),
        };
        assert!(!row.is_changed());
        assert!(removed_row(1, "a").is_changed());
    }

    #[test]
    fn stats_count_modifications_on_both_sides() {
        let computed = ComputedLineInformation {
            line_information: vec![
                removed_row(1, "gone"),
                LineInformation {
                    left: Some(DiffInformation::line(2, DiffType::Removed, "x")),
                    right: Some(DiffInformation::line(1, DiffType::Added, "y")),
                },
                LineInformation {
                    left: None,
                    right: Some(DiffInformation::line(2, DiffType::Added, "new")),
                },
            ],
            diff_lines: vec![0, 1, 2],
        };
        let stats = computed.stats();
        assert_eq!(stats.deletions, 2);
        assert_eq!(stats.additions, 2);
        assert_eq!(stats.modifications, 1);
        assert_eq!(computed.changed_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn serializes_with_omitted_sides() {
        let row = LineInformation {
            left: None,
            right: Some(DiffInformation::line(2, DiffType::Added, "    newLine")),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "right": { "value": "    newLine", "lineNumber": 2, "type": "added" }
            })
        );
    }

    #[test]
    fn segments_round_trip_through_json() {
        let info = DiffInformation::line(
            3,
            DiffType::Added,
            DiffValue::Segments(vec![DiffInformation::segment(DiffType::Added, "new")]),
        );
        let json = serde_json::to_string(&info).unwrap();
        let back: DiffInformation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}

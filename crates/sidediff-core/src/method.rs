//! Intra-line comparison granularities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Granularity used to compare the two halves of a modified line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffMethod {
    /// Character by character.
    #[default]
    Chars,
    /// Word by word, treating any two whitespace runs as equal.
    Words,
    /// Word by word, whitespace significant.
    WordsWithSpace,
    /// Whole lines.
    Lines,
    /// Whole lines, ignoring leading and trailing whitespace.
    TrimmedLines,
    /// Sentence by sentence.
    Sentences,
    /// CSS tokens.
    Css,
}

impl DiffMethod {
    /// Every method, in declaration order.
    pub const ALL: [DiffMethod; 7] = [
        DiffMethod::Chars,
        DiffMethod::Words,
        DiffMethod::WordsWithSpace,
        DiffMethod::Lines,
        DiffMethod::TrimmedLines,
        DiffMethod::Sentences,
        DiffMethod::Css,
    ];

    /// The canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            DiffMethod::Chars => "chars",
            DiffMethod::Words => "words",
            DiffMethod::WordsWithSpace => "words-with-space",
            DiffMethod::Lines => "lines",
            DiffMethod::TrimmedLines => "trimmed-lines",
            DiffMethod::Sentences => "sentences",
            DiffMethod::Css => "css",
        }
    }
}

impl fmt::Display for DiffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffMethod {
    type Err = DiffError;

    /// Accepts the kebab-case names and the `diffXxx` names used by
    /// JavaScript diff viewers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "chars" | "diffChars" => DiffMethod::Chars,
            "words" | "diffWords" => DiffMethod::Words,
            "words-with-space" | "diffWordsWithSpace" => DiffMethod::WordsWithSpace,
            "lines" | "diffLines" => DiffMethod::Lines,
            "trimmed-lines" | "diffTrimmedLines" => DiffMethod::TrimmedLines,
            "sentences" | "diffSentences" => DiffMethod::Sentences,
            "css" | "diffCss" => DiffMethod::Css,
            other => return Err(DiffError::UnsupportedMethod(other.to_string())),
        };
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_chars() {
        assert_eq!(DiffMethod::default(), DiffMethod::Chars);
    }

    #[test]
    fn names_parse_back() {
        for method in DiffMethod::ALL {
            assert_eq!(method.to_string().parse::<DiffMethod>().unwrap(), method);
        }
    }

    #[test]
    fn legacy_names_accepted() {
        assert_eq!("diffWordsWithSpace".parse::<DiffMethod>().unwrap(), DiffMethod::WordsWithSpace);
        assert_eq!("diffCss".parse::<DiffMethod>().unwrap(), DiffMethod::Css);
    }

    #[test]
    fn unknown_method_rejected() {
        let err = "diffJson".parse::<DiffMethod>().unwrap_err();
        assert!(matches!(err, DiffError::UnsupportedMethod(name) if name == "diffJson"));
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&DiffMethod::TrimmedLines).unwrap();
        assert_eq!(json, "\"trimmed-lines\"");
    }
}

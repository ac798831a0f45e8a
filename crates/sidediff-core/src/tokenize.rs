//! Tokenizers backing each comparison granularity.
//!
//! Every tokenizer returns borrowed slices whose concatenation is exactly
//! the input.

/// Character classes used to group runs of characters into tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Punct,
    /// Always a token of its own.
    Single,
}

/// Split `text` into maximal runs of the same class.
fn split_runs(text: &str, classify: impl Fn(char) -> CharClass) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, ch) in text.char_indices() {
        let class = classify(ch);
        if let Some(prev) = current {
            if prev != class || class == CharClass::Single {
                tokens.push(&text[start..idx]);
                start = idx;
            }
        }
        current = Some(class);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Split text into lines.
///
/// With `newline_is_token`, line contents and line terminators (`\n` or
/// `\r\n`) become separate tokens and empty contents are dropped. Otherwise
/// each line keeps its terminator.
pub fn line_tokens(text: &str, newline_is_token: bool) -> Vec<&str> {
    if !newline_is_token {
        return text.split_inclusive('\n').collect();
    }

    let mut tokens = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices('\n') {
        let (content_end, newline_start) = if idx > start && text.as_bytes()[idx - 1] == b'\r' {
            (idx - 1, idx - 1)
        } else {
            (idx, idx)
        };
        if content_end > start {
            tokens.push(&text[start..content_end]);
        }
        tokens.push(&text[newline_start..=idx]);
        start = idx + 1;
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// One token per Unicode scalar value.
pub fn char_tokens(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
        .collect()
}

/// Word runs, whitespace runs and punctuation runs. Brackets and quotes are
/// always single tokens.
pub fn word_tokens(text: &str) -> Vec<&str> {
    split_runs(text, |ch| match ch {
        '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' => CharClass::Single,
        c if c.is_whitespace() => CharClass::Space,
        c if c.is_alphanumeric() || c == '_' => CharClass::Word,
        _ => CharClass::Punct,
    })
}

/// CSS tokens: `{ } : ; ,` on their own, whitespace runs, and everything
/// in between.
pub fn css_tokens(text: &str) -> Vec<&str> {
    split_runs(text, |ch| match ch {
        '{' | '}' | ':' | ';' | ',' => CharClass::Single,
        c if c.is_whitespace() => CharClass::Space,
        _ => CharClass::Word,
    })
}

/// Sentences ending in `.`, `!` or `?` followed by whitespace or the end of
/// the text, with the whitespace between them as separate tokens.
pub fn sentence_tokens(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = chars[i].0;
        if chars[i].1.is_whitespace() {
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }
            tokens.push(&text[start..byte_at(&chars, i, text.len())]);
            continue;
        }

        // A sentence spans at least two characters, terminator included.
        let mut end = None;
        let mut k = i + 1;
        while k < chars.len() {
            let at_boundary = chars.get(k + 1).map_or(true, |(_, next)| next.is_whitespace());
            if matches!(chars[k].1, '.' | '!' | '?') && at_boundary {
                end = Some(k + 1);
                break;
            }
            k += 1;
        }
        let next = end.unwrap_or(chars.len());
        tokens.push(&text[start..byte_at(&chars, next, text.len())]);
        i = next;
    }
    tokens
}

fn byte_at(chars: &[(usize, char)], i: usize, len: usize) -> usize {
    chars.get(i).map_or(len, |(idx, _)| *idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_tokens_are_separate() {
        assert_eq!(line_tokens("test\n    newLine", true), vec!["test", "\n", "    newLine"]);
        assert_eq!(line_tokens("a\n\nb\n", true), vec!["a", "\n", "\n", "b", "\n"]);
    }

    #[test]
    fn crlf_is_one_token() {
        assert_eq!(line_tokens("a\r\nb", true), vec!["a", "\r\n", "b"]);
    }

    #[test]
    fn lines_keep_terminators_without_newline_tokens() {
        assert_eq!(line_tokens("a\nb\n", false), vec!["a\n", "b\n"]);
        assert!(line_tokens("", false).is_empty());
    }

    #[test]
    fn chars_handle_multibyte() {
        assert_eq!(char_tokens("aé€"), vec!["a", "é", "€"]);
    }

    #[test]
    fn words_split_on_class_changes() {
        assert_eq!(
            word_tokens("let x = foo(bar);"),
            vec!["let", " ", "x", " ", "=", " ", "foo", "(", "bar", ")", ";"]
        );
        assert_eq!(word_tokens("a->b"), vec!["a", "->", "b"]);
    }

    #[test]
    fn quotes_are_single_tokens() {
        assert_eq!(word_tokens("\"\"x"), vec!["\"", "\"", "x"]);
    }

    #[test]
    fn css_delimiters() {
        assert_eq!(
            css_tokens("a{color:red;}"),
            vec!["a", "{", "color", ":", "red", ";", "}"]
        );
    }

    #[test]
    fn sentences() {
        assert_eq!(
            sentence_tokens("Hi there. How are you? Fine"),
            vec!["Hi there.", " ", "How are you?", " ", "Fine"]
        );
        assert_eq!(sentence_tokens("v1.2 is out."), vec!["v1.2 is out."]);
    }

    #[test]
    fn tokens_reconstruct_input() {
        let text = "  Mixed {text}, with: punctuation!  And more.";
        for tokens in [
            char_tokens(text),
            word_tokens(text),
            css_tokens(text),
            sentence_tokens(text),
            line_tokens(text, false),
        ] {
            assert_eq!(tokens.concat(), text);
        }
    }
}

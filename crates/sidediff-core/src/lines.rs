//! Splitting chunk values into physical lines.

/// Split a chunk value on `\n`, trimming the empty edges that a chunk
/// boundary leaves behind.
///
/// - A value that is only newlines loses its final empty element, and a
///   lone `"\n"` yields nothing at all.
/// - Otherwise an empty last element is dropped, then an empty first one.
pub fn construct_lines(value: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = value.split('\n').collect();

    if lines.iter().all(|line| line.is_empty()) {
        if lines.len() == 2 {
            return Vec::new();
        }
        lines.pop();
        return lines;
    }

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    if lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    lines
}

/// The physical line at `index` of a chunk value, as [`construct_lines`]
/// would produce it.
pub fn extract_line(value: &str, index: usize) -> Option<&str> {
    construct_lines(value).get(index).copied()
}

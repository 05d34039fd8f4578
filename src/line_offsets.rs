/// Index of the line boundaries of a text.
///
/// All offsets are char indices. A text always has at least one line: `""`
/// has a single empty line and `"a\n"` has two lines, the second one empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsets {
    /// Char offset of every line's terminating `\n`, or the text length for
    /// the last line.
    line_ends: Vec<usize>,
    text_length: usize,
}

impl LineOffsets {
    #[must_use]
    pub fn new(text: &[char]) -> Self {
        let mut line_ends: Vec<usize> = text
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (*c == '\n').then_some(i))
            .collect();
        line_ends.push(text.len());

        Self {
            line_ends,
            text_length: text.len(),
        }
    }

    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        debug_assert!(line < self.line_count(), "Line {line} is out of bounds");

        if line == 0 { 0 } else { self.line_ends[line - 1] + 1 }
    }

    /// End of the line's content, excluding the terminating `\n`.
    #[must_use]
    pub fn line_end(&self, line: usize) -> usize { self.line_ends[line] }

    /// End of the line, optionally including the terminating `\n`. The last
    /// line has no terminator.
    #[must_use]
    pub fn line_end_with_newline(&self, line: usize, include_newline: bool) -> usize {
        if include_newline && line + 1 < self.line_count() {
            self.line_ends[line] + 1
        } else {
            self.line_ends[line]
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize { self.line_ends.len() }

    #[must_use]
    pub fn text_length(&self) -> usize { self.text_length }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn offsets(text: &str) -> LineOffsets { LineOffsets::new(&text.chars().collect::<Vec<_>>()) }

    #[test]
    fn test_empty_text() {
        let offsets = offsets("");

        assert_eq!(offsets.line_count(), 1);
        assert_eq!(offsets.line_start(0), 0);
        assert_eq!(offsets.line_end(0), 0);
        assert_eq!(offsets.line_end_with_newline(0, true), 0);
    }

    #[test]
    fn test_trailing_newline() {
        let offsets = offsets("ab\n");

        assert_eq!(offsets.line_count(), 2);
        assert_eq!(offsets.line_end(0), 2);
        assert_eq!(offsets.line_end_with_newline(0, true), 3);
        assert_eq!(offsets.line_start(1), 3);
        assert_eq!(offsets.line_end_with_newline(1, true), 3);
    }

    #[test]
    fn test_multibyte_characters_are_single_offsets() {
        let offsets = offsets("こんにちは\n世界");

        assert_eq!(offsets.line_end(0), 5);
        assert_eq!(offsets.line_start(1), 6);
        assert_eq!(offsets.text_length(), 8);
    }
}

/// A helper for building a string in-order from an original text and a
/// series of copies, skips and insertions applied to it. All lengths are
/// char counts. The methods must be called in-order.
#[derive(Debug)]
pub struct StringBuilder<'a> {
    original: &'a [char],
    position: usize,
    buffer: String,
}

impl<'a> StringBuilder<'a> {
    #[must_use]
    pub fn new(original: &'a [char]) -> Self {
        StringBuilder {
            original,
            position: 0,
            buffer: String::with_capacity(original.len()),
        }
    }

    /// Append `text` to the built buffer.
    pub fn insert(&mut self, text: &[char]) { self.buffer.extend(text); }

    /// Skip `length` characters of the original text.
    pub fn delete(&mut self, length: usize) {
        debug_assert!(
            self.position + length <= self.original.len(),
            "Deleting past the end of the original text"
        );

        self.position += length;
    }

    /// Copy `length` characters from the original text to the built buffer.
    pub fn retain(&mut self, length: usize) {
        let end = self.position + length;
        debug_assert!(end <= self.original.len(), "Retaining past the end of the original text");

        self.buffer.extend(&self.original[self.position..end]);
        self.position = end;
    }

    /// Number of original characters consumed so far.
    #[must_use]
    pub fn position(&self) -> usize { self.position }

    /// Copy the rest of the original text and return the built string.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.retain(self.original.len() - self.position);
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_string_builder() {
        let original = chars("aaa bbb ccc");
        let mut builder = StringBuilder::new(&original);

        builder.insert(&chars("ddd"));
        builder.delete(3);
        builder.retain(8);
        builder.insert(&chars(" eee"));

        assert_eq!(builder.finish(), "ddd bbb ccc eee");
    }

    #[test]
    fn test_finish_copies_the_rest() {
        let original = chars("abcde");
        let mut builder = StringBuilder::new(&original);

        builder.retain(1);
        builder.delete(3);
        assert_eq!(builder.position(), 4);
        assert_eq!(builder.finish(), "ae");
    }

    #[test]
    fn test_unicode_characters() {
        let original = chars("こんにちは");
        let mut builder = StringBuilder::new(&original);

        builder.retain(3);
        builder.insert(&chars("世界, "));

        assert_eq!(builder.finish(), "こんに世界, ちは");
    }
}

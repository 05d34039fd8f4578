use crate::comparison::trim::{is_alpha, is_continuous_script};

/// A token of the word level comparison. Punctuation and whitespace other
/// than newlines are not tokens, they are the gaps between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineChunk {
    /// `[start, end)` of a run of word characters, or a single character of
    /// a script that does not separate words with whitespace
    Word { start: usize, end: usize },

    /// The offset of a `\n`
    Newline { offset: usize },
}

impl InlineChunk {
    #[must_use]
    pub fn start(&self) -> usize {
        match self {
            InlineChunk::Word { start, .. } => *start,
            InlineChunk::Newline { offset } => *offset,
        }
    }

    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            InlineChunk::Word { end, .. } => *end,
            InlineChunk::Newline { offset } => offset + 1,
        }
    }

    #[must_use]
    pub fn is_newline(&self) -> bool { matches!(self, InlineChunk::Newline { .. }) }

    /// What the chunk is compared by: the text of a word, `None` for a
    /// newline.
    #[must_use]
    pub fn key<'a>(&self, text: &'a [char]) -> Option<&'a [char]> {
        match self {
            InlineChunk::Word { start, end } => Some(&text[*start..*end]),
            InlineChunk::Newline { .. } => None,
        }
    }
}

#[must_use]
pub fn get_inline_chunks(text: &[char]) -> Vec<InlineChunk> {
    let mut chunks = Vec::new();
    let mut word_start = None;

    for (offset, c) in text.iter().copied().enumerate() {
        let is_alpha = is_alpha(c);
        if is_alpha && !is_continuous_script(c) {
            word_start.get_or_insert(offset);
            continue;
        }

        if let Some(start) = word_start.take() {
            chunks.push(InlineChunk::Word { start, end: offset });
        }

        if is_alpha {
            chunks.push(InlineChunk::Word {
                start: offset,
                end: offset + 1,
            });
        } else if c == '\n' {
            chunks.push(InlineChunk::Newline { offset });
        }
    }

    if let Some(start) = word_start {
        chunks.push(InlineChunk::Word {
            start,
            end: text.len(),
        });
    }

    chunks
}

/// The comparison keys of `chunks` of `text`.
#[must_use]
pub fn chunk_keys<'a>(text: &'a [char], chunks: &[InlineChunk]) -> Vec<Option<&'a [char]>> {
    chunks.iter().map(|chunk| chunk.key(text)).collect()
}

#[must_use]
pub fn count_newlines(chunks: &[InlineChunk]) -> usize {
    chunks.iter().filter(|chunk| chunk.is_newline()).count()
}

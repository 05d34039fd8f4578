//! Helpers that grow or shrink a window `[start1, end1) x [start2, end2)` by
//! runs of equal elements or by whitespace. None of them reads outside the
//! given window.

use crate::diff_iterable::Range;

#[must_use]
pub fn is_whitespace(c: char) -> bool { matches!(c, ' ' | '\t' | '\n' | '\r') }

/// ASCII punctuation, except for `_` which is part of identifiers.
#[must_use]
pub fn is_punctuation(c: char) -> bool { c != '_' && c.is_ascii_punctuation() }

#[must_use]
pub fn is_alpha(c: char) -> bool { !is_whitespace(c) && !is_punctuation(c) }

/// Scripts written without spaces between words (Han, Kana, Thai,
/// Javanese). Every character of them is a word of its own.
#[must_use]
pub fn is_continuous_script(c: char) -> bool {
    if c.is_ascii() || c.is_numeric() {
        return false;
    }

    matches!(
        u32::from(c),
        0x0E00..=0x0E7F // Thai
            | 0x2E80..=0x2FDF // CJK radicals
            | 0x3005 | 0x3007
            | 0x3021..=0x3029
            | 0x3038..=0x303B
            | 0x3040..=0x309F // Hiragana
            | 0x30A0..=0x30FF // Katakana
            | 0x31F0..=0x31FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA980..=0xA9DF // Javanese
            | 0xF900..=0xFAFF
            | 0xFF66..=0xFF9D
            | 0x20000..=0x3134F
    )
}

#[must_use]
pub fn trim_start(text: &[char], mut start: usize, end: usize) -> usize {
    while start < end && is_whitespace(text[start]) {
        start += 1;
    }
    start
}

#[must_use]
pub fn trim_end(text: &[char], start: usize, mut end: usize) -> usize {
    while start < end && is_whitespace(text[end - 1]) {
        end -= 1;
    }
    end
}

/// Strip leading and trailing whitespace of a single window.
#[must_use]
pub fn trim_range(text: &[char], start: usize, end: usize) -> (usize, usize) {
    let start = trim_start(text, start, end);
    (start, trim_end(text, start, end))
}

/// Strip leading and trailing whitespace of both sides independently.
#[must_use]
pub fn trim(text1: &[char], text2: &[char], range: Range) -> Range {
    let (start1, end1) = trim_range(text1, range.start1, range.end1);
    let (start2, end2) = trim_range(text2, range.start2, range.end2);
    Range::new(start1, end1, start2, end2)
}

/// Length of the common prefix of the two windows.
#[must_use]
pub fn expand_forward<T>(
    data1: &[T],
    data2: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize
where
    T: PartialEq,
{
    data1[start1..end1]
        .iter()
        .zip(&data2[start2..end2])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Length of the common suffix of the two windows.
#[must_use]
pub fn expand_backward<T>(
    data1: &[T],
    data2: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize
where
    T: PartialEq,
{
    data1[start1..end1]
        .iter()
        .rev()
        .zip(data2[start2..end2].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Length of the common whitespace-only prefix of the two windows.
#[must_use]
pub fn expand_whitespaces_forward(
    text1: &[char],
    text2: &[char],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize {
    text1[start1..end1]
        .iter()
        .zip(&text2[start2..end2])
        .take_while(|(a, b)| a == b && is_whitespace(**a))
        .count()
}

/// Length of the common whitespace-only suffix of the two windows.
#[must_use]
pub fn expand_whitespaces_backward(
    text1: &[char],
    text2: &[char],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> usize {
    text1[start1..end1]
        .iter()
        .rev()
        .zip(text2[start2..end2].iter().rev())
        .take_while(|(a, b)| a == b && is_whitespace(**a))
        .count()
}

/// The window without its common prefix and suffix.
#[must_use]
pub fn expand<T>(
    data1: &[T],
    data2: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> Range
where
    T: PartialEq,
{
    let start_count = expand_forward(data1, data2, start1, start2, end1, end2);
    let (start1, start2) = (start1 + start_count, start2 + start_count);

    let end_count = expand_backward(data1, data2, start1, start2, end1, end2);
    Range::new(start1, end1 - end_count, start2, end2 - end_count)
}

/// The window without its common whitespace-only prefix and suffix.
#[must_use]
pub fn expand_whitespaces(text1: &[char], text2: &[char], range: Range) -> Range {
    let start_count = expand_whitespaces_forward(
        text1,
        text2,
        range.start1,
        range.start2,
        range.end1,
        range.end2,
    );
    let (start1, start2) = (range.start1 + start_count, range.start2 + start_count);

    let end_count =
        expand_whitespaces_backward(text1, text2, start1, start2, range.end1, range.end2);
    Range::new(start1, range.end1 - end_count, start2, range.end2 - end_count)
}

/// Consume the prefix of both windows that is equal when whitespace is
/// skipped independently on each side. Returns the consumed part.
#[must_use]
pub fn expand_forward_iw(
    text1: &[char],
    text2: &[char],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> Range {
    let (mut index1, mut index2) = (start1, start2);

    while index1 < end1 && index2 < end2 {
        let (c1, c2) = (text1[index1], text2[index2]);
        if c1 == c2 {
            index1 += 1;
            index2 += 1;
            continue;
        }

        let mut skipped = false;
        if is_whitespace(c1) {
            skipped = true;
            index1 += 1;
        }
        if is_whitespace(c2) {
            skipped = true;
            index2 += 1;
        }
        if !skipped {
            break;
        }
    }

    Range::new(
        start1,
        trim_start(text1, index1, end1),
        start2,
        trim_start(text2, index2, end2),
    )
}

/// Mirror of [`expand_forward_iw`] consuming the suffix of both windows.
#[must_use]
pub fn expand_backward_iw(
    text1: &[char],
    text2: &[char],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> Range {
    let (mut index1, mut index2) = (end1, end2);

    while start1 < index1 && start2 < index2 {
        let (c1, c2) = (text1[index1 - 1], text2[index2 - 1]);
        if c1 == c2 {
            index1 -= 1;
            index2 -= 1;
            continue;
        }

        let mut skipped = false;
        if is_whitespace(c1) {
            skipped = true;
            index1 -= 1;
        }
        if is_whitespace(c2) {
            skipped = true;
            index2 -= 1;
        }
        if !skipped {
            break;
        }
    }

    Range::new(
        trim_end(text1, start1, index1),
        end1,
        trim_end(text2, start2, index2),
        end2,
    )
}

/// The part of the window that is left after consuming everything that is
/// equal modulo whitespace from both ends.
#[must_use]
pub fn expand_iw(text1: &[char], text2: &[char], range: Range) -> Range {
    let prefix = expand_forward_iw(
        text1,
        text2,
        range.start1,
        range.start2,
        range.end1,
        range.end2,
    );
    let suffix =
        expand_backward_iw(text1, text2, prefix.end1, prefix.end2, range.end1, range.end2);

    Range::new(prefix.end1, suffix.start1, prefix.end2, suffix.start2)
}

#[must_use]
pub fn is_equals_ignore_whitespaces(text1: &[char], text2: &[char], range: Range) -> bool {
    expand_iw(text1, text2, range).is_empty()
}

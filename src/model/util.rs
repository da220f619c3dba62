use std::ops::{Bound, RangeBounds};

pub fn from<R: RangeBounds<usize>>(range: &R) -> usize {
    match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(x) => *x,
        Bound::Excluded(x) => x + 1,
    }
}

pub fn to<R: RangeBounds<usize>>(range: &R, max: usize) -> usize {
    match range.end_bound() {
        Bound::Unbounded => max,
        Bound::Included(x) => x + 1,
        Bound::Excluded(x) => *x,
    }
}

/// Split `text` after `index` utf-16 code units. An index inside a surrogate pair is
/// rounded down to the start of that character.
pub fn split_at_utf16(text: &str, index: usize) -> (&str, &str) {
    let mut units = 0;
    for (offset, c) in text.char_indices() {
        units += c.len_utf16();
        if units > index {
            return text.split_at(offset);
        }
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use super::split_at_utf16;

    #[test]
    fn test_split_at_utf16() {
        assert_eq!(split_at_utf16("abc", 0), ("", "abc"));
        assert_eq!(split_at_utf16("abc", 2), ("ab", "c"));
        assert_eq!(split_at_utf16("abc", 5), ("abc", ""));
        assert_eq!(split_at_utf16("a\u{1F60A}b", 3), ("a\u{1F60A}", "b"));
        assert_eq!(split_at_utf16("a\u{1F60A}b", 2), ("a", "\u{1F60A}b"));
    }
}

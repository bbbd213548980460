//! Absent-safe string transforms used when building header text.
//!
//! Every function here accepts possibly-missing input and returns an owned
//! string, empty when there is nothing to show. Callers never need their
//! own `None` checks before transforming a label or name.

use alloc::string::String;

/// Offset between the katakana and hiragana blocks.
const KANA_OFFSET: u32 = 0x60;

/// Folds katakana to hiragana.
///
/// Characters outside the foldable katakana range (U+30A1..=U+30F6),
/// including the prolonged sound mark, pass through unchanged.
///
/// ```rust
/// use rs_nextstop::text::katakana_to_hiragana;
///
/// assert_eq!(katakana_to_hiragana(Some("シンジュク")), "しんじゅく");
/// assert_eq!(katakana_to_hiragana(Some("トーキョー")), "とーきょー");
/// assert_eq!(katakana_to_hiragana(None), "");
/// ```
pub fn katakana_to_hiragana(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };
    input
        .chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Lower-cases the first letter of every segment after the first.
///
/// Segments are separated by line breaks or spaces and are re-joined with
/// single spaces, so `"Next\nLast Stop"` and `"Next Last Stop"` both become
/// `"Next last stop"`. Missing input yields an empty string.
///
/// ```rust
/// use rs_nextstop::text::small_capitalize_tail;
///
/// assert_eq!(small_capitalize_tail(Some("Next Last Stop")), "Next last stop");
/// assert_eq!(small_capitalize_tail(None), "");
/// ```
pub fn small_capitalize_tail(label: Option<&str>) -> String {
    let mut out = String::new();
    let Some(label) = label else {
        return out;
    };
    for (index, segment) in label.split_whitespace().enumerate() {
        if index == 0 {
            out.push_str(segment);
            continue;
        }
        out.push(' ');
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Replaces line breaks with single spaces.
pub fn single_line(label: Option<&str>) -> String {
    label.map(|l| l.replace('\n', " ")).unwrap_or_default()
}

/// Removes parenthesised qualifiers, e.g. `"Ekimae (North)"` -> `"Ekimae"`.
///
/// Both ASCII and full-width parentheses are recognised. Whitespace left
/// before a removed group is trimmed.
pub fn strip_parenthesized(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '(' | '（' => depth += 1,
            ')' | '）' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kana_folding_leaves_other_scripts() {
        assert_eq!(katakana_to_hiragana(Some("ヴァ渋谷abc")), "ゔぁ渋谷abc");
        assert_eq!(katakana_to_hiragana(Some("")), "");
    }

    #[test]
    fn small_capitalize_handles_line_breaks() {
        assert_eq!(small_capitalize_tail(Some("Next\nLast Stop")), "Next last stop");
        assert_eq!(small_capitalize_tail(Some("Next\nLast\nStop")), "Next last stop");
        assert_eq!(small_capitalize_tail(Some("Arriving at")), "Arriving at");
    }

    #[test]
    fn small_capitalize_tolerates_empty() {
        assert_eq!(small_capitalize_tail(Some("")), "");
        assert_eq!(small_capitalize_tail(Some("\n")), "");
    }

    #[test]
    fn single_line_flattens() {
        assert_eq!(single_line(Some("次は\n終点")), "次は 終点");
        assert_eq!(single_line(None), "");
    }

    #[test]
    fn strips_parentheses() {
        assert_eq!(strip_parenthesized("Ekimae (North Exit)"), "Ekimae");
        assert_eq!(strip_parenthesized("駅前（北口）"), "駅前");
        assert_eq!(strip_parenthesized("Plain"), "Plain");
    }
}

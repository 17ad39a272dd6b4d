//! Conversion between UTF-16 offsets (DOM selection API) and char offsets.

/// Convert a UTF-16 code unit offset into a char offset.
///
/// Offsets that land inside a surrogate pair snap forward to the end of that
/// character. Offsets past the end clamp to the text length.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

/// Convert a char offset into a UTF-16 code unit offset.
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        for i in 0..=5 {
            assert_eq!(utf16_to_char_offset("hello", i), i);
            assert_eq!(char_to_utf16_offset("hello", i), i);
        }
    }

    #[test]
    fn test_astral_characters() {
        // 🦀 is two UTF-16 units, one char.
        let text = "a🦀b";
        assert_eq!(char_to_utf16_offset(text, 1), 1);
        assert_eq!(char_to_utf16_offset(text, 2), 3);
        assert_eq!(char_to_utf16_offset(text, 3), 4);

        assert_eq!(utf16_to_char_offset(text, 3), 2);
        assert_eq!(utf16_to_char_offset(text, 4), 3);
    }

    #[test]
    fn test_offset_inside_surrogate_pair_snaps_forward() {
        assert_eq!(utf16_to_char_offset("a🦀b", 2), 2);
    }

    #[test]
    fn test_past_end_clamps() {
        assert_eq!(utf16_to_char_offset("ab", 10), 2);
        assert_eq!(char_to_utf16_offset("ab", 10), 2);
    }

    #[test]
    fn test_bmp_non_ascii_is_one_unit() {
        assert_eq!(char_to_utf16_offset("día", 3), 3);
        assert_eq!(utf16_to_char_offset("día", 2), 2);
    }
}

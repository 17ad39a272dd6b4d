//! The selection formatter.
//!
//! `apply_format` wraps the selected text of a field in a descriptor's
//! delimiters and returns the rewritten state. It is pure: one input state in,
//! one output state out, no access to any widget.
//!
//! Applying the same descriptor twice nests the delimiters. There is no toggle.

use crate::field::{TextField, TextFieldState, char_to_byte};
use crate::format::FormatDescriptor;

/// Wrap the selection of `state` with `fmt`.
///
/// Steps, in order:
/// 1. split the value at the (clamped) selection bounds
/// 2. move trailing spaces of the selection outside the closing delimiter
/// 3. for single-line markup, close and reopen the delimiters around each
///    line break inside the selection
/// 4. for exclusive-line markup, widen the selection to whole lines
/// 5. join `before + prefix + selected + suffix + trailing + after`
///
/// A caret-only selection leaves the caret between the delimiters. Otherwise
/// the caret lands right after the inserted block. The scroll offset is kept.
pub fn apply_format(state: &TextFieldState, fmt: &FormatDescriptor) -> TextFieldState {
    let text = state.value.as_str();
    let (start, end) = state.clamped_selection();
    let caret_only = start == end;

    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end);

    let mut before = &text[..start_byte];
    let selected = &text[start_byte..end_byte];
    let mut after = &text[end_byte..];

    let body = selected.trim_end_matches(' ');
    let trailing_space = &selected[body.len()..];

    let mut wrapped = if fmt.multiline {
        body.to_string()
    } else {
        split_at_line_breaks(body, &fmt.prefix, &fmt.suffix)
    };

    if fmt.exclusive_line {
        // Line breaks are single bytes, so these indices are char boundaries.
        let line_start = before.rfind(is_line_break).map_or(0, |i| i + 1);
        let line_end = after.find(is_line_break).unwrap_or(after.len());

        wrapped.insert_str(0, &before[line_start..]);
        wrapped.push_str(&after[..line_end]);
        before = &before[..line_start];
        after = &after[line_end..];
    }

    let mut value = String::with_capacity(
        before.len()
            + fmt.prefix.len()
            + wrapped.len()
            + fmt.suffix.len()
            + trailing_space.len()
            + after.len(),
    );
    value.push_str(before);
    value.push_str(&fmt.prefix);
    value.push_str(&wrapped);
    value.push_str(&fmt.suffix);
    value.push_str(trailing_space);
    value.push_str(after);

    let total = value.chars().count();
    let after_len = after.chars().count();
    let caret = if caret_only {
        total - after_len - fmt.suffix.chars().count()
    } else {
        total - after_len
    };

    TextFieldState {
        value,
        selection_start: caret,
        selection_end: caret,
        scroll_offset: state.scroll_offset,
    }
}

/// Read `field`, format it, write it back.
///
/// An absent field is a silent no-op. Returns whether anything was written.
pub fn wrap_field<F>(field: Option<&mut F>, fmt: &FormatDescriptor) -> bool
where
    F: TextField + ?Sized,
{
    let Some(field) = field else {
        return false;
    };

    let current = field.state();
    let next = apply_format(&current, fmt);
    tracing::trace!(
        prefix = %fmt.prefix,
        start = current.selection_start,
        end = current.selection_end,
        caret = next.selection_start,
        "wrapped selection"
    );
    field.set_state(&next);
    true
}

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Replace every line break in `text` with `suffix + break + prefix`.
///
/// `\r\n` counts as one break, so a CRLF pair gets one closing and one
/// reopening delimiter, never an empty `suffix + prefix` run between the `\r`
/// and the `\n`. This deliberately departs from splitting on `\r` and `\n`
/// separately. Browser textareas normalize to `\n`, so the difference only
/// shows for text handed to `apply_format` directly.
fn split_at_line_breaks(text: &str, prefix: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str(suffix);
                out.push_str("\r\n");
                out.push_str(prefix);
            }
            '\r' | '\n' => {
                out.push_str(suffix);
                out.push(c);
                out.push_str(prefix);
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MemoryField;
    use crate::format::FormatTable;

    fn fmt(prefix: &str, suffix: &str) -> FormatDescriptor {
        FormatDescriptor::new(prefix, suffix)
    }

    fn format(value: &str, start: usize, end: usize, fmt: &FormatDescriptor) -> TextFieldState {
        apply_format(&TextFieldState::new(value).with_selection(start, end), fmt)
    }

    #[test]
    fn test_caret_lands_inside_empty_delimiters() {
        let out = format("hello", 5, 5, &fmt("'''", "'''"));
        assert_eq!(out.value, "hello''''''");
        assert_eq!(out.selection_start, 8);
        assert_eq!(out.selection_end, 8);
    }

    #[test]
    fn test_caret_in_middle_of_text() {
        let out = format("ab", 1, 1, &fmt("~~", "~~"));
        assert_eq!(out.value, "a~~~~b");
        assert_eq!(out.selection_start, 3);
    }

    #[test]
    fn test_selection_wrapped_and_caret_after_block() {
        let out = format("say hello now", 4, 9, &fmt("''", "''"));
        assert_eq!(out.value, "say ''hello'' now");
        assert_eq!(out.selection_start, 13);
        assert_eq!(out.selection_end, 13);
    }

    #[test]
    fn test_single_line_markup_split_at_line_break() {
        let out = format("ab\ncd", 0, 5, &fmt("''", "''"));
        assert_eq!(out.value, "''ab''\n''cd''");
        assert_eq!(out.selection_start, out.value.chars().count());
    }

    #[test]
    fn test_split_keeps_crlf_together() {
        let out = format("ab\r\ncd\ref", 0, 9, &fmt("*", "*"));
        assert_eq!(out.value, "*ab*\r\n*cd*\r*ef*");
    }

    #[test]
    fn test_multiline_markup_wraps_once() {
        let out = format("ab\ncd", 0, 5, &fmt("[code]", "[/code]").multiline());
        assert_eq!(out.value, "[code]ab\ncd[/code]");
    }

    #[test]
    fn test_exclusive_line_widens_to_whole_line() {
        let out = format("xx yy\nzz", 3, 5, &fmt("==", "==").exclusive_line());
        assert_eq!(out.value, "==xx yy==\nzz");
        assert_eq!(out.selection_start, 9);
    }

    #[test]
    fn test_exclusive_line_on_last_line() {
        let out = format("aa\nbb cc", 6, 8, &fmt("==", "==").exclusive_line());
        assert_eq!(out.value, "aa\n==bb cc==");
    }

    #[test]
    fn test_exclusive_line_stops_at_carriage_return() {
        let out = format("aa\rbb\rcc", 4, 4, &fmt("==", "==").exclusive_line());
        assert_eq!(out.value, "aa\r==bb==\rcc");
    }

    #[test]
    fn test_exclusive_line_caret_at_text_edges() {
        let start = format("line", 0, 0, &fmt("==", "==").exclusive_line());
        assert_eq!(start.value, "==line==");
        assert_eq!(start.selection_start, 6);

        let end = format("line", 4, 4, &fmt("==", "==").exclusive_line());
        assert_eq!(end.value, "==line==");
        assert_eq!(end.selection_start, 6);
    }

    #[test]
    fn test_exclusive_line_on_empty_text() {
        let out = format("", 0, 0, &fmt("==", "==").exclusive_line());
        assert_eq!(out.value, "====");
        assert_eq!(out.selection_start, 2);
    }

    #[test]
    fn test_trailing_spaces_moved_outside_suffix() {
        let out = format("foo  ", 0, 5, &fmt("**", "**"));
        assert_eq!(out.value, "**foo**  ");
        assert_eq!(out.selection_start, 9);
    }

    #[test]
    fn test_only_spaces_are_trailing() {
        let out = format("a\t \tb", 1, 4, &fmt("*", "*"));
        assert_eq!(out.value, "a*\t \t*b");
    }

    #[test]
    fn test_all_space_selection_wraps_empty_string() {
        let out = format("x   y", 1, 4, &fmt("**", "**"));
        assert_eq!(out.value, "x****   y");
        assert_eq!(out.selection_start, 8);
    }

    #[test]
    fn test_repeated_application_nests() {
        let bold = fmt("'''", "'''");
        let once = format("word", 0, 4, &bold);
        let twice = apply_format(&once.clone().with_selection(0, once.len_chars()), &bold);
        assert_eq!(twice.value, "''''''word''''''");
    }

    #[test]
    fn test_scroll_offset_preserved() {
        let table = FormatTable::default();
        let state = TextFieldState::new("one\ntwo three")
            .with_selection(2, 9)
            .with_scroll_offset(42);
        for entry in &table {
            let out = apply_format(&state, &entry.options);
            assert_eq!(out.scroll_offset, 42, "format {}", entry.name);
        }
    }

    #[test]
    fn test_length_law_without_line_breaks() {
        let table = FormatTable::default();
        let state = TextFieldState::new("first line\nsecond line ");
        let selections = [(0, 0), (0, 5), (3, 10), (12, 23), (11, 23), (23, 23)];
        for entry in &table {
            for &(start, end) in &selections {
                let state = state.clone().with_selection(start, end);
                let out = apply_format(&state, &entry.options);
                let expected = state.len_chars()
                    + entry.options.prefix.chars().count()
                    + entry.options.suffix.chars().count();
                assert_eq!(out.len_chars(), expected, "{} {start}..{end}", entry.name);
            }
        }
    }

    #[test]
    fn test_each_line_break_adds_a_delimiter_pair() {
        let out = format("a\nb\nc", 0, 5, &fmt("~~", "~~"));
        assert_eq!(out.len_chars(), 5 + 3 * 4);
    }

    #[test]
    fn test_selection_bounds_stay_in_range() {
        let table = FormatTable::default();
        let samples = [
            ("", 0, 0),
            ("abc", 0, 3),
            ("abc", 3, 0),
            ("abc", 10, 20),
            ("a b\r\nc ", 1, 6),
            ("  ", 0, 2),
        ];
        for entry in &table {
            for &(value, start, end) in &samples {
                let out = format(value, start, end, &entry.options);
                assert!(out.selection_start <= out.selection_end);
                assert!(out.selection_end <= out.len_chars());
            }
        }
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let out = format("abc", 1, 99, &fmt("*", "*"));
        assert_eq!(out.value, "a*bc*");
        assert_eq!(out.selection_start, 5);
    }

    #[test]
    fn test_reversed_selection_is_ordered() {
        let out = format("abcd", 3, 1, &fmt("*", "*"));
        assert_eq!(out.value, "a*bc*d");
    }

    #[test]
    fn test_offsets_count_chars() {
        let out = format("día café", 4, 8, &fmt("''", "''"));
        assert_eq!(out.value, "día ''café''");
        assert_eq!(out.selection_start, 12);
    }

    #[test]
    fn test_wrap_field_writes_back() {
        let mut field = MemoryField::new(TextFieldState::new("hello").with_selection(0, 5));
        assert!(wrap_field(Some(&mut field), &fmt("__", "__")));
        assert_eq!(field.value(), "__hello__");
    }

    #[test]
    fn test_wrap_field_absent_is_noop() {
        assert!(!wrap_field::<MemoryField>(None, &fmt("__", "__")));
    }

    #[test]
    fn test_wrap_field_through_trait_object() {
        let mut field = MemoryField::new(TextFieldState::new("x").with_caret(1));
        let dyn_field: &mut dyn TextField = &mut field;
        assert!(wrap_field(Some(dyn_field), &fmt("[spoiler]", "[/spoiler]")));
        let state = field.into_state();
        assert_eq!(state.value, "x[spoiler][/spoiler]");
        assert_eq!(state.selection_start, 10);
    }
}

use crate::app::domain::document::{PAGE_BREAK_MARKER, PAGE_BREAK_TOKEN};

/// Replace the selection `caret_start..caret_end` with the page-break token.
///
/// Returns the new text and the caret position just past the inserted token.
/// Offsets are byte positions; they are clamped to the text, reordered if
/// reversed, and moved back onto a char boundary.
///
/// An edge that falls strictly inside an existing marker is moved to the end
/// of that marker so the marker stays intact. In that case the token goes in
/// after the marker and the returned caret is `marker_end + token.len()`, not
/// `caret_start + token.len()`.
pub fn insert_directive(text: &str, caret_start: usize, caret_end: usize) -> (String, usize) {
    let (start, end) = if caret_start <= caret_end {
        (caret_start, caret_end)
    } else {
        (caret_end, caret_start)
    };

    let start = snap_out_of_marker(text, floor_char_boundary(text, start));
    let end = snap_out_of_marker(text, floor_char_boundary(text, end)).max(start);

    let mut result = String::with_capacity(text.len() - (end - start) + PAGE_BREAK_TOKEN.len());
    result.push_str(&text[..start]);
    result.push_str(PAGE_BREAK_TOKEN);
    result.push_str(&text[end..]);

    (result, start + PAGE_BREAK_TOKEN.len())
}

/// Number of page-break markers in the text.
pub fn count_directives(text: &str) -> usize {
    text.matches(PAGE_BREAK_MARKER).count()
}

/// Clamp to the text length and step back to the nearest char boundary.
fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn snap_out_of_marker(text: &str, pos: usize) -> usize {
    text.match_indices(PAGE_BREAK_MARKER)
        .map(|(start, marker)| (start, start + marker.len()))
        .find(|&(start, end)| start < pos && pos < end)
        .map_or(pos, |(_, end)| end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::DEFAULT_MARKDOWN;

    #[test]
    fn test_insert_at_start_of_default() {
        let (text, caret) = insert_directive(DEFAULT_MARKDOWN, 0, 0);
        assert!(text.starts_with(PAGE_BREAK_TOKEN));
        assert_eq!(&text[PAGE_BREAK_TOKEN.len()..], DEFAULT_MARKDOWN);
        assert_eq!(caret, PAGE_BREAK_TOKEN.len());
    }

    #[test]
    fn test_insert_adds_exactly_one_marker() {
        let samples = ["", "plain", "one\ntwo\nthree", DEFAULT_MARKDOWN];
        for sample in samples {
            for offset in [0, sample.len() / 2, sample.len()] {
                let before = count_directives(sample);
                let (text, caret) = insert_directive(sample, offset, offset);
                assert_eq!(count_directives(&text), before + 1);
                assert_eq!(caret, offset + PAGE_BREAK_TOKEN.len());
                assert_eq!(&text[offset..caret], PAGE_BREAK_TOKEN);
            }
        }
    }

    #[test]
    fn test_insert_replaces_selection() {
        let (text, caret) = insert_directive("keep DROP keep", 5, 9);
        assert_eq!(text, format!("keep {PAGE_BREAK_TOKEN} keep"));
        assert!(!text.contains("DROP"));
        assert_eq!(caret, 5 + PAGE_BREAK_TOKEN.len());
    }

    #[test]
    fn test_reversed_selection_is_normalized() {
        assert_eq!(insert_directive("abcdef", 4, 2), insert_directive("abcdef", 2, 4));
    }

    #[test]
    fn test_offsets_are_clamped() {
        let (text, caret) = insert_directive("abc", 10, 99);
        assert_eq!(text, format!("abc{PAGE_BREAK_TOKEN}"));
        assert_eq!(caret, text.len());
    }

    #[test]
    fn test_offset_inside_multibyte_char() {
        // 'é' is two bytes: offset 2 lands in the middle of it.
        let (text, caret) = insert_directive("aé", 2, 2);
        assert_eq!(text, format!("a{PAGE_BREAK_TOKEN}é"));
        assert_eq!(caret, 1 + PAGE_BREAK_TOKEN.len());
    }

    #[test]
    fn test_caret_inside_marker_keeps_marker_intact() {
        let (existing, _) = insert_directive("ab", 1, 1);
        let marker_start = existing.find(PAGE_BREAK_MARKER).unwrap();
        let inside = marker_start + 4;

        let (text, _) = insert_directive(&existing, inside, inside);
        assert_eq!(count_directives(&text), 2);
    }

    #[test]
    fn test_caret_inside_marker_lands_after_marker() {
        let (existing, _) = insert_directive("ab", 1, 1);
        let marker_start = existing.find(PAGE_BREAK_MARKER).unwrap();
        let marker_end = marker_start + PAGE_BREAK_MARKER.len();
        let inside = marker_start + 5;

        let (text, caret) = insert_directive(&existing, inside, inside);
        assert_eq!(caret, marker_end + PAGE_BREAK_TOKEN.len());
        assert_ne!(caret, inside + PAGE_BREAK_TOKEN.len());
        assert_eq!(&text[marker_end..caret], PAGE_BREAK_TOKEN);
        assert_eq!(&text[marker_start..marker_end], PAGE_BREAK_MARKER);
    }
}

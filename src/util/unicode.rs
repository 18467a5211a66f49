use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max_cells`, ending in `…` when anything was dropped
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Grapheme boundary after `byte_offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Grapheme boundary before `byte_offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(byte_offset - g.len())
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Start of the word left of `byte_offset` (whitespace-delimited)
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let head = &s[..byte_offset.min(s.len())];
    let mut pos = head.len();
    let mut graphemes = head.grapheme_indices(true).rev().peekable();
    while let Some((i, _)) = graphemes.next_if(|(_, g)| is_blank(g)) {
        pos = i;
    }
    while let Some((i, _)) = graphemes.next_if(|(_, g)| !is_blank(g)) {
        pos = i;
    }
    pos
}

/// Start of the next word right of `byte_offset` (or the end of `s`)
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let start = byte_offset.min(s.len());
    let mut graphemes = s[start..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_blank(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_blank(g)).is_some() {}
    graphemes.peek().map_or(s.len(), |(i, _)| start + i)
}

/// Byte range of `s` to show in a field `width` cells wide so the caret at
/// `caret` stays visible. Text scrolls only once the caret passes the right
/// edge; one cell is kept free for the caret itself.
pub fn caret_window(s: &str, caret: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (caret, caret);
    }
    let caret = caret.min(s.len());
    let mut start = 0;
    let mut before = display_width(&s[..caret]);
    let mut iter = s.grapheme_indices(true);
    while before + 1 > width {
        let Some((i, g)) = iter.next() else {
            break;
        };
        before -= display_width(g);
        start = i + g.len();
    }

    let mut end = start;
    let mut used = 0;
    for (i, g) in s[start..].grapheme_indices(true) {
        let w = display_width(g);
        if used + w > width {
            break;
        }
        used += w;
        end = start + i + g.len();
    }
    (start, end.max(caret))
}

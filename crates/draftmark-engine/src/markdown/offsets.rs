//! Conversions between char offsets (the model's unit) and byte offsets
//! (what string slicing needs).

/// Byte index of the `offset`-th char, or the text length past the end.
pub fn char_to_byte(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Number of chars starting before `byte`.
pub fn byte_to_char(text: &str, byte: usize) -> usize {
    text.char_indices().take_while(|(i, _)| *i < byte).count()
}

/// Shifts a position after the bytes `[start, end)` are removed.
///
/// Positions inside the removed span collapse onto its start.
pub fn shift_after_removal(pos: usize, start: usize, end: usize) -> usize {
    if pos >= end {
        pos - (end - start)
    } else if pos > start {
        start
    } else {
        pos
    }
}

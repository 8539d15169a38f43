//! Fixed-offset field extraction for message file lines.
//!
//! Every field of the message file layout lives at a documented character
//! range. Offsets count characters, not bytes, and ranges running past the
//! end of the line are clamped, so a short line yields an empty field.

/// Return the characters `start..end` of `line`, clamped to the line length.
pub fn slice(line: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut offsets = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()));
    let Some(from) = offsets.nth(start) else {
        return "";
    };
    let to = offsets.nth(end - start - 1).unwrap_or(line.len());
    &line[from..to]
}

/// Trimmed text at `start..end`.
pub fn text(line: &str, start: usize, end: usize) -> String {
    slice(line, start, end).trim().to_string()
}

/// Timing category name at `start..end`: trimmed, trailing dot leaders removed.
pub fn name(line: &str, start: usize, end: usize) -> String {
    slice(line, start, end)
        .trim()
        .trim_end_matches('.')
        .trim_end()
        .to_string()
}

/// Integer at `start..end`, or `None` if the field is empty or malformed.
pub fn int(line: &str, start: usize, end: usize) -> Option<i64> {
    slice(line, start, end).trim().parse().ok()
}

/// Float at `start..end`, or `None` if the field is empty or malformed.
pub fn float(line: &str, start: usize, end: usize) -> Option<f64> {
    slice(line, start, end).trim().parse().ok()
}

/// Float at `start..end`; malformed and non-finite values become `0.0`.
pub fn float_or_zero(line: &str, start: usize, end: usize) -> f64 {
    float(line, start, end)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

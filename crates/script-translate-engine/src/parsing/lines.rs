/// Separator written between recomposed lines.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Splits a script block into lines.
///
/// `\n` is the hard boundary and a `\r` directly before it is dropped, so
/// `\r\n` and `\n` both separate lines. The segment after a terminal
/// separator is kept: `"a\r\n"` yields `["a", ""]` and `""` yields `[""]`.
/// A bare `\r` stays part of the line, including at the very end.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut segments = text.split('\n').peekable();
    std::iter::from_fn(move || {
        let segment = segments.next()?;
        // Only segments terminated by `\n` can end in a separator `\r`.
        if segments.peek().is_some() {
            Some(segment.strip_suffix('\r').unwrap_or(segment))
        } else {
            Some(segment)
        }
    })
}

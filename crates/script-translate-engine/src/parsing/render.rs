use super::lines::LINE_SEPARATOR;
use super::tag::Tag;
use super::types::LineRecord;

/// Rebuilds a script block from its records.
///
/// `replacements[i]` stands in for the content of record `i`. Records past
/// the end of `replacements` keep their own content and surplus replacements
/// are ignored. `None` reproduces every record's content unchanged.
///
/// Indentation and tag wrappers always come from the records; only the
/// content portion of each line is substituted. Lines are joined with
/// `\r\n`.
pub fn recompose<S: AsRef<str>>(records: &[LineRecord], replacements: Option<&[S]>) -> String {
    if let Some(replacements) = replacements
        && replacements.len() != records.len()
    {
        log::warn!(
            "recomposing {} records with {} replacements",
            records.len(),
            replacements.len()
        );
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push_str(LINE_SEPARATOR);
        }
        let content = replacements
            .and_then(|r| r.get(i))
            .map_or(record.content(), |s| s.as_ref());
        render_line(&mut out, record, content);
    }
    out
}

fn render_line(out: &mut String, record: &LineRecord, content: &str) {
    out.extend(std::iter::repeat_n(' ', record.indent()));
    match record {
        LineRecord::OpenTag(tag) | LineRecord::EndTag(tag) => {
            Tag::write_wrapper(out, &tag.name);
        }
        LineRecord::Text(_) => {}
    }
    out.push_str(content);
}

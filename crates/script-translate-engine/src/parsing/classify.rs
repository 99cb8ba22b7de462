use super::tag::Tag;
use super::types::{LineRecord, TagLine, TextLine};

/// Classifies individual script lines.
///
/// Each line is classified independently without reference to surrounding
/// lines, so indentation is recorded but nesting is never validated.
pub struct ScriptLineClassifier;

impl ScriptLineClassifier {
    /// Classifies a line into a [`LineRecord`].
    ///
    /// The end-tag pattern is tried before the open-tag pattern. Both must
    /// stay in that order: `<end Title>` also satisfies the open-tag pattern
    /// because tag names may contain spaces. Anything matching neither is
    /// [`LineRecord::Text`], including malformed tag-like lines.
    pub fn classify(&self, line: &str) -> LineRecord {
        if let Some(m) = Tag::match_end(line) {
            return LineRecord::EndTag(TagLine {
                indent: m.indent,
                name: Tag::end_name(m.name),
                content: m.rest.trim().to_string(),
                raw: line.to_string(),
            });
        }

        if let Some(m) = Tag::match_open(line) {
            return LineRecord::OpenTag(TagLine {
                indent: m.indent,
                name: m.name.trim().to_string(),
                content: m.rest.trim().to_string(),
                raw: line.to_string(),
            });
        }

        LineRecord::Text(TextLine {
            indent: leading_spaces(line),
            content: line.trim().to_string(),
            raw: line.to_string(),
        })
    }
}

/// Shorthand for [`ScriptLineClassifier::classify`].
pub fn classify_line(line: &str) -> LineRecord {
    ScriptLineClassifier.classify(line)
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

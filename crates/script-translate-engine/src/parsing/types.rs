use serde::Serialize;

/// A line carrying a tag wrapper: `<Name>content` or `<end Name>content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLine {
    /// Leading space count of the source line.
    pub indent: usize,
    /// Tag name as re-emitted between the angle brackets.
    ///
    /// End tags keep their marker word, so this is `"end Title"` for
    /// `<end Title>`.
    pub name: String,
    /// Trimmed text after the closing `>`.
    pub content: String,
    /// The untouched source line. Diagnostics only.
    pub raw: String,
}

/// A plain text or blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextLine {
    /// Leading space count of the source line. Tabs do not count.
    pub indent: usize,
    /// The trimmed line.
    pub content: String,
    /// The untouched source line. Diagnostics only.
    pub raw: String,
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineRecord {
    OpenTag(TagLine),
    EndTag(TagLine),
    Text(TextLine),
}

/// Discriminator of a [`LineRecord`], handy for tables and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    OpenTag,
    EndTag,
    Text,
}

impl LineRecord {
    pub fn kind(&self) -> LineKind {
        match self {
            LineRecord::OpenTag(_) => LineKind::OpenTag,
            LineRecord::EndTag(_) => LineKind::EndTag,
            LineRecord::Text(_) => LineKind::Text,
        }
    }

    /// Tag name for tag lines, `None` for text.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            LineRecord::OpenTag(tag) | LineRecord::EndTag(tag) => Some(&tag.name),
            LineRecord::Text(_) => None,
        }
    }

    /// The translatable payload of the line.
    pub fn content(&self) -> &str {
        match self {
            LineRecord::OpenTag(tag) | LineRecord::EndTag(tag) => &tag.content,
            LineRecord::Text(text) => &text.content,
        }
    }

    pub fn indent(&self) -> usize {
        match self {
            LineRecord::OpenTag(tag) | LineRecord::EndTag(tag) => tag.indent,
            LineRecord::Text(text) => text.indent,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            LineRecord::OpenTag(tag) | LineRecord::EndTag(tag) => &tag.raw,
            LineRecord::Text(text) => &text.raw,
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LineKind::OpenTag => "open",
            LineKind::EndTag => "end",
            LineKind::Text => "text",
        };
        f.write_str(label)
    }
}

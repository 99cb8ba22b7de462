use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Tag line syntax with owned delimiter constants.
///
/// All knowledge of the `<Name>` / `<end Name>` wrapper lives here: the
/// classifier asks it to match, the recomposer asks it to emit.
pub struct Tag;

/// Pieces of a matched tag line, borrowed from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub indent: usize,
    pub name: &'a str,
    pub rest: &'a str,
}

impl Tag {
    pub const OPEN: char = '<';
    pub const CLOSE: char = '>';
    /// Marker word that turns a tag into an end tag.
    pub const END_MARKER: &'static str = "end ";

    /// Matches `<end Name>rest` after leading spaces.
    ///
    /// The returned name is the captured name only, without the marker.
    pub fn match_end(line: &str) -> Option<TagMatch<'_>> {
        static END_TAG: OnceLock<Regex> = OnceLock::new();
        let re = END_TAG
            .get_or_init(|| Regex::new(r"^( *)<end ([\w ]+)>(.*)$").expect("Invalid end tag regex"));
        re.captures(line).map(Self::from_captures)
    }

    /// Matches `<Name>rest` after leading spaces.
    pub fn match_open(line: &str) -> Option<TagMatch<'_>> {
        static OPEN_TAG: OnceLock<Regex> = OnceLock::new();
        let re = OPEN_TAG
            .get_or_init(|| Regex::new(r"^( *)<([\w ]+)>(.*)$").expect("Invalid open tag regex"));
        re.captures(line).map(Self::from_captures)
    }

    /// Name stored for an end tag, marker word included.
    pub fn end_name(name: &str) -> String {
        format!("{}{}", Self::END_MARKER, name.trim())
    }

    /// Appends `<name>` to `out`.
    pub fn write_wrapper(out: &mut String, name: &str) {
        out.push(Self::OPEN);
        out.push_str(name);
        out.push(Self::CLOSE);
    }

    fn from_captures(caps: Captures<'_>) -> TagMatch<'_> {
        // All three groups are non-optional in both patterns.
        let group = |i| caps.get(i).map_or("", |m| m.as_str());
        TagMatch {
            indent: group(1).len(),
            name: group(2),
            rest: group(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_match_splits_line() {
        let m = Tag::match_open("  <Title>Hello").unwrap();
        assert_eq!(m.indent, 2);
        assert_eq!(m.name, "Title");
        assert_eq!(m.rest, "Hello");
    }

    #[test]
    fn end_match_excludes_marker() {
        let m = Tag::match_end("<end Title> tail").unwrap();
        assert_eq!(m.indent, 0);
        assert_eq!(m.name, "Title");
        assert_eq!(m.rest, " tail");
    }

    #[test]
    fn open_pattern_also_accepts_end_lines() {
        // The open name class includes spaces, so ordering is on the caller.
        let m = Tag::match_open("<end Title>").unwrap();
        assert_eq!(m.name, "end Title");
    }

    #[test]
    fn end_requires_a_name() {
        assert_eq!(Tag::match_end("<end >"), None);
        assert!(Tag::match_open("<end >").is_some());
    }

    #[test]
    fn punctuation_in_name_rejects() {
        assert_eq!(Tag::match_open("<Ti@tle>foo"), None);
        assert_eq!(Tag::match_end("<end Ti-tle>"), None);
    }

    #[test]
    fn tabs_do_not_count_as_indent() {
        assert_eq!(Tag::match_open("\t<Title>"), None);
    }

    #[test]
    fn unicode_names_match() {
        let m = Tag::match_open("<Título>x").unwrap();
        assert_eq!(m.name, "Título");
    }

    #[test]
    fn wrapper_and_end_name() {
        let mut out = String::from("  ");
        Tag::write_wrapper(&mut out, &Tag::end_name(" Title "));
        assert_eq!(out, "  <end Title>");
    }
}

//! # Script Parsing
//!
//! Line-oriented decomposition of the pseudo-markup dialect found in
//! `m_Script` fields, and the inverse rendering used after translation.
//!
//! ## Dialect
//!
//! ```text
//! <Scene>
//!   <Line>Bonjour
//!   <end Line>
//! <end Scene>
//! ```
//!
//! Tags never span lines. Closing tags are written `<end Name>`. Nesting is
//! conveyed only by leading spaces and is never validated.
//!
//! ## Phases
//!
//! 1. **Split** (`lines`): the block is split on `\n` (optionally preceded by
//!    `\r`); a terminal separator yields a trailing empty line
//! 2. **Classify** (`classify`): each line becomes a `LineRecord`
//!    independently of its neighbours
//! 3. **Render** (`render`): records plus position-aligned replacement
//!    contents are rendered back, joined with `\r\n`
//!
//! ## Modules
//!
//! - **`types`**: `LineRecord` and its variant payloads
//! - **`tag`**: `Tag`, the single owner of wrapper syntax (patterns and emission)
//! - **`lines`**: `split_lines` and the output separator
//! - **`classify`**: `ScriptLineClassifier`
//! - **`render`**: `recompose`
//!
//! ## Key Invariants
//!
//! - `decompose(text).len()` equals the number of `\n`-separated segments
//! - `recompose(&decompose(text), None) == text` for canonical text (CRLF
//!   separators, trimmed content, unpadded tag names)
//! - Neither phase can fail: unmatched lines degrade to text

pub mod classify;
pub mod lines;
pub mod render;
pub mod tag;
pub mod types;

pub use classify::{ScriptLineClassifier, classify_line};
pub use lines::{LINE_SEPARATOR, split_lines};
pub use render::recompose;
pub use types::{LineKind, LineRecord, TagLine, TextLine};

#[cfg(test)]
mod tests;

/// Decomposes a script block into one record per line, in source order.
pub fn decompose(text: &str) -> Vec<LineRecord> {
    let classifier = ScriptLineClassifier;
    split_lines(text).map(|line| classifier.classify(line)).collect()
}

/// Contents of `records` in order, ready to hand to a translation step.
pub fn contents(records: &[LineRecord]) -> Vec<String> {
    records.iter().map(|r| r.content().to_string()).collect()
}

//! Extract and save operations over stored artifacts.
//!
//! Extraction turns an artifact's script into a flat list of translatable
//! lines; saving takes the (translated) list back and rebuilds the script.
//! In [`ScriptMode::Markup`] the lines are record contents and the tag
//! structure is restored on save; in [`ScriptMode::Plain`] they are the raw
//! `\r\n`-separated lines of the script.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::io::{ArtifactStore, StoreError};
use crate::parsing::{LINE_SEPARATOR, contents, decompose, recompose};

/// Scripts with more than this many `<`-led lines are treated as markup on save.
pub const DEFAULT_MARKUP_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    #[default]
    Plain,
    Markup,
}

/// Lines of one artifact as handed to the translation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedScript {
    pub filename: String,
    pub lines: Vec<String>,
}

/// Translated lines coming back for an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub filename: String,
    pub lines: Vec<String>,
    #[serde(default)]
    pub mode: ScriptMode,
}

/// Splits a script into translatable lines.
///
/// An empty script has no lines in either mode.
pub fn extract_lines(script: &str, mode: ScriptMode) -> Vec<String> {
    if script.is_empty() {
        return Vec::new();
    }
    match mode {
        ScriptMode::Markup => contents(&decompose(script)),
        ScriptMode::Plain => script.split(LINE_SEPARATOR).map(str::to_string).collect(),
    }
}

/// Heuristic used when saving without an explicit markup request.
///
/// Counts lines whose first non-whitespace character is `<`; `\r\n`, `\n`
/// and a bare `\r` all end a line here.
pub fn looks_like_markup(script: &str, threshold: usize) -> bool {
    let tagged = script
        .split(['\r', '\n'])
        .filter(|line| line.trim_start().starts_with('<'))
        .count();
    tagged > threshold
}

/// Markup requests always win; plain requests are upgraded when the script
/// looks like markup.
pub fn resolve_mode(requested: ScriptMode, script: &str, threshold: usize) -> ScriptMode {
    match requested {
        ScriptMode::Markup => ScriptMode::Markup,
        ScriptMode::Plain if looks_like_markup(script, threshold) => ScriptMode::Markup,
        ScriptMode::Plain => ScriptMode::Plain,
    }
}

/// Rebuilds a script from translated lines.
///
/// Markup mode re-decomposes the original script and substitutes `lines`
/// position by position; plain mode (or an empty original) joins `lines`
/// with `\r\n`.
pub fn rebuild_script<S: AsRef<str>>(original: &str, lines: &[S], mode: ScriptMode) -> String {
    match mode {
        ScriptMode::Markup if !original.is_empty() => {
            let records = decompose(original);
            recompose(&records, Some(lines))
        }
        _ => lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join(LINE_SEPARATOR),
    }
}

/// Extract/save operations bound to an [`ArtifactStore`].
pub struct ScriptWorkflow<'a> {
    store: &'a ArtifactStore,
    markup_threshold: usize,
}

impl<'a> ScriptWorkflow<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self {
            store,
            markup_threshold: DEFAULT_MARKUP_THRESHOLD,
        }
    }

    pub fn with_markup_threshold(mut self, threshold: usize) -> Self {
        self.markup_threshold = threshold;
        self
    }

    /// Stores an upload and extracts its lines in one step.
    pub fn upload(
        &self,
        filename: &str,
        bytes: &[u8],
        mode: ScriptMode,
    ) -> Result<ExtractedScript, StoreError> {
        self.store.save_upload(filename, bytes)?;
        self.extract(filename, mode)
    }

    pub fn extract(&self, filename: &str, mode: ScriptMode) -> Result<ExtractedScript, StoreError> {
        let artifact = self.store.load(filename)?;
        let lines = extract_lines(artifact.script(), mode);
        log::debug!("extracted {} lines from {filename} ({mode:?})", lines.len());
        Ok(ExtractedScript {
            filename: filename.to_string(),
            lines,
        })
    }

    /// Mode a save of `filename` would use for `requested`.
    pub fn resolve(&self, filename: &str, requested: ScriptMode) -> Result<ScriptMode, StoreError> {
        let artifact = self.store.load(filename)?;
        Ok(resolve_mode(requested, artifact.script(), self.markup_threshold))
    }

    /// Rebuilds the stored artifact's script from `request.lines` and writes
    /// it back under the same name. Returns the artifact's path.
    pub fn save(&self, request: &SaveRequest) -> Result<PathBuf, StoreError> {
        let mut artifact = self.store.load(&request.filename)?;
        let original = artifact.script().to_string();
        let mode = resolve_mode(request.mode, &original, self.markup_threshold);
        log::debug!(
            "saving {} lines into {} ({mode:?})",
            request.lines.len(),
            request.filename
        );

        artifact.set_script(rebuild_script(&original, &request.lines, mode));
        self.store.write(&request.filename, &artifact)
    }
}

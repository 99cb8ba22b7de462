pub mod io;
pub mod models;
pub mod parsing;
pub mod translate;
pub mod workflow;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{ArtifactStore, StoreError};
pub use models::{ArtifactError, SCRIPT_FIELD, ScriptArtifact};
pub use parsing::{LineKind, LineRecord, TagLine, TextLine, decompose, recompose};
pub use translate::{ChatTransport, TranslateError, Translator, TranslatorSettings};
pub use workflow::{ExtractedScript, SaveRequest, ScriptMode, ScriptWorkflow};

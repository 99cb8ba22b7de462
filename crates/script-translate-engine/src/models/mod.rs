pub mod artifact;

pub use artifact::{ArtifactError, SCRIPT_FIELD, ScriptArtifact};

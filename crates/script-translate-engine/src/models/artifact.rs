use serde_json::{Map, Value};

/// Field holding the script text inside an artifact.
pub const SCRIPT_FIELD: &str = "m_Script";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Artifact root is not a JSON object")]
    NotAnObject,
}

/// A JSON data file carrying a script in its `m_Script` field.
///
/// Every other field is kept as-is, in its original key order, so that
/// writing the artifact back only changes the script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptArtifact {
    fields: Map<String, Value>,
}

impl ScriptArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn parse(text: &str) -> Result<Self, ArtifactError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    fn from_value(value: Value) -> Result<Self, ArtifactError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ArtifactError::NotAnObject),
        }
    }

    /// The script text. A missing or non-string field reads as empty.
    pub fn script(&self) -> &str {
        self.fields
            .get(SCRIPT_FIELD)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Replaces the script, inserting the field at the end if absent.
    pub fn set_script(&mut self, script: impl Into<String>) {
        self.fields
            .insert(SCRIPT_FIELD.to_string(), Value::String(script.into()));
    }

    pub fn has_script(&self) -> bool {
        self.fields.contains_key(SCRIPT_FIELD)
    }

    /// Pretty JSON with two-space indentation. Non-ASCII text is written as-is.
    pub fn to_pretty_string(&self) -> Result<String, ArtifactError> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }
}

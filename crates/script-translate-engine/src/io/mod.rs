use crate::models::{ArtifactError, ScriptArtifact};
use relative_path::{Component, RelativePath};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid artifact name: {0:?}")]
    InvalidName(String),
    #[error("Failed to parse artifact {name}: {source}")]
    Artifact {
        name: String,
        source: ArtifactError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat directory of uploaded artifacts, addressed by file name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a stored artifact, for handing out as a download.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let name = validate_name(name)?;
        Ok(name.to_path(&self.root))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|p| p.is_file())
    }

    /// Stores raw upload bytes under `name`, replacing any previous upload.
    pub fn save_upload(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        fs::write(&path, bytes)?;
        log::debug!("stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Reads and parses a stored artifact.
    pub fn load(&self, name: &str) -> Result<ScriptArtifact, StoreError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }
        let bytes = fs::read(&path)?;
        ScriptArtifact::from_slice(&bytes).map_err(|source| StoreError::Artifact {
            name: name.to_string(),
            source,
        })
    }

    /// Writes `artifact` back under `name` as pretty JSON.
    pub fn write(&self, name: &str, artifact: &ScriptArtifact) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        let content = artifact
            .to_pretty_string()
            .map_err(|source| StoreError::Artifact {
                name: name.to_string(),
                source,
            })?;
        fs::write(&path, content)?;
        log::debug!("wrote artifact {}", path.display());
        Ok(path)
    }
}

/// Accepts a single plain file name: no separators, no `.` or `..`.
fn validate_name(name: &str) -> Result<&RelativePath, StoreError> {
    let invalid = || StoreError::InvalidName(name.to_string());
    if name.contains('\\') {
        return Err(invalid());
    }
    let path = RelativePath::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(path),
        _ => Err(invalid()),
    }
}

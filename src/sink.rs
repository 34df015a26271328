//! Destinations for generated source files.
//!
//! The generation pass hands every artifact of one class to [`ArtifactSink::write`] in a single
//! call, after all of them have been rendered. A sink therefore never sees a partial class.

use crate::error::CodegenResult;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One rendered compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub package: String,
    /// Simple name of the top-level type the file declares
    pub type_name: String,
    pub source: String,
}

impl Artifact {
    /// Path relative to a source root (e.g., `com/example/$RealmFoo.java`).
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.type_name));
        path
    }

    /// Fully qualified name of the declared type.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }
}

/// Receives the artifacts of each generated class.
pub trait ArtifactSink {
    /// Write every artifact of one class. Either all of them land or the call fails.
    fn write(&mut self, artifacts: &[Artifact]) -> CodegenResult<()>;
}

/// Keeps artifacts in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source of the file at `path`, relative to the source root.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Source of the type with the given fully qualified name.
    pub fn source(&self, qualified_name: &str) -> Option<&str> {
        let (package, type_name) = qualified_name
            .rsplit_once('.')
            .unwrap_or(("", qualified_name));
        let artifact = Artifact {
            package: package.to_string(),
            type_name: type_name.to_string(),
            source: String::new(),
        };
        self.get(artifact.relative_path())
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifacts: &[Artifact]) -> CodegenResult<()> {
        for artifact in artifacts {
            self.files
                .insert(artifact.relative_path(), artifact.source.clone());
        }
        Ok(())
    }
}

/// Writes artifacts below a source root directory.
///
/// Every file is first written to a temporary file next to its destination. The temporary
/// files are only persisted once all artifacts of the call were staged; if one of them cannot be
/// moved into place, the files of the same call that were already persisted are removed again.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn stage(&self, artifact: &Artifact) -> CodegenResult<(NamedTempFile, PathBuf)> {
        let path = self.root.join(artifact.relative_path());
        let dir = path.parent().unwrap_or(self.root.as_path());
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(artifact.source.as_bytes())?;
        file.flush()?;
        Ok((file, path))
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifacts: &[Artifact]) -> CodegenResult<()> {
        let staged = artifacts
            .iter()
            .map(|artifact| self.stage(artifact))
            .collect::<CodegenResult<Vec<_>>>()?;

        let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (file, path) in staged {
            if let Err(e) = file.persist(&path) {
                // roll back the files of this call that already landed
                for written in &persisted {
                    if let Err(cleanup) = std::fs::remove_file(written) {
                        log::warn!("Failed to remove {}: {cleanup}", written.display());
                    }
                }
                return Err(e.error.into());
            }
            log::debug!("Wrote {}", path.display());
            persisted.push(path);
        }
        Ok(())
    }
}

//! Artifact sinks: apply compiled artifacts to a directory or keep them in memory.

use crate::artifact::Artifact;
use crate::error::CodegenError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ArtifactSink: Send {
    async fn write(&mut self, artifact: &Artifact) -> Result<(), CodegenError>;
}

/// Writes each artifact under `root`, creating parent directories as needed.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn write(&mut self, artifact: &Artifact) -> Result<(), CodegenError> {
        let path = self.root.join(artifact.path());
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CodegenError::io(parent, e))?;
        }
        tokio::fs::write(&path, artifact.contents.as_bytes())
            .await
            .map_err(|e| CodegenError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by relative path.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

#[async_trait]
impl ArtifactSink for MemorySink {
    async fn write(&mut self, artifact: &Artifact) -> Result<(), CodegenError> {
        self.files.insert(artifact.path.clone(), artifact.contents.clone());
        Ok(())
    }
}

/// Write artifacts in order. Returns the relative paths written.
pub async fn write_artifacts<S>(sink: &mut S, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, CodegenError>
where
    S: ArtifactSink + ?Sized,
{
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        sink.write(artifact).await?;
        written.push(artifact.path().to_path_buf());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_sink_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let artifacts = vec![
            Artifact::new("database/schema.sql", "CREATE TABLE a (id SERIAL PRIMARY KEY);\n"),
            Artifact::new("frontend/src/app/as/[id]/page.tsx", "x"),
        ];
        let written = write_artifacts(&mut sink, &artifacts).await.unwrap();
        assert_eq!(written, vec![artifacts[0].path().to_path_buf(), artifacts[1].path().to_path_buf()]);
        assert_eq!(sink.root(), dir.path());
        let schema = std::fs::read_to_string(dir.path().join("database/schema.sql")).unwrap();
        assert_eq!(schema, "CREATE TABLE a (id SERIAL PRIMARY KEY);\n");
        assert!(dir.path().join("frontend/src/app/as/[id]/page.tsx").is_file());
    }

    #[tokio::test]
    async fn directory_sink_reports_io_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("database"), "not a directory").unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let err = sink
            .write(&Artifact::new("database/schema.sql", ""))
            .await
            .unwrap_err();
        match err {
            CodegenError::Io { path, .. } => assert!(path.starts_with(dir.path())),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn memory_sink_as_trait_object() {
        let mut memory = MemorySink::new();
        {
            let sink: &mut dyn ArtifactSink = &mut memory;
            write_artifacts(sink, &[Artifact::new("a.txt", "a")]).await.unwrap();
        }
        assert_eq!(memory.get("a.txt"), Some("a"));
    }
}

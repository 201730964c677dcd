//! Load and save the annotation store.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::state::region::Region;

pub trait AnnotationPersistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Region>>;

    fn save(&self, region: &Region) -> Result<()>;
}

/// Pretty-printed JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the staging file is created in, so the final rename stays
    /// on one filesystem.
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl AnnotationPersistence for JsonFile {
    fn load(&self) -> Result<Option<Region>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let mut region: Region =
            serde_json::from_str(&json).map_err(|e| Error::parse(&self.path, e))?;
        region.normalize();
        tracing::info!(
            "Annotations loaded from {:?} ({} orbits)",
            self.path,
            region.annotated_orbits()
        );
        Ok(Some(region))
    }

    fn save(&self, region: &Region) -> Result<()> {
        let json = serde_json::to_string_pretty(region).map_err(Error::Serialize)?;
        let dir = self.staging_dir();
        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        std::fs::write(temp.path(), json).map_err(|e| Error::io(temp.path(), e))?;
        // A failed persist drops the staging file along with the error.
        temp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;
        tracing::info!("Annotations saved to {:?}", self.path);
        Ok(())
    }
}

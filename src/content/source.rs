use std::fs;
use std::io;
use std::path::PathBuf;

use crate::content::paths::project_paths;
use crate::error::ContentError;

/// Directories under the content root that are never projects.
pub const IGNORED_DIRS: &[&str] = &[".git"];

/// Read-only access to the project tree.
pub trait ContentSource: Send + Sync {
    /// Names of the project directories under the content root, in any order.
    fn project_dirs(&self) -> Result<Vec<String>, ContentError>;

    fn read_metadata(&self, dir: &str) -> Result<String, ContentError>;

    fn read_body(&self, dir: &str) -> Result<String, ContentError>;
}

#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for FsSource {
    fn project_dirs(&self) -> Result<Vec<String>, ContentError> {
        let read_dir =
            fs::read_dir(&self.root).map_err(|err| ContentError::io(&self.root, err))?;

        let mut out = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| ContentError::io(&self.root, err))?;
            let file_type = entry
                .file_type()
                .map_err(|err| ContentError::io(entry.path(), err))?;
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|_| {
                ContentError::io(
                    entry.path(),
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        "project directory name is not valid UTF-8",
                    ),
                )
            })?;
            if IGNORED_DIRS.contains(&name.as_str()) {
                tracing::debug!(dir = %name, "skipping ignored directory");
                continue;
            }
            out.push(name);
        }
        Ok(out)
    }

    fn read_metadata(&self, dir: &str) -> Result<String, ContentError> {
        let path = project_paths(&self.root, dir).metadata_file;
        fs::read_to_string(&path).map_err(|err| ContentError::io(path, err))
    }

    fn read_body(&self, dir: &str) -> Result<String, ContentError> {
        let path = project_paths(&self.root, dir).body_file;
        fs::read_to_string(&path).map_err(|err| ContentError::io(path, err))
    }
}

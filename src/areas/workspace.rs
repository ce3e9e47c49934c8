use crate::errors::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The working tree a repository materializes files into
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a path relative to the working tree
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.path.join(relative)
    }

    /// Create a single directory; an existing entry at `dir_path` is an error
    pub fn make_directory(&self, dir_path: &Path) -> Result<()> {
        let dir_path = self.resolve(dir_path);

        std::fs::create_dir(&dir_path).map_err(|err| match err.kind() {
            std::io::ErrorKind::AlreadyExists => Error::PathExists(dir_path),
            _ => err.into(),
        })
    }

    /// Write `data` to a new file; an existing entry at `file_path` is an error
    pub fn write_file(&self, file_path: &Path, data: &[u8], executable: bool) -> Result<()> {
        let path = self.resolve(file_path);

        // open file as WRONLY, CREAT and EXCL so nothing is ever overwritten
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => Error::PathExists(path.clone()),
                _ => err.into(),
            })?;

        file.write_all(data)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if executable {
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
            }
        }
        #[cfg(not(unix))]
        let _ = executable;

        Ok(())
    }

    /// Create a symbolic link at `link_path` pointing at `target`
    ///
    /// Platforms without symlinks get a regular file holding the target path.
    pub fn write_symlink(&self, link_path: &Path, target: &[u8]) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            let path = self.resolve(link_path);

            std::os::unix::fs::symlink(std::ffi::OsStr::from_bytes(target), &path).map_err(
                |err| match err.kind() {
                    std::io::ErrorKind::AlreadyExists => Error::PathExists(path.clone()),
                    _ => err.into(),
                },
            )
        }

        #[cfg(not(unix))]
        {
            self.write_file(link_path, target, false)
        }
    }
}

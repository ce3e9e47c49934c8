use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the control directory
pub const GIT_DIR_NAME: &str = ".git";

const DEFAULT_BRANCH: &str = "master";

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const CONFIG: &str = "[core]\n\
\trepositoryformatversion = 0\n\
\tfilemode = true\n\
\tbare = false\n\
\tlogallrefupdates = true\n";

/// A repository with both its working tree and control directory in place
///
/// Values are only built by [`Repository::create`] and [`Repository::find`],
/// so a `Repository` is always fully initialized.
#[derive(Debug, Clone)]
pub struct Repository {
    path: Box<Path>,
    git_path: Box<Path>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    fn open(path: &Path) -> Self {
        let git_path = path.join(GIT_DIR_NAME);

        Repository {
            path: path.to_path_buf().into_boxed_path(),
            database: Database::new(git_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.to_path_buf().into_boxed_path()),
            refs: Refs::new(git_path.clone().into_boxed_path()),
            git_path: git_path.into_boxed_path(),
        }
    }

    /// Create a new repository layout at `path`
    ///
    /// `path` and its parents are created when missing. Fails with
    /// [`Error::AlreadyExists`] when `path/.git` is already there.
    pub fn create(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;
        let path = path.canonicalize()?;
        let git_path = path.join(GIT_DIR_NAME);

        match fs::create_dir(&git_path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists(git_path));
            }
            Err(err) => return Err(err.into()),
        }

        let repository = Self::open(&path);

        fs::create_dir(git_path.join("branches"))?;
        fs::create_dir(repository.database().objects_path())?;
        fs::create_dir_all(repository.refs().tags_path())?;
        fs::create_dir_all(repository.refs().heads_path())?;

        fs::write(git_path.join("description"), DESCRIPTION)?;
        repository.refs().update_ref_file(
            &repository.refs().head_path(),
            &format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;
        fs::write(git_path.join("config"), CONFIG)?;

        tracing::info!(path = %git_path.display(), "initialized empty repository");
        Ok(repository)
    }

    /// Find the repository containing `start`
    ///
    /// Scans `start` and then each parent for a `.git` directory entry. The
    /// walk gives up when the next parent would be the filesystem root.
    pub fn find(start: &Path) -> Result<Option<Self>> {
        Ok(Self::locate(start)?.map(|(root, _)| Self::open(&root)))
    }

    /// The working tree root above `start`, along with the number of parent
    /// hops it took to reach it
    fn locate(start: &Path) -> Result<Option<(PathBuf, usize)>> {
        let mut current = start.canonicalize()?;
        let mut hops = 0;

        loop {
            if Self::has_git_dir(&current)? {
                tracing::debug!(path = %current.display(), hops, "found repository");
                return Ok(Some((current, hops)));
            }

            match current.parent() {
                Some(parent) if parent.parent().is_some() => {
                    current = parent.to_path_buf();
                    hops += 1;
                }
                _ => {
                    tracing::debug!(start = %start.display(), hops, "no repository found");
                    return Ok(None);
                }
            }
        }
    }

    /// Like [`Repository::find`], but a missing repository is an error
    pub fn discover(start: &Path) -> Result<Self> {
        Self::find(start)?.ok_or_else(|| Error::NotInitialized(start.to_path_buf()))
    }

    fn has_git_dir(dir: &Path) -> Result<bool> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;

            if entry.file_name() == GIT_DIR_NAME {
                return Ok(entry.file_type()?.is_dir());
            }
        }

        Ok(false)
    }

    /// Root of the working tree
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The control directory
    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}

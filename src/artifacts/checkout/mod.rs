//! Materialize a tree into a fresh directory
//!
//! Checkout never touches existing files: the destination must not exist,
//! and every file is created exclusively. Directories are created before
//! their contents and leaves are written in tree order.
//!
//! Each failing leaf is reported as [`Error::Checkout`] naming the path that
//! could not be written, wrapping the underlying error. Directories and files
//! already written before a failure are left in place.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{EXECUTABLE_MODE, GITLINK_MODE, SYMLINK_MODE, Tree};
use crate::errors::{Error, Result};
use std::path::Path;

/// Writes the leaves of a tree below a destination directory
pub struct Checkout<'r> {
    repository: &'r Repository,
    written: usize,
}

impl<'r> Checkout<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Checkout {
            repository,
            written: 0,
        }
    }

    /// Number of files written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Create `destination` and write `tree` into it
    pub fn apply(&mut self, tree: &Tree, destination: &Path) -> Result<()> {
        self.repository.workspace().make_directory(destination)?;

        self.write_tree(tree, destination)
    }

    fn write_tree(&mut self, tree: &Tree, dir: &Path) -> Result<()> {
        for leaf in tree.leaves() {
            let path = dir.join(&leaf.path);

            self.write_leaf(leaf.mode, &leaf.oid, &path)
                .map_err(|source| match source {
                    // already names the innermost path
                    Error::Checkout { .. } => source,
                    source => Error::Checkout {
                        path: path.clone(),
                        source: Box::new(source),
                    },
                })?;
        }

        Ok(())
    }

    fn write_leaf(&mut self, mode: u32, oid: &ObjectId, path: &Path) -> Result<()> {
        let workspace = self.repository.workspace();

        if mode == GITLINK_MODE {
            return Err(Error::UnsupportedLeaf {
                path: path.to_path_buf(),
                kind: "gitlink".to_string(),
            });
        }

        match self.repository.database().decode(oid)? {
            Object::Tree(subtree) => {
                workspace.make_directory(path)?;
                self.write_tree(&subtree, path)
            }
            Object::Blob(blob) => {
                tracing::trace!(path = %path.display(), oid = %oid, mode = %format!("{mode:o}"), "writing blob");

                if mode == SYMLINK_MODE {
                    workspace.write_symlink(path, blob.content())?;
                } else {
                    workspace.write_file(path, blob.content(), mode == EXECUTABLE_MODE)?;
                }

                self.written += 1;
                Ok(())
            }
            other => Err(Error::UnsupportedLeaf {
                path: path.to_path_buf(),
                kind: other.object_type().to_string(),
            }),
        }
    }
}

impl Repository {
    /// Write every leaf of `tree` below the new directory `destination`
    ///
    /// Fails with [`Error::PathExists`] when `destination` already exists.
    pub fn checkout(&self, tree: &Tree, destination: &Path) -> Result<()> {
        let mut checkout = Checkout::new(self);
        checkout.apply(tree, destination)?;

        tracing::info!(
            destination = %destination.display(),
            files = checkout.written(),
            "checked out tree"
        );
        Ok(())
    }
}

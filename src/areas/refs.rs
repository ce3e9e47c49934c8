//! Git references (branches, HEAD, tags)
//!
//! This module manages Git references which are human-readable names pointing to objects.
//! References can be:
//! - Direct: Containing an object SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash, optionally followed by a newline (direct reference)
//! - `ref: <path>` for symbolic references, where the path is relative to `.git`

use crate::artifacts::branch::reference::Ref;
use crate::artifacts::branch::{HEAD_REF_NAME, MAX_SYMREF_DEPTH, SYMREF_REGEX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Git references manager
///
/// Reads references below the control directory.
#[derive(Debug, Clone, new)]
pub struct Refs {
    /// Path to the control directory (typically `.git`)
    path: Box<Path>,
}

/// Internal representation of a reference value
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref, relative to `.git`
    SymRef(String),
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    /// Read a ref file; `None` means the file is missing or empty (an unborn branch)
    fn read_symref_or_oid(path: &Path) -> Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].trim().to_string())))
        } else {
            let oid = ObjectId::try_parse(content).map_err(|_| Error::InvalidRef {
                path: path.to_path_buf(),
                content: content.to_string(),
            })?;

            Ok(Some(SymRefOrOid::Oid(oid)))
        }
    }
}

impl Refs {
    /// Resolve every ref at `path`, relative to the control directory
    ///
    /// A regular file is resolved as a single ref. A directory is walked
    /// recursively (in file name order) and each regular file below it is
    /// resolved. Symbolic refs are followed; refs whose chain ends at a missing
    /// file are left out.
    pub fn find_in_path(&self, path: impl AsRef<Path>) -> Result<Vec<Ref>> {
        let root = self.path.join(path.as_ref());

        let metadata = match std::fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if metadata.is_file() {
            return Ok(self.resolve_ref_file(&root)?.into_iter().collect());
        }

        let mut refs = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;

            if entry.file_type().is_file()
                && let Some(found) = self.resolve_ref_file(entry.path())?
            {
                refs.push(found);
            }
        }

        Ok(refs)
    }

    /// All branches followed by all tags
    pub fn find_all(&self) -> Result<Vec<Ref>> {
        let mut refs = self.find_in_path(Path::new("refs").join("heads"))?;
        refs.extend(self.find_in_path(Path::new("refs").join("tags"))?);

        Ok(refs)
    }

    /// Look up a branch by the literal name of its file in `refs/heads`
    pub fn find_by_name(&self, name: &str) -> Result<Option<Ref>> {
        self.find_in_dir_by_name(&self.heads_path(), name)
    }

    /// Look up a tag by the literal name of its file in `refs/tags`
    pub fn find_tag(&self, name: &str) -> Result<Option<Ref>> {
        self.find_in_dir_by_name(&self.tags_path(), name)
    }

    /// The object HEAD resolves to, or `None` while the current branch is unborn
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        Ok(self
            .find_in_path(HEAD_REF_NAME)?
            .into_iter()
            .next()
            .map(|head| head.oid))
    }

    /// Write a ref file, creating its parent directories
    ///
    /// The file is held under an exclusive lock while it is written.
    pub fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // open the ref file as WRONLY and CREAT to write the content to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn find_in_dir_by_name(&self, dir: &Path, name: &str) -> Result<Option<Ref>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let entry = entry?;

            if entry.file_type()?.is_file() && entry.file_name() == name {
                return self.resolve_ref_file(&entry.path());
            }
        }

        Ok(None)
    }

    /// Resolve one ref file, naming the result after that file
    fn resolve_ref_file(&self, path: &Path) -> Result<Option<Ref>> {
        let name = self.ref_name(path);
        let mut current = path.to_path_buf();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&current)? {
                Some(SymRefOrOid::SymRef(target)) => {
                    let confined = Path::new(&target)
                        .components()
                        .all(|component| matches!(component, Component::Normal(_)));
                    if !confined {
                        return Err(Error::InvalidRef {
                            path: current,
                            content: format!("ref: {target}"),
                        });
                    }

                    tracing::debug!(name = %name, target = %target, "following symbolic ref");
                    current = self.path.join(target);
                }
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(Ref::new(name, oid))),
                None => return Ok(None),
            }
        }

        Err(Error::SymrefDepthExceeded {
            name,
            depth: MAX_SYMREF_DEPTH,
        })
    }

    /// Path of a ref file relative to the control directory, `/`-separated
    fn ref_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.path)
            .unwrap_or(path)
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}

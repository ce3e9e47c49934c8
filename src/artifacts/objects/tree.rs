//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`, with no separator between
//! the digest and the next entry.

use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;

/// Mode of a regular file
pub const REGULAR_MODE: u32 = 0o100644;
/// Mode of an executable file
pub const EXECUTABLE_MODE: u32 = 0o100755;
/// Mode of a symbolic link
pub const SYMLINK_MODE: u32 = 0o120000;
/// Mode of a subdirectory
pub const DIRECTORY_MODE: u32 = 0o40000;
/// Mode of a gitlink (submodule commit)
pub const GITLINK_MODE: u32 = 0o160000;

/// A single `(mode, path, oid)` entry of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Leaf {
    pub mode: u32,
    pub path: String,
    pub oid: ObjectId,
}

impl Leaf {
    pub fn is_tree(&self) -> bool {
        self.mode == DIRECTORY_MODE
    }

    pub fn is_gitlink(&self) -> bool {
        self.mode == GITLINK_MODE
    }

    pub fn is_executable(&self) -> bool {
        self.mode == EXECUTABLE_MODE
    }
}

/// Git tree object: the leaves in the order they are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    leaves: Vec<Leaf>,
    raw: Bytes,
}

impl Tree {
    /// Parse the binary entry list of a tree payload
    pub fn parse(raw: Bytes) -> Result<Self> {
        let mut leaves = Vec::new();
        let mut cursor = 0;

        while cursor < raw.len() {
            let space = find_byte(&raw, cursor, b' ').ok_or(Error::MalformedTree {
                offset: cursor,
                reason: "missing space after mode",
            })?;
            let mode = std::str::from_utf8(&raw[cursor..space])
                .ok()
                .filter(|digits| !digits.is_empty())
                .and_then(|digits| u32::from_str_radix(digits, 8).ok())
                .ok_or(Error::MalformedTree {
                    offset: cursor,
                    reason: "mode is not an octal number",
                })?;

            let nul = find_byte(&raw, space + 1, b'\0').ok_or(Error::MalformedTree {
                offset: space + 1,
                reason: "missing NUL after path",
            })?;
            let path = std::str::from_utf8(&raw[space + 1..nul])
                .map_err(|_| Error::MalformedTree {
                    offset: space + 1,
                    reason: "path is not valid UTF-8",
                })?;
            if !is_plain_name(path) {
                return Err(Error::MalformedTree {
                    offset: space + 1,
                    reason: "path is not a single file name",
                });
            }
            let path = path.to_string();

            let digest_end = nul + 1 + OBJECT_ID_BYTES;
            if digest_end > raw.len() {
                return Err(Error::MalformedTree {
                    offset: nul + 1,
                    reason: "truncated object id",
                });
            }
            let oid = ObjectId::from_bytes(&raw[nul + 1..digest_end])?;

            leaves.push(Leaf::new(mode, path, oid));
            cursor = digest_end;
        }

        Ok(Self { leaves, raw })
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn into_leaves(self) -> Vec<Leaf> {
        self.leaves
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

/// A leaf names one entry of its directory: no separators, no `.` or `..`
fn is_plain_name(path: &str) -> bool {
    !matches!(path, "" | "." | "..") && !path.contains(['/', '\\', '\0'])
}

fn find_byte(data: &[u8], from: usize, needle: u8) -> Option<usize> {
    data[from..]
        .iter()
        .position(|&b| b == needle)
        .map(|pos| from + pos)
}

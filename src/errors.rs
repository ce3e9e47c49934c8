//! Error taxonomy shared by the object codec, ref resolution and checkout
//!
//! Format errors mean the bytes on disk do not match the expected grammar and are
//! never recovered. I/O errors are propagated unchanged. Ambiguity and lifecycle
//! errors are kept distinct so the command layer can render friendly messages.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to open object file {path}")]
    BadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decompress object file {path}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid object type: {0:?}")]
    InvalidType(String),

    #[error("invalid object size: header declares {declared:?}, payload has {actual} bytes")]
    InvalidSize { declared: String, actual: usize },

    #[error("malformed tree entry at byte {offset}: {reason}")]
    MalformedTree { offset: usize, reason: &'static str },

    #[error("{kind} object is missing its {key} header")]
    MissingHeader { kind: ObjectType, key: &'static str },

    #[error("invalid signature line: {0:?}")]
    InvalidSignature(String),

    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    #[error("invalid ref file {path}: {content:?}")]
    InvalidRef { path: PathBuf, content: String },

    #[error("ref {name} exceeds the maximum indirection depth of {depth}")]
    SymrefDepthExceeded { name: String, depth: usize },

    #[error("short object id {name} is ambiguous ({} candidates)", .candidates.len())]
    MultipleResults {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("repository already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotInitialized(PathBuf),

    #[error("path already exists: {0}")]
    PathExists(PathBuf),

    #[error("object {oid} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("cannot check out {kind} entry {path}")]
    UnsupportedLeaf { path: PathBuf, kind: String },

    #[error("checkout failed at {path}")]
    Checkout {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

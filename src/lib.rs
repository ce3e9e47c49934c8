//! A read-only Git object store reader
//!
//! - `areas`: the on-disk pieces of a repository (object database, refs, working tree)
//! - `artifacts`: objects, references and the algorithms working on them
//! - `commands`: the operations exposed by the `grit` binary
//! - `errors`: the error type shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

#[cfg(test)]
pub(crate) mod fixtures;

//! Git command implementations
//!
//! Commands are organized into two categories following Git's architecture:
//!
//! - `plumbing`: Low-level commands for inspecting objects and refs (cat-file, ls-tree, ...)
//! - `porcelain`: User-facing commands (init, checkout)
//!
//! Every command writes its output to the writer it is given and leaves all
//! decisions about presentation of errors to the caller.

pub mod plumbing;
pub mod porcelain;

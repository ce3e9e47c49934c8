//! Core repository components
//!
//! This module contains the fundamental building blocks of a Git repository:
//!
//! - `database`: Loose object store for blobs, trees, commits and tags
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: Repository creation, discovery and coordination
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;

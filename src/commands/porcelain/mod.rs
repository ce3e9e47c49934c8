//! Porcelain commands (user-facing operations)
//!
//! - `init`: Create an empty repository
//! - `checkout`: Write the tree of a commit into a new directory

pub mod checkout;
pub mod init;

//! Plumbing commands (low-level Git operations)
//!
//! Plumbing commands provide direct access to Git's internal data structures.
//! They're primarily used for scripting and debugging a repository.
//!
//! ## Commands
//!
//! - `cat-file`: Print the payload of an object
//! - `hash-object`: Compute the object ID of a file
//! - `ls-tree`: List contents of a tree object
//! - `rev-parse`: Expand a revision name to a full object ID
//! - `show-ref`: List branches and tags

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;

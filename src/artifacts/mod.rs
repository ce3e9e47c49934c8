//! Git data structures and algorithms
//!
//! - `branch`: References and revision name resolution
//! - `checkout`: Writing a tree out to a fresh directory
//! - `objects`: Git object types (blob, tree, commit, tag) and their codec

pub mod branch;
pub mod checkout;
pub mod objects;

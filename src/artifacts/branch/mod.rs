//! References and revision names
//!
//! - `reference`: the `{name, oid}` pair produced by ref resolution
//! - `revision`: short-hash disambiguation and name-to-object lookup

pub mod reference;
pub mod revision;

/// Regex pattern for parsing symbolic references
pub const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Maximum number of `ref: ` hops followed before giving up
pub const MAX_SYMREF_DEPTH: usize = 5;

/// Shortest abbreviated object ID that is looked up in the object store
pub const MIN_PREFIX_LENGTH: usize = 4;

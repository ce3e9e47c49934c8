use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// A named pointer to an object, after any `ref: ` indirection was followed
///
/// `name` is the path of the ref file relative to the control directory,
/// e.g. `refs/heads/master` or `HEAD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct Ref {
    pub name: String,
    pub oid: ObjectId,
}

impl Ref {
    /// The name without its `refs/heads/` or `refs/tags/` prefix
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix("refs/heads/")
            .or_else(|| self.name.strip_prefix("refs/tags/"))
            .unwrap_or(&self.name)
    }
}

impl std::fmt::Display for Ref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.oid, self.name)
    }
}

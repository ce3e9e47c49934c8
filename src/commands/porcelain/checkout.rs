use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Check out the commit or tree `name` into the new directory `destination`
    pub fn checkout_revision(
        &self,
        name: &str,
        destination: &Path,
        writer: &mut impl Write,
    ) -> anyhow::Result<()> {
        let (oid, object) = self
            .resolve_revision(name)?
            .ok_or_else(|| anyhow::anyhow!("Not a valid object name {name}"))?;

        let tree = match object {
            Object::Tree(tree) => tree,
            Object::Commit(commit) => self.load_tree(commit.tree())?,
            other => {
                return Err(Error::UnexpectedKind {
                    oid,
                    expected: ObjectType::Commit,
                    actual: other.object_type(),
                }
                .into());
            }
        };

        self.checkout(&tree, destination)
            .with_context(|| format!("Failed to check out {name} into {}", destination.display()))?;

        writeln!(
            writer,
            "Checked out {} into {}",
            oid.to_short_oid(),
            destination.display()
        )?;

        Ok(())
    }

    /// Decode `oid`, which must name a tree
    pub(crate) fn load_tree(&self, oid: &ObjectId) -> crate::errors::Result<Tree> {
        let object = self.database().decode(oid)?;
        let actual = object.object_type();

        object.into_tree().ok_or_else(|| Error::UnexpectedKind {
            oid: oid.clone(),
            expected: ObjectType::Tree,
            actual,
        })
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn ls_tree(&self, name: &str, recursive: bool, writer: &mut impl Write) -> anyhow::Result<()> {
        let (oid, object) = self
            .resolve_revision(name)?
            .ok_or_else(|| anyhow::anyhow!("Not a valid object name {name}"))?;

        let tree = match object {
            Object::Tree(tree) => tree,
            Object::Commit(commit) => self.load_tree(commit.tree())?,
            other => {
                return Err(Error::UnexpectedKind {
                    oid,
                    expected: ObjectType::Tree,
                    actual: other.object_type(),
                }
                .into());
            }
        };

        self.print_tree(&tree, None, recursive, writer)
    }

    fn print_tree(
        &self,
        tree: &Tree,
        prefix: Option<&Path>,
        recursive: bool,
        writer: &mut impl Write,
    ) -> anyhow::Result<()> {
        for leaf in tree.leaves() {
            let path = match prefix {
                Some(prefix) => prefix.join(&leaf.path),
                None => Path::new(&leaf.path).to_path_buf(),
            };

            if recursive && leaf.is_tree() {
                let subtree = self.load_tree(&leaf.oid)?;
                self.print_tree(&subtree, Some(&path), recursive, writer)?;
                continue;
            }

            // gitlinks point into another repository
            let kind = if leaf.is_gitlink() {
                ObjectType::Commit
            } else {
                self.database().read_kind(&leaf.oid)?
            };

            writeln!(writer, "{:06o} {} {}\t{}", leaf.mode, kind, leaf.oid, path.display())?;
        }

        Ok(())
    }
}

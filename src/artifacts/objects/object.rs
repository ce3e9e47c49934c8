use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;

/// A decoded object; each variant owns its payload buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Build the typed variant for a payload of the given kind
    pub fn parse(kind: ObjectType, payload: Bytes) -> Result<Self> {
        match kind {
            ObjectType::Blob => Ok(Object::Blob(Blob::new(payload))),
            ObjectType::Tree => Ok(Object::Tree(Tree::parse(payload)?)),
            ObjectType::Commit => Ok(Object::Commit(Commit::parse(payload)?)),
            ObjectType::Tag => Ok(Object::Tag(Tag::parse(payload)?)),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Tree(_) => ObjectType::Tree,
            Object::Commit(_) => ObjectType::Commit,
            Object::Tag(_) => ObjectType::Tag,
        }
    }

    /// The full decoded payload, without the header
    pub fn payload(&self) -> &Bytes {
        match self {
            Object::Blob(blob) => blob.content(),
            Object::Tree(tree) => tree.raw(),
            Object::Commit(commit) => commit.raw(),
            Object::Tag(tag) => tag.raw(),
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Object::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Object::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn into_blob(self) -> Option<Blob> {
        match self {
            Object::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Object::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - An optional signature block
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  <continuation lines>
//!  -----END PGP SIGNATURE-----
//!
//! <commit message>
//! ```

use crate::artifacts::objects::headers::HeaderBlock;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::borrow::Cow;

/// Author, committer or tagger line
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Signature {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Signature {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidSignature(value.to_string());

        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(invalid());
        }

        let offset = Self::parse_timezone(parts[0]).ok_or_else(invalid)?;
        let seconds = parts[1].parse::<i64>().map_err(|_| invalid())?;
        let name_email_part = parts[2];

        let email_start = name_email_part.find('<').ok_or_else(invalid)?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|end| *end > email_start)
            .ok_or_else(invalid)?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)
            .ok_or_else(invalid)?
            .with_timezone(&offset);

        Ok(Signature {
            name,
            email,
            timestamp,
        })
    }
}

impl Signature {
    /// Parse a `+hhmm` / `-hhmm` offset
    fn parse_timezone(timezone: &str) -> Option<chrono::FixedOffset> {
        let (east, digits) = match timezone.split_at_checked(1)? {
            ("+", digits) => (true, digits),
            ("-", digits) => (false, digits),
            _ => return None,
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let hours = digits[..2].parse::<i32>().ok()?;
        let minutes = digits[2..].parse::<i32>().ok()?;
        let seconds = (hours * 60 + minutes) * 60;

        if east {
            chrono::FixedOffset::east_opt(seconds)
        } else {
            chrono::FixedOffset::west_opt(seconds)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree: ObjectId,
    parents: Vec<ObjectId>,
    author: String,
    committer: String,
    gpgsig: Option<String>,
    message: Bytes,
    raw: Bytes,
}

impl Commit {
    /// Parse a commit payload
    ///
    /// Only `tree`, `parent`, `author`, `committer` and `gpgsig` are kept;
    /// other header keys are skipped. A commit without a `tree` header is
    /// rejected.
    pub fn parse(raw: Bytes) -> Result<Self> {
        let block = HeaderBlock::scan(&raw);

        let tree = block
            .get("tree")
            .ok_or(Error::MissingHeader {
                kind: ObjectType::Commit,
                key: "tree",
            })
            .and_then(ObjectId::try_parse)?;
        let parents = block
            .get_all("parent")
            .map(ObjectId::try_parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tree,
            parents,
            author: block.get("author").unwrap_or_default().to_string(),
            committer: block.get("committer").unwrap_or_default().to_string(),
            gpgsig: block.get("gpgsig").map(str::to_string),
            message: block.body.clone().unwrap_or_default(),
            raw,
        })
    }

    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    /// The first parent, if any
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn committer(&self) -> &str {
        &self.committer
    }

    pub fn author_signature(&self) -> Result<Signature> {
        Signature::try_from(self.author.as_str())
    }

    pub fn committer_signature(&self) -> Result<Signature> {
        Signature::try_from(self.committer.as_str())
    }

    pub fn gpgsig(&self) -> Option<&str> {
        self.gpgsig.as_deref()
    }

    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }

    /// The first line of the message
    pub fn short_message(&self) -> String {
        self.message().lines().next().unwrap_or_default().to_string()
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const PARENT: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[fixture]
    fn signed_payload() -> Bytes {
        Bytes::from(format!(
            "tree {TREE}\n\
             author fake_user <fake_email@email.com> 1672574400 +0000\n\
             committer fake_user <fake_email@email.com> 1672574400 +0200\n\
             gpgsig -----BEGIN PGP SIGNATURE-----\n \n iQEzBAABCAAdFiEE\n -----END PGP SIGNATURE-----\n\
             \n\
             Initial commit\n\
             \n\
             With a body\n"
        ))
    }

    #[test]
    fn test_parse_commit_fields() {
        let raw = Bytes::from(format!(
            "tree {TREE}\nparent {PARENT}\nauthor A\ncommitter C\n\nmessage text\n"
        ));

        let commit = Commit::parse(raw.clone()).unwrap();

        pretty_assertions::assert_eq!(commit.tree().as_ref(), TREE);
        pretty_assertions::assert_eq!(commit.parent().map(ToString::to_string), Some(PARENT.to_string()));
        pretty_assertions::assert_eq!(commit.author(), "A");
        pretty_assertions::assert_eq!(commit.committer(), "C");
        pretty_assertions::assert_eq!(commit.gpgsig(), None);
        pretty_assertions::assert_eq!(commit.message(), "message text");
        pretty_assertions::assert_eq!(commit.raw(), &raw);
    }

    #[rstest]
    fn test_parse_signed_commit(signed_payload: Bytes) {
        let commit = Commit::parse(signed_payload).unwrap();

        assert!(commit.parent().is_none());
        pretty_assertions::assert_eq!(
            commit.gpgsig(),
            Some("-----BEGIN PGP SIGNATURE-----\n\niQEzBAABCAAdFiEE\n-----END PGP SIGNATURE-----")
        );
        pretty_assertions::assert_eq!(commit.message(), "Initial commit\n\nWith a body");
        pretty_assertions::assert_eq!(commit.short_message(), "Initial commit");
    }

    #[rstest]
    fn test_parse_signatures(signed_payload: Bytes) {
        let commit = Commit::parse(signed_payload).unwrap();

        let author = commit.author_signature().unwrap();
        pretty_assertions::assert_eq!(author.display_name(), "fake_user <fake_email@email.com>");
        pretty_assertions::assert_eq!(author.readable_timestamp(), "Sun Jan 1 12:00:00 2023 +0000");

        let committer = commit.committer_signature().unwrap();
        pretty_assertions::assert_eq!(committer.timestamp().timestamp(), 1672574400);
        pretty_assertions::assert_eq!(
            committer.readable_timestamp(),
            "Sun Jan 1 14:00:00 2023 +0200"
        );
    }

    #[test]
    fn test_parse_skips_unknown_headers_and_keeps_all_parents() {
        let raw = Bytes::from(format!(
            "tree {TREE}\nparent {PARENT}\nparent {TREE}\nencoding ISO-8859-1\nauthor A\ncommitter C\n\nmerge\n"
        ));

        let commit = Commit::parse(raw).unwrap();

        pretty_assertions::assert_eq!(commit.parents().len(), 2);
        pretty_assertions::assert_eq!(commit.parent().map(ToString::to_string), Some(PARENT.to_string()));
        pretty_assertions::assert_eq!(commit.message(), "merge");
    }

    #[test]
    fn test_parse_rejects_commit_without_tree() {
        let raw = Bytes::from_static(b"author A\ncommitter C\n\nmessage\n");

        assert!(matches!(
            Commit::parse(raw),
            Err(Error::MissingHeader { key: "tree", .. })
        ));
    }

    #[test]
    fn test_invalid_signature_is_reported() {
        assert!(Signature::try_from("no email here").is_err());
        assert!(Signature::try_from("A <a@b.c> 1672574400 0000").is_err());
        assert!(Signature::try_from("A <a@b.c> 1672574400 é123").is_err());
        assert!(Signature::try_from("A <a@b.c> 1672574400 +é12").is_err());
    }
}

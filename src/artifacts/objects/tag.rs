//! Git annotated tag object
//!
//! ## Format
//!
//! ```text
//! tag <size>\0
//! object <target-sha>
//! type <target-type>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <annotation>
//! ```
//!
//! Older writers emit `author` and `date` headers instead of `tagger`; both
//! spellings are kept.

use crate::artifacts::objects::commit::Signature;
use crate::artifacts::objects::headers::HeaderBlock;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    object: Option<ObjectId>,
    target_type: Option<ObjectType>,
    name: Option<String>,
    tagger: Option<String>,
    author: Option<String>,
    date: Option<String>,
    gpgsig: Option<String>,
    annotation: Option<Bytes>,
    raw: Bytes,
}

impl Tag {
    pub fn parse(raw: Bytes) -> Result<Self> {
        let block = HeaderBlock::scan(&raw);

        let object = block.get("object").map(ObjectId::try_parse).transpose()?;
        let target_type = block.get("type").map(ObjectType::try_from).transpose()?;

        Ok(Self {
            object,
            target_type,
            name: block.get("tag").map(str::to_string),
            tagger: block.get("tagger").map(str::to_string),
            author: block.get("author").map(str::to_string),
            date: block.get("date").map(str::to_string),
            gpgsig: block.get("gpgsig").map(str::to_string),
            annotation: block.body.clone(),
            raw,
        })
    }

    /// The tagged object
    pub fn object(&self) -> Option<&ObjectId> {
        self.object.as_ref()
    }

    pub fn target_type(&self) -> Option<ObjectType> {
        self.target_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tagger(&self) -> Option<&str> {
        self.tagger.as_deref()
    }

    pub fn tagger_signature(&self) -> Option<Result<Signature>> {
        self.tagger.as_deref().map(Signature::try_from)
    }

    /// The `author` header, falling back to `tagger`
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().or(self.tagger.as_deref())
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn gpgsig(&self) -> Option<&str> {
        self.gpgsig.as_deref()
    }

    pub fn annotation(&self) -> Option<Cow<'_, str>> {
        self.annotation
            .as_ref()
            .map(|annotation| String::from_utf8_lossy(annotation))
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Loose object store rooted at `.git/objects`
///
/// Objects are write-once and never rewritten, so a `Database` can be shared
/// between threads that decode concurrently.
#[derive(Debug, Clone)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles once loose objects are not the only storage
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Read, inflate and parse the object with the given ID
    ///
    /// The returned object owns a copy of its payload; the decompression
    /// buffer does not outlive this call.
    pub fn decode(&self, object_id: &ObjectId) -> Result<Object> {
        let object_path = self.object_path(object_id);
        tracing::debug!(oid = %object_id, path = %object_path.display(), "decoding object");

        let content = self.read_object(&object_path)?;
        let header = ObjectHeader::parse(&content)?;
        let payload = Bytes::copy_from_slice(&content[header.payload_offset..]);

        Object::parse(header.kind, payload)
    }

    /// Read only as much of the object as needed to report its kind
    pub fn read_kind(&self, object_id: &ObjectId) -> Result<ObjectType> {
        let content = self.read_object(&self.object_path(object_id))?;

        Ok(ObjectHeader::parse(&content)?.kind)
    }

    /// Compress and store an object
    ///
    /// The write path is not available yet; calling this always fails.
    pub fn encode(&self, object: &Object) -> Result<ObjectId> {
        tracing::warn!(kind = %object.object_type(), "refusing to encode object");

        Err(Error::Unimplemented("object encoding"))
    }

    /// Find all objects whose OID starts with the given prefix
    ///
    /// The prefix must be at least two characters long, as only the matching
    /// fan-out directory is listed. A missing fan-out directory yields no
    /// matches; any other failure to list it is an error.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        let entries = match std::fs::read_dir(&dir_path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }
        matches.sort();

        tracing::debug!(prefix = %prefix, candidates = matches.len(), "resolved object prefix");
        Ok(matches)
    }

    fn read_object(&self, object_path: &Path) -> Result<Vec<u8>> {
        let compressed = std::fs::read(object_path).map_err(|source| Error::BadFile {
            path: object_path.to_path_buf(),
            source,
        })?;

        Self::decompress(&compressed).map_err(|source| Error::Decompress {
            path: object_path.to_path_buf(),
            source,
        })
    }

    fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content)
    }
}

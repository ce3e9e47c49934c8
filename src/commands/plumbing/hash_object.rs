use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(
        &self,
        object_path: &Path,
        write: bool,
        writer: &mut impl Write,
    ) -> anyhow::Result<()> {
        let data = std::fs::read(object_path)
            .with_context(|| format!("Failed to read {}", object_path.display()))?;
        let object_id = ObjectId::from_content(ObjectType::Blob, &data);

        // write (if write is true) as compressed object file
        if write {
            let object = Object::Blob(Blob::new(Bytes::from(data)));
            self.database().encode(&object)?;
        }

        writeln!(writer, "{object_id}")?;

        Ok(())
    }
}

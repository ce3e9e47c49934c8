use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, name: &str, writer: &mut impl Write) -> anyhow::Result<()> {
        let (_, object) = self
            .resolve_revision(name)?
            .ok_or_else(|| anyhow::anyhow!("Not a valid object name {name}"))?;

        // payloads are written as-is, blobs may hold arbitrary bytes
        writer.write_all(object.payload())?;

        Ok(())
    }
}

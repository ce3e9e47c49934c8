use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn rev_parse(&self, name: &str, writer: &mut impl Write) -> anyhow::Result<()> {
        match self.resolve_oid(name)? {
            Some(oid) => {
                writeln!(writer, "{oid}")?;
                Ok(())
            }
            None => anyhow::bail!("ambiguous argument '{name}': unknown revision"),
        }
    }
}

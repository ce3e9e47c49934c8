use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn show_ref(&self, head: bool, writer: &mut impl Write) -> anyhow::Result<()> {
        let mut refs = self.refs().find_all()?;
        if head {
            refs.splice(0..0, self.refs().find_in_path("HEAD")?);
        }

        for reference in refs {
            writeln!(writer, "{reference}")?;
        }

        Ok(())
    }
}

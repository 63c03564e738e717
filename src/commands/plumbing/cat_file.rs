use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn cat_file(&mut self, object_id: &str, show_type: bool) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let object = self.database().load(&object_id)?;

        if show_type {
            writeln!(self.writer(), "{}", object.object_type)?;
            return Ok(());
        }

        let corrupt = || format!("unable to decode {} {object_id}", object.object_type);
        match object.object_type {
            ObjectType::Tree => {
                let listing = object.decode::<Tree>().with_context(corrupt)?.display();
                if !listing.is_empty() {
                    writeln!(self.writer(), "{listing}")?;
                }
            }
            ObjectType::Blob => {
                let blob = object.decode::<Blob>().with_context(corrupt)?;
                self.writer().write_all(blob.content())?;
            }
            ObjectType::Commit => {
                let commit = object.decode::<Commit>().with_context(corrupt)?;
                write!(self.writer(), "{}", commit.display())?;
            }
        }

        Ok(())
    }
}

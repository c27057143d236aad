use crate::catalogue::Catalogue;
use crate::config::Settings;
use crate::persistence::CatalogueFile;
use crate::seed::seed_demo;
use crate::Result;
use std::io::Write;
use tracing::info;

/// The open catalogue together with the file it is flushed to
#[derive(Debug)]
pub struct Session {
    pub catalogue: Catalogue,
    pub file: CatalogueFile,
}

impl Session {
    /// Load the configured data file, seeding demo books into an empty one
    pub fn open(settings: &Settings, out: &mut dyn Write) -> Result<Self> {
        let file = CatalogueFile::new(&settings.data_file);
        let mut session = Self {
            catalogue: file.load()?,
            file,
        };

        if settings.seed_demo && seed_demo(&mut session.catalogue)? {
            session.persist()?;
            info!("Seeded demo books");
            writeln!(out, "Demo books added.")?;
        }

        Ok(session)
    }

    /// Session over an in-memory catalogue
    pub fn new(catalogue: Catalogue, file: CatalogueFile) -> Self {
        Self { catalogue, file }
    }

    pub fn persist(&self) -> Result<()> {
        self.file.save(&self.catalogue)
    }
}

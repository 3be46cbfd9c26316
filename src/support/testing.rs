//! Bootstrap helpers for test suites built around persistence-layer models.

use std::io;
use std::path::Path;
use tempfile::TempDir;
use tracing::{Level, event};

/// Collection name for an entity type: first character lower-cased, the rest unchanged.
pub fn collection_name_for(entity_type: &str) -> String {
    let mut chars = entity_type.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// [`collection_name_for`] applied to the last path segment of `T`'s name.
pub fn collection_name_of<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    collection_name_for(short)
}

/// An ephemeral local database that lives between `start_up` and `shut_down`.
///
/// The data directory is a temporary directory removed on shutdown or drop.
#[derive(Debug, Default)]
pub struct TestDatabase {
    dir: Option<TempDir>,
}

impl TestDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_up(&mut self) -> io::Result<()> {
        if self.dir.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "test database is already running",
            ));
        }
        let dir = tempfile::Builder::new()
            .prefix("rustbean-testdb-")
            .tempdir()?;
        event!(Level::DEBUG, path = %dir.path().display(), "test database started");
        self.dir = Some(dir);
        Ok(())
    }

    pub fn shut_down(&mut self) -> io::Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        let path = dir.path().to_path_buf();
        dir.close()?;
        event!(Level::DEBUG, path = %path.display(), "test database stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.dir.is_some()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Directory for one entity type's collection.
    pub fn collection_path<T: ?Sized>(&self) -> Option<std::path::PathBuf> {
        self.data_dir().map(|dir| dir.join(collection_name_of::<T>()))
    }
}

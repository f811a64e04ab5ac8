use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::{SessionStore, User};

/// Stores the user as a single JSON file. A missing file means nobody is signed in.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    user: Option<User>,
}

impl JsonFileStore {
    /// Open the store, loading the saved user if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let user = match fs::read_to_string(&path) {
            Ok(contents) => Some(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        if user.is_some() {
            log::info!("restored session user from {}", path.display());
        }
        Ok(Self { path, user })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, user: &User) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn set_user(&mut self, user: User) -> Result<(), StoreError> {
        self.write(&user)?;
        self.user = Some(user);
        Ok(())
    }

    fn clear_user(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.user = None;
        Ok(())
    }
}

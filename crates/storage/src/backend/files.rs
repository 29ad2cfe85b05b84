#![forbid(unsafe_code)]

use super::Backend;
use crate::StoreError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = ".json";

/// One `<key>.json` file per collection.
///
/// Values are written to a hidden sibling and renamed over the target, so a
/// reader sees either the previous file or the new one.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        log::info!("opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}{EXTENSION}")))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidInput("storage key must not be empty"));
    }
    if key.len() > 128 {
        return Err(StoreError::InvalidInput("storage key is too long"));
    }
    if key.starts_with('.') {
        return Err(StoreError::InvalidInput(
            "storage key must not start with '.'",
        ));
    }
    if !key
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
    {
        return Err(StoreError::InvalidInput(
            "storage key may only contain [A-Za-z0-9_.-]",
        ));
    }
    Ok(())
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let target = self.path_for(key)?;
        let staging = self.dir.join(format!(".{key}{EXTENSION}.tmp"));
        let staged = fs::File::create(&staging).and_then(|mut file| {
            file.write_all(value.as_bytes())?;
            file.sync_all()
        });
        if let Err(err) = staged.and_then(|()| fs::rename(&staging, &target)) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(key) = name.strip_suffix(EXTENSION) {
                out.push(key.to_string());
            }
        }
        out.sort();
        Ok(out)
    }
}

// trolley/src/storage/file.rs

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{event, instrument, Level};

use super::{validate_key, KeyValueStorage};
use crate::error::{CartError, CartResult};

/// Directory-backed storage: one `<key>.json` file per key.
///
/// The directory is created lazily on the first write. Writes land in a
/// uniquely named temporary sibling which is then renamed over the target, so a
/// crash mid-write leaves the previous value readable and concurrent writers
/// resolve to last-write-wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> CartResult<PathBuf> {
    validate_key(key)?;
    Ok(self.dir.join(format!("{}.json", key)))
  }

  fn io_err(key: &str, source: std::io::Error) -> CartError {
    CartError::Storage {
      key: key.to_string(),
      source,
    }
  }
}

impl KeyValueStorage for FileStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(Self::io_err(key, e)),
    }
  }

  #[instrument(name = "FileStorage::set", skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    let path = self.path_for(key)?;
    fs::create_dir_all(&self.dir).map_err(|e| Self::io_err(key, e))?;

    // Each write gets its own temporary file, so concurrent writers to one key
    // never rename each other's partial output into place.
    let mut tmp = tempfile::Builder::new()
      .prefix(&format!(".{}.", key))
      .suffix(".json.tmp")
      .tempfile_in(&self.dir)
      .map_err(|e| Self::io_err(key, e))?;
    tmp.write_all(value.as_bytes()).map_err(|e| Self::io_err(key, e))?;
    tmp.as_file().sync_all().map_err(|e| Self::io_err(key, e))?;
    tmp.persist(&path).map_err(|e| Self::io_err(key, e.error))?;
    event!(Level::TRACE, path = %path.display(), "Value written.");
    Ok(())
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    let path = self.path_for(key)?;
    match fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(Self::io_err(key, e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::thread;

  fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  #[test]
  fn creates_directory_on_first_write() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path().join("nested").join("state"));
    assert_eq!(storage.get("cart").unwrap(), None);

    storage.set("cart", "[1,2]").unwrap();
    assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1,2]"));
    assert!(storage.dir().join("cart.json").exists());
    assert_eq!(entries(storage.dir()), vec!["cart.json".to_string()]);
  }

  #[test]
  fn overwrite_and_remove() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path());
    storage.set("cart", "old").unwrap();
    storage.set("cart", "new").unwrap();
    assert_eq!(storage.get("cart").unwrap().as_deref(), Some("new"));
    storage.remove("cart").unwrap();
    storage.remove("cart").unwrap();
    assert_eq!(storage.get("cart").unwrap(), None);
  }

  #[test]
  fn rejects_path_like_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path());
    assert!(matches!(storage.set("../escape", "x"), Err(CartError::InvalidKey { .. })));
  }

  #[test]
  fn concurrent_writers_to_one_key_leave_a_whole_value() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(tmp.path());
    let values: Vec<String> = (0..8).map(|n| format!("[{}]", vec![n.to_string(); 20_000].join(","))).collect();

    let handles: Vec<_> = values
      .iter()
      .cloned()
      .map(|value| {
        let storage = storage.clone();
        thread::spawn(move || {
          for _ in 0..5 {
            storage.set("cart", &value).unwrap();
          }
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }

    let stored = storage.get("cart").unwrap().unwrap();
    assert!(values.contains(&stored), "stored value is a mix of writers");
    assert_eq!(entries(storage.dir()), vec!["cart.json".to_string()]);
  }
}

//! JSON snapshot of every record collection, written atomically.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Category, Person, Transaction};
use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// All record collections held by the bundled record source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, or an empty one when the file does not exist yet.
    pub fn load(&self) -> Result<FinanceSnapshot> {
        if !self.path.exists() {
            return Ok(FinanceSnapshot::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let snapshot: FinanceSnapshot = serde_json::from_str(&data)?;
        info!(
            path = %self.path.display(),
            categories = snapshot.categories.len(),
            people = snapshot.people.len(),
            transactions = snapshot.transactions.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &FinanceSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Purpose;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty_snapshot() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonSnapshotStore::new(temp.path().join("finance.json"));
        assert_eq!(store.load().expect("load"), FinanceSnapshot::default());
    }

    #[test]
    fn save_then_load_keeps_records_and_removes_tmp() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("finance.json");
        let store = JsonSnapshotStore::new(&path);
        let snapshot = FinanceSnapshot {
            categories: vec![Category::new(1, "Rent", Purpose::Expense)],
            people: vec![Person::new(1, "Ana", 31)],
            transactions: Vec::new(),
        };
        store.save(&snapshot).expect("save");
        assert!(!tmp_path(&path).exists());
        assert_eq!(store.load().expect("load"), snapshot);
    }
}

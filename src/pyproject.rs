//! Format-preserving access to version fields inside a `pyproject.toml`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use toml_edit::{DocumentMut, Item, Table, TableLike};
use tracing::{debug, info};

use crate::domain::Version;
use crate::error::{Result, VersionBumperError};

/// A `pyproject.toml` held as an editable document.
///
/// Comments, ordering and formatting of untouched entries survive a
/// load/save cycle.
#[derive(Debug, Clone)]
pub struct PyProject {
    path: PathBuf,
    doc: DocumentMut,
}

impl PyProject {
    /// Read and parse the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(path, &text)
    }

    /// Parse `text` as the document that lives at `path`.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self> {
        Ok(PyProject {
            path: path.into(),
            doc: text.parse::<DocumentMut>()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a string by dotted key path (e.g. `tool.poetry.version`).
    ///
    /// Returns `None` when any key along the path is missing or the final
    /// value is not a string.
    pub fn get_string(&self, key_path: &str) -> Option<&str> {
        let mut item = self.doc.as_item();
        for key in key_path.split('.') {
            item = item.get(key)?;
        }
        item.as_str()
    }

    /// Store a string at a dotted key path, creating missing tables.
    pub fn set_string(&mut self, key_path: &str, value: &str) -> Result<()> {
        let keys: Vec<&str> = key_path.split('.').collect();
        let Some((last, parents)) = keys.split_last() else {
            return Err(VersionBumperError::document("empty key path"));
        };
        if keys.iter().any(|key| key.is_empty()) {
            return Err(VersionBumperError::document(format!(
                "invalid key path `{key_path}`"
            )));
        }

        let mut table: &mut dyn TableLike = self.doc.as_table_mut();
        for key in parents {
            table = table
                .entry(key)
                .or_insert_with(implicit)
                .as_table_like_mut()
                .ok_or_else(|| {
                    VersionBumperError::document(format!(
                        "`{key}` in `{key_path}` is not a table"
                    ))
                })?;
        }
        table.insert(last, toml_edit::value(value));
        debug!(key_path, value, "set document field");
        Ok(())
    }

    /// Parse the version stored at `key_path`, if there is one.
    pub fn load_version(&self, key_path: &str) -> Result<Option<Version>> {
        self.get_string(key_path).map(Version::parse).transpose()
    }

    /// Store the canonical rendering of `version` at `key_path`.
    pub fn set_version(&mut self, key_path: &str, version: &Version) -> Result<()> {
        self.set_string(key_path, &version.to_string())
    }

    /// Write the document back to its path.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the original, so readers never see a partial file.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(self.doc.to_string().as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        info!(path = %self.path.display(), "saved pyproject");
        Ok(())
    }
}

impl std::fmt::Display for PyProject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.doc)
    }
}

fn implicit() -> Item {
    let mut table = Table::new();
    table.set_implicit(true);
    Item::Table(table)
}

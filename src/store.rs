//! Snippet store
//!
//! Owns the ordered snippet collection and keeps `snippets.json` in sync with
//! it. The whole list is rewritten after every mutation; there is no
//! incremental persistence and no in-memory-only mode.
//!
//! The store assumes a single writer. Two processes pointed at the same file
//! will overwrite each other's changes (last writer wins).

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const SNIPPETS_FILE: &str = "snippets.json";

/// A stored title/content pair. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Content", alias = "content")]
    pub content: String,
}

impl Snippet {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Case-insensitive containment over title or content. `needle` must
    /// already be folded with [`fold_case`].
    fn matches_folded(&self, needle: &str) -> bool {
        fold_case(&self.content).contains(needle) || fold_case(&self.title).contains(needle)
    }
}

/// Lowercase every char on its own. Unlike `str::to_lowercase` this ignores
/// context (e.g. Greek final sigma), so a needle folds the same way as the
/// text around it.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

#[derive(Debug)]
pub struct SnippetStore {
    path: PathBuf,
    snippets: Vec<Snippet>,
}

impl SnippetStore {
    /// Load the store backed by `path`.
    ///
    /// A missing or blank file yields an empty store. A file that does not
    /// hold a JSON array of snippets is reported as [`StoreError::Corrupt`].
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snippets = read_snippets(&path)?;
        tracing::debug!(path = %path.display(), count = snippets.len(), "loaded snippets");
        Ok(Self { path, snippets })
    }

    /// Like [`SnippetStore::load`], but a corrupt file is moved aside to
    /// `<name>.corrupt` and the store starts empty.
    ///
    /// If the file cannot be moved, the original [`StoreError::Corrupt`] is
    /// returned and the file is left in place.
    pub fn load_or_backup(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        match Self::load(path.clone()) {
            Err(StoreError::Corrupt { path, source }) => {
                let backup = path.with_extension("corrupt");
                tracing::warn!(
                    "snippet file {} is corrupt ({source}); moving it to {}",
                    path.display(),
                    backup.display()
                );
                if let Err(e) = fs::rename(&path, &backup) {
                    tracing::error!(
                        "failed to back up corrupt snippet file to {}: {e}",
                        backup.display()
                    );
                    return Err(StoreError::Corrupt { path, source });
                }
                Ok(Self {
                    path,
                    snippets: Vec::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All snippets in insertion order.
    pub fn list(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Snippets whose title or content contains `text`, ignoring case, in
    /// collection order.
    ///
    /// `text` must not be blank. Empty or whitespace-only input is not a
    /// valid search; callers route it to [`SnippetStore::list`].
    pub fn search(&self, text: &str) -> Vec<&Snippet> {
        let needle = fold_case(text);
        self.snippets
            .iter()
            .filter(|s| s.matches_folded(&needle))
            .collect()
    }

    /// Whether any snippet's content is exactly `text` (case-sensitive).
    pub fn has_exact_content_match(&self, text: &str) -> bool {
        self.snippets.iter().any(|s| s.content == text)
    }

    /// Append `snippet` and persist.
    ///
    /// On a write failure the snippet stays in memory; the next successful
    /// write brings the file back in line.
    pub fn add(&mut self, snippet: Snippet) -> StoreResult<()> {
        tracing::debug!(title = %snippet.title, "adding snippet");
        self.snippets.push(snippet);
        self.save()
    }

    /// Remove the first snippet equal to `snippet` and persist.
    ///
    /// Returns `Ok(false)` without touching the file when nothing matches.
    pub fn remove(&mut self, snippet: &Snippet) -> StoreResult<bool> {
        let Some(pos) = self.snippets.iter().position(|s| s == snippet) else {
            tracing::debug!(title = %snippet.title, "snippet to remove not found");
            return Ok(false);
        };
        self.snippets.remove(pos);
        self.save()?;
        Ok(true)
    }

    /// Write the full collection to the backing file.
    pub fn save(&self) -> StoreResult<()> {
        let persist_err = |source| StoreError::Persist {
            path: self.path.clone(),
            source,
        };
        let json = serde_json::to_vec_pretty(&self.snippets)
            .map_err(|e| persist_err(io::Error::from(e)))?;
        atomic_write(&self.path, &json).map_err(persist_err)
    }
}

fn read_snippets(path: &Path) -> StoreResult<Vec<Snippet>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn serializes_with_canonical_field_names() {
        let json = serde_json::to_string(&Snippet::new("email", "me@example.com")).unwrap();
        assert_eq!(json, r#"{"Title":"email","Content":"me@example.com"}"#);
    }

    #[test]
    fn accepts_lowercase_field_names() {
        let s: Snippet = serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(s, Snippet::new("t", "c"));
    }

    #[test]
    fn missing_title_defaults_to_empty() {
        let s: Snippet = serde_json::from_str(r#"{"Content":"c"}"#).unwrap();
        assert_eq!(s.title, "");
    }

    #[test]
    fn fold_case_ignores_final_sigma_context() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("Σ"), "σ");
        assert_eq!(fold_case("ABC"), "abc");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(SNIPPETS_FILE);
        let mut store = SnippetStore::load(&path).unwrap();
        store.add(Snippet::new("a", "b")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SNIPPETS_FILE);
        let mut store = SnippetStore::load(&path).unwrap();
        store.add(Snippet::new("a", "b")).unwrap();
        store.add(Snippet::new("c", "d")).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}

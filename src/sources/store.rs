//! On-disk citation store.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{BibEntry, Fetch};

/// Citations, one `{book_id}.bib` file per book.
///
/// Missing citations are fetched (when a fetcher is set) and written to disk.
/// Books without a citation are remembered, so that a book is looked up at
/// most once per run.
pub struct BibStore {
    dir: PathBuf,
    fetcher: Option<Box<dyn Fetch>>,
    cache: HashMap<u32, Option<BibEntry>>,
}

impl BibStore {
    /// Store reading from `dir` only.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            fetcher: None,
            cache: HashMap::new(),
        }
    }

    /// Store fetching missing citations with `fetcher`.
    pub fn with_fetcher(dir: &Path, fetcher: Box<dyn Fetch>) -> Self {
        Self {
            fetcher: Some(fetcher),
            ..Self::new(dir)
        }
    }

    fn path(&self, book_id: u32) -> PathBuf {
        self.dir.join(format!("{}.bib", book_id))
    }

    /// Get the citation of `book_id`, if there is one.
    pub fn get(&mut self, book_id: u32) -> Option<&BibEntry> {
        if !self.cache.contains_key(&book_id) {
            let entry = self.resolve(book_id);
            self.cache.insert(book_id, entry);
        }

        self.cache.get(&book_id).and_then(Option::as_ref)
    }

    /// Get an already resolved citation, without any lookup.
    pub fn cached(&self, book_id: u32) -> Option<&BibEntry> {
        self.cache.get(&book_id).and_then(Option::as_ref)
    }

    fn resolve(&self, book_id: u32) -> Option<BibEntry> {
        let path = self.path(book_id);
        if path.exists() {
            return match std::fs::read_to_string(&path) {
                Ok(raw) => Some(BibEntry::new(book_id, &raw)),
                Err(e) => {
                    warn!("could not read {:?}: {}", path, e);
                    None
                }
            };
        }

        let fetcher = match &self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                debug!("book {}: no citation at {:?}", book_id, path);
                return None;
            }
        };

        match fetcher.fetch(book_id) {
            Ok(Some(raw)) => {
                let entry = BibEntry::new(book_id, &raw);
                info!("book {}: fetched citation", book_id);
                if let Err(e) = self.save(&entry) {
                    warn!("book {}: could not save citation: {:?}", book_id, e);
                }
                Some(entry)
            }
            Ok(None) => {
                info!("book {}: no citation found", book_id);
                None
            }
            Err(e) => {
                warn!("book {}: fetching citation failed: {}", book_id, e);
                None
            }
        }
    }

    fn save(&self, entry: &BibEntry) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(entry.book_id()), entry.text())
    }
}

//! BibTeX entries of the books examples come from.
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENTRY_KEY: Regex = Regex::new(r"^(\s*@\w+\s*\{)[^,]*,").unwrap();
    static ref DOI_FIELD: Regex = Regex::new(r"(?i)^\s*doi\s*=").unwrap();
    static ref NAME_FIELD: Regex = Regex::new(r"(?i)^\s*(author|editor)\s*=").unwrap();
    static ref AMPERSAND: Regex = Regex::new(r"\s+\\?&\s+").unwrap();
}

/// A normalized citation, keyed by book identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    book_id: u32,
    text: String,
}

impl BibEntry {
    /// Normalizes `raw` into an entry for `book_id`:
    /// - the entry key becomes the book id,
    /// - only the first `doi` field is kept,
    /// - `&` between names in `author` and `editor` fields becomes `and`.
    pub fn new(book_id: u32, raw: &str) -> Self {
        let rekeyed = ENTRY_KEY.replace(raw.trim(), |caps: &regex::Captures| {
            format!("{}{},", &caps[1], book_id)
        });

        let mut seen_doi = false;
        let text = rekeyed
            .lines()
            .filter(|line| {
                if DOI_FIELD.is_match(line) {
                    if seen_doi {
                        return false;
                    }
                    seen_doi = true;
                }
                true
            })
            .map(|line| {
                if NAME_FIELD.is_match(line) {
                    AMPERSAND.replace_all(line, " and ").into_owned()
                } else {
                    line.to_string()
                }
            })
            .join("\n");

        Self { book_id, text }
    }

    pub fn book_id(&self) -> u32 {
        self.book_id
    }

    /// Citation key, used in the `Source` column of examples.
    pub fn key(&self) -> String {
        self.book_id.to_string()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

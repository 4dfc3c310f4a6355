//! Extracted example records.
use std::collections::HashMap;

use serde::Deserialize;

/// One glossed example, as extracted from a book.
///
/// ```json
/// {
///     "ID": "7-629279",
///     "bookID": 118,
///     "book_title": "A grammar of Moloko",
///     "language_glottocode": "molo1266",
///     "language_name": "Moloko",
///     "srcwordsbare": ["[à-mbaɗ=aŋ]", "\\hspace{5pt}", "[=aka=alaj]"],
///     "imtwordsbare": ["{3}S+{PFV}-change={3}S.{\\IO}", "\\hspace{5pt}", "=on=away"],
///     "trs": "He/she replied.’ (lit. he changed on away)"
/// }
/// ```
///
/// Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExampleRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "bookID")]
    pub book_id: u32,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub language_glottocode: Option<String>,
    #[serde(default)]
    pub language_name: Option<String>,
    #[serde(rename = "srcwordsbare", default)]
    pub words: Vec<String>,
    #[serde(rename = "imtwordsbare", default)]
    pub glosses: Vec<String>,
    #[serde(rename = "trs", default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub abbrkey: Option<HashMap<String, String>>,
    #[serde(default)]
    pub meta_language_glottocode: Option<String>,
    #[serde(default)]
    pub meta_language_name: Option<String>,
}

impl ExampleRecord {
    /// Dataset-wide identifier: `{book_id}-{id}`, with periods replaced by underscores.
    pub fn derived_id(&self) -> String {
        format!("{}-{}", self.book_id, self.id).replace('.', "_")
    }
}

/*! Language table

Languages are created the first time they are seen in a run,
either as the language of an example or as the meta-language of a book.
!*/
mod glottolog;

use std::collections::HashMap;

use log::debug;

pub use glottolog::{Glottolog, LanguageLookup, Languoid};

/// Language identifier for examples without a glottocode.
pub const UNDEFINED: &str = "undefined";

/// Glottocode and name of the meta-language used when a record does not specify one.
pub const DEFAULT_META_LANGUAGE: (&str, &str) = ("stan1293", "English");

/// A language of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub glottocode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `true` if at least one example is in this language.
    pub object: bool,
    pub example_count: u64,
}

impl Language {
    fn new(id: &str, name: Option<&str>, lookup: &impl LanguageLookup) -> Self {
        let glottocode = (id != UNDEFINED).then(|| id.to_string());
        let languoid = glottocode.as_deref().and_then(|gc| lookup.lookup(gc));

        let name = languoid
            .map(|l| l.name.clone())
            .or_else(|| name.filter(|n| !n.trim().is_empty()).map(String::from))
            .unwrap_or_else(|| id.to_string());

        Self {
            id: id.to_string(),
            name,
            glottocode,
            latitude: languoid.and_then(|l| l.latitude),
            longitude: languoid.and_then(|l| l.longitude),
            object: false,
            example_count: 0,
        }
    }

    /// Kind of the language, as written in the table.
    pub fn kind(&self) -> &'static str {
        if self.object {
            "object-language"
        } else {
            "meta-language"
        }
    }

    /// Natural logarithm of the example count, floored at 1 example.
    pub fn example_count_log(&self) -> f64 {
        (self.example_count.max(1) as f64).ln()
    }
}

/// Languages of a run, in order of first appearance.
#[derive(Debug, Default)]
pub struct LanguageTable {
    languages: Vec<Language>,
    index: HashMap<String, usize>,
}

/// Turns an empty or missing glottocode into [UNDEFINED].
pub fn language_id(glottocode: Option<&str>) -> &str {
    match glottocode.map(str::trim) {
        Some(gc) if !gc.is_empty() => gc,
        _ => UNDEFINED,
    }
}

impl LanguageTable {
    fn resolve(&mut self, id: &str, name: Option<&str>, lookup: &impl LanguageLookup) -> usize {
        if let Some(idx) = self.index.get(id) {
            return *idx;
        }

        let language = Language::new(id, name, lookup);
        debug!("new language {} ({})", language.id, language.name);
        self.languages.push(language);
        self.index.insert(id.to_string(), self.languages.len() - 1);
        self.languages.len() - 1
    }

    /// Resolves the language of an example, creating it if needed. Returns its id.
    pub fn resolve_object(
        &mut self,
        glottocode: Option<&str>,
        name: Option<&str>,
        lookup: &impl LanguageLookup,
    ) -> String {
        let idx = self.resolve(language_id(glottocode), name, lookup);
        let language = &mut self.languages[idx];
        language.object = true;
        language.id.clone()
    }

    /// Resolves a meta-language, creating it if needed. Returns its id.
    pub fn resolve_meta(
        &mut self,
        glottocode: Option<&str>,
        name: Option<&str>,
        lookup: &impl LanguageLookup,
    ) -> String {
        let (glottocode, name) = match glottocode.map(str::trim) {
            Some(gc) if !gc.is_empty() => (gc, name),
            _ => (DEFAULT_META_LANGUAGE.0, Some(DEFAULT_META_LANGUAGE.1)),
        };
        let idx = self.resolve(glottocode, name, lookup);
        self.languages[idx].id.clone()
    }

    /// Adds an example to the count of language `id`.
    pub fn add_example(&mut self, id: &str) {
        if let Some(idx) = self.index.get(id) {
            self.languages[*idx].example_count += 1;
        }
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.index.get(id).map(|idx| &self.languages[*idx])
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }
}

//! Gloss abbreviations.
use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;
use regex::Regex;

use crate::lgr::MORPHEME_SEPARATORS;

lazy_static! {
    static ref SC_GROUP: Regex = Regex::new(r"^\{\\sc\s+([^{}]+)\}$").unwrap();
    static ref TEXTSC: Regex = Regex::new(r"^\\textsc\{([^{}]+)\}$").unwrap();
    static ref MACRO_GROUP: Regex = Regex::new(r"^\{\\([^{}\s]+)\}$").unwrap();
    static ref EMPTY_ARG_MACRO: Regex = Regex::new(r"^\\([^{}\s\\]+)\{\}$").unwrap();
    static ref GROUP: Regex = Regex::new(r"^\{([^{}]+)\}$").unwrap();
}

/// Characters splitting a gloss morpheme into grammatical categories.
const CATEGORY_SEPARATORS: [char; 10] = ['.', ':', ';', '_', '>', '<', '\\', '/', '+', ','];

/// Normalizes an abbreviation key.
///
/// `{\sc pfv}`, `\textsc{pfv}`, `{\pfv}`, `\pfv{}` and `{pfv}` all become `PFV`.
/// Keys that are not made of uppercase letters only after normalization are rejected.
pub fn clean_abbr(key: &str) -> Option<String> {
    let mut key = key.trim();

    for re in [&*SC_GROUP, &*TEXTSC, &*MACRO_GROUP, &*EMPTY_ARG_MACRO, &*GROUP] {
        if let Some(inner) = re.captures(key).and_then(|caps| caps.get(1)) {
            key = inner.as_str().trim();
        }
    }

    let key = key.to_uppercase();
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_uppercase()) {
        Some(key)
    } else {
        None
    }
}

/// Normalizes every key of an abbreviation dictionary, dropping invalid keys and empty meanings.
pub fn normalize_abbreviations(dict: &HashMap<String, String>) -> HashMap<String, String> {
    dict.iter()
        .filter_map(|(key, meaning)| {
            let meaning = meaning.trim();
            if meaning.is_empty() {
                return None;
            }
            clean_abbr(key).map(|key| (key, meaning.to_string()))
        })
        .collect()
}

/// Splits a category like `3SG` into `3` and `SG`.
fn split_category(category: &str, out: &mut BTreeSet<String>) {
    let rest = category.trim_start_matches(|c: char| matches!(c, '1' | '2' | '3'));
    let persons = &category[..category.len() - rest.len()];

    if !rest.is_empty() && !rest.chars().all(|c| c.is_ascii_uppercase()) {
        return;
    }

    out.extend(persons.chars().map(String::from));
    if !rest.is_empty() {
        out.insert(rest.to_string());
    }
}

/// Abbreviations used in a gloss word.
pub fn gloss_abbreviations(gloss_word: &str) -> BTreeSet<String> {
    let mut abbrs = BTreeSet::new();

    gloss_word
        .split(MORPHEME_SEPARATORS)
        .flat_map(|morpheme| morpheme.split(CATEGORY_SEPARATORS))
        .map(|category| category.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|category| !category.is_empty())
        .for_each(|category| split_category(category, &mut abbrs));

    abbrs
}

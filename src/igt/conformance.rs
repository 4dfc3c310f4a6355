//! Leipzig Glossing Rules conformance.
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::lgr::{self, MORPHEME_SEPARATORS};

use super::abbr::{gloss_abbreviations, normalize_abbreviations};

/// How strictly a gloss aligns with its primary text.
///
/// Levels are ordered by strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LgrConformance {
    Unaligned = 0,
    WordAligned = 1,
    MorphemeAligned = 2,
}

impl LgrConformance {
    pub fn as_str(&self) -> &'static str {
        match self {
            LgrConformance::Unaligned => "UNALIGNED",
            LgrConformance::WordAligned => "WORD_ALIGNED",
            LgrConformance::MorphemeAligned => "MORPHEME_ALIGNED",
        }
    }
}

impl fmt::Display for LgrConformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interlinear glossed text, split into words.
#[derive(Debug)]
pub struct Igt<'a> {
    phrase: Vec<&'a str>,
    gloss: Vec<&'a str>,
}

#[inline]
fn morpheme_count(word: &str) -> usize {
    word.split(MORPHEME_SEPARATORS).count()
}

impl<'a> Igt<'a> {
    pub fn new(phrase: &'a str, gloss: &'a str) -> Self {
        Self {
            phrase: phrase.split_whitespace().collect(),
            gloss: gloss.split_whitespace().collect(),
        }
    }

    /// Computes the conformance level.
    ///
    /// A differing number of words, or of morphemes in any aligned word pair,
    /// leaves the example unaligned. Aligned examples are morpheme-aligned
    /// as soon as the gloss is segmented, word-aligned otherwise.
    pub fn conformance(&self) -> LgrConformance {
        if self.phrase.len() != self.gloss.len() {
            return LgrConformance::Unaligned;
        }

        let aligned = self
            .phrase
            .iter()
            .zip(&self.gloss)
            .all(|(word, gloss)| morpheme_count(word) == morpheme_count(gloss));
        if !aligned {
            return LgrConformance::Unaligned;
        }

        if self.gloss.iter().any(|gloss| gloss.contains(MORPHEME_SEPARATORS)) {
            LgrConformance::MorphemeAligned
        } else {
            LgrConformance::WordAligned
        }
    }

    /// Maps the abbreviations used in the gloss to their meaning.
    ///
    /// Meanings are looked up in `dict` first, then in the standard LGR list.
    /// Abbreviations found in neither are left out.
    pub fn abbreviations(&self, dict: Option<&HashMap<String, String>>) -> BTreeMap<String, String> {
        let dict = dict.map(normalize_abbreviations).unwrap_or_default();

        self.gloss
            .iter()
            .flat_map(|word| gloss_abbreviations(word))
            .filter_map(|abbr| {
                let meaning = dict
                    .get(&abbr)
                    .cloned()
                    .or_else(|| lgr::meaning(&abbr).map(String::from))?;
                Some((abbr, meaning))
            })
            .collect()
    }
}

/// Result of [classify].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub level: LgrConformance,
    /// Only filled for morpheme-aligned examples.
    pub abbreviations: BTreeMap<String, String>,
}

/// Classifies an example, computing abbreviations for morpheme-aligned ones.
pub fn classify(
    phrase: &str,
    gloss: &str,
    dict: Option<&HashMap<String, String>>,
) -> Classification {
    let igt = Igt::new(phrase, gloss);
    let level = igt.conformance();
    let abbreviations = if level == LgrConformance::MorphemeAligned {
        igt.abbreviations(dict)
    } else {
        BTreeMap::new()
    };

    Classification {
        level,
        abbreviations,
    }
}

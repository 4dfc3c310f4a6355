//! Leipzig Glossing Rules configuration.
//!
//! Holds the abbreviation set used when cleaning TeX glosses, the standard
//! meanings of LGR abbreviations and the characters that delimit morphemes.
use std::collections::HashMap;

use lazy_static::lazy_static;

/// Marker for an element that is not realized on the surface.
pub const NON_OVERT_ELEMENT: &str = "∅";

/// Characters that glue a token to its neighbours when recombining words.
pub const BOUNDARY_MARKERS: [char; 2] = ['-', '='];

/// Characters splitting a word into morphemes.
pub const MORPHEME_SEPARATORS: [char; 3] = ['-', '=', '~'];

/// Standard abbreviations of the Leipzig Glossing Rules, with their meaning.
pub const STANDARD: &[(&str, &str)] = &[
    ("1", "first person"),
    ("2", "second person"),
    ("3", "third person"),
    ("A", "agent-like argument of canonical transitive verb"),
    ("ABL", "ablative"),
    ("ABS", "absolutive"),
    ("ACC", "accusative"),
    ("ADJ", "adjective"),
    ("ADV", "adverb(ial)"),
    ("AGR", "agreement"),
    ("ALL", "allative"),
    ("ANTIP", "antipassive"),
    ("APPL", "applicative"),
    ("ART", "article"),
    ("AUX", "auxiliary"),
    ("BEN", "benefactive"),
    ("CAUS", "causative"),
    ("CLF", "classifier"),
    ("COM", "comitative"),
    ("COMP", "complementizer"),
    ("COMPL", "completive"),
    ("COND", "conditional"),
    ("COP", "copula"),
    ("CVB", "converb"),
    ("DAT", "dative"),
    ("DECL", "declarative"),
    ("DEF", "definite"),
    ("DEM", "demonstrative"),
    ("DET", "determiner"),
    ("DIST", "distal"),
    ("DISTR", "distributive"),
    ("DU", "dual"),
    ("DUR", "durative"),
    ("ERG", "ergative"),
    ("EXCL", "exclusive"),
    ("F", "feminine"),
    ("FOC", "focus"),
    ("FUT", "future"),
    ("GEN", "genitive"),
    ("IMP", "imperative"),
    ("INCL", "inclusive"),
    ("IND", "indicative"),
    ("INDF", "indefinite"),
    ("INF", "infinitive"),
    ("INS", "instrumental"),
    ("INTR", "intransitive"),
    ("IPFV", "imperfective"),
    ("IRR", "irrealis"),
    ("LOC", "locative"),
    ("M", "masculine"),
    ("N", "neuter"),
    ("N-", "non- (e.g. NSG nonsingular, NPST nonpast)"),
    ("NEG", "negation, negative"),
    ("NMLZ", "nominalizer/nominalization"),
    ("NOM", "nominative"),
    ("OBJ", "object"),
    ("OBL", "oblique"),
    ("P", "patient-like argument of canonical transitive verb"),
    ("PASS", "passive"),
    ("PFV", "perfective"),
    ("PL", "plural"),
    ("POSS", "possessive"),
    ("PRED", "predicative"),
    ("PRF", "perfect"),
    ("PRS", "present"),
    ("PROG", "progressive"),
    ("PROH", "prohibitive"),
    ("PROX", "proximal/proximate"),
    ("PST", "past"),
    ("PTCP", "participle"),
    ("PURP", "purposive"),
    ("Q", "question particle/marker"),
    ("QUOT", "quotative"),
    ("RECP", "reciprocal"),
    ("REFL", "reflexive"),
    ("REL", "relative"),
    ("RES", "resultative"),
    ("S", "single argument of canonical intransitive verb"),
    ("SBJ", "subject"),
    ("SBJV", "subjunctive"),
    ("SG", "singular"),
    ("TOP", "topic"),
    ("TR", "transitive"),
    ("VOC", "vocative"),
];

/// Abbreviations found in the books that are not part of the standard set.
pub const EXTRA: &[&str] = &["CONJ", "R", "RETRO", "LINK", "IFV", "DEP", "EXT", "ID"];

lazy_static! {
    /// Every abbreviation the cleaner knows how to unwrap, in declaration order.
    pub static ref ABBRS: Vec<&'static str> = STANDARD
        .iter()
        .map(|(abbr, _)| *abbr)
        .chain(EXTRA.iter().copied())
        .collect();

    /// Standard meanings, keyed by abbreviation.
    pub static ref MEANINGS: HashMap<&'static str, &'static str> = STANDARD.iter().copied().collect();
}

/// Standard meaning of `abbr`, if it is an LGR abbreviation.
pub fn meaning(abbr: &str) -> Option<&'static str> {
    MEANINGS.get(abbr).copied()
}

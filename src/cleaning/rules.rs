//! Rewrite rules.
//!
//! Each rule is a total function over strings. Rules are applied in the order
//! they are added to a [Cleaner], and earlier rules may produce text that later
//! ones match, so the default order matters.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::lgr;

use super::TexCounter;

/// A single pure rewrite over a TeX token.
pub trait Rewrite {
    fn rewrite(&self, tex: &str) -> String;
}

lazy_static! {
    /// `{\ABBR}`, `{\abbr}`, `{\Abbr}`.
    static ref ABBR_BRACED: Regex = Regex::new(&format!(r"\{{\\({})\}}", abbr_alternation())).unwrap();
    /// `\ABBR{}`, `\abbr{}`, `\Abbr{}`.
    static ref ABBR_MACRO: Regex = Regex::new(&format!(r"\\({})\{{\}}", abbr_alternation())).unwrap();
    static ref UPPER_BRACED: Regex = Regex::new(r"\{([A-Z]+)\}").unwrap();
    static ref GLOSS_ARG: Regex = Regex::new(r"\\gloss\{([a-z0-9.:-]+)\}").unwrap();
    static ref GLOSS_SUFFIX: Regex = Regex::new(r"\\gloss([A-Z]+)\{\}").unwrap();
    static ref HSPACE: Regex = Regex::new(r"\\hspace\{[^}]+\}").unwrap();
    static ref EMPHASIS: Regex = Regex::new(r"\\(emph|stem|bf|textbf|textit)\{([^}]+)\}").unwrap();
    static ref TEXTSC: Regex = Regex::new(r"\\textsc\{([^}]+)\}").unwrap();
    static ref SC_GROUP: Regex = Regex::new(r"\{\\sc\s+([^}]+)\}").unwrap();
}

/// Every case variant of every abbreviation, as a regex alternation.
fn abbr_alternation() -> String {
    let mut variants: Vec<String> = Vec::with_capacity(lgr::ABBRS.len() * 3);
    for abbr in lgr::ABBRS.iter() {
        for variant in [abbr.to_string(), abbr.to_lowercase(), capitalize(abbr)] {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }
    variants
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn upper_group(caps: &Captures, idx: usize) -> String {
    caps[idx].to_uppercase()
}

/// Abbreviation macros, whatever their case or brace style, become the bare uppercase abbreviation.
pub struct AbbreviationMacros;

impl Rewrite for AbbreviationMacros {
    fn rewrite(&self, tex: &str) -> String {
        let tex = ABBR_BRACED.replace_all(tex, |caps: &Captures| upper_group(caps, 1));
        ABBR_MACRO
            .replace_all(&tex, |caps: &Captures| upper_group(caps, 1))
            .into_owned()
    }
}

/// Strips `{...}` around uppercase runs.
pub struct UppercaseGroups;

impl Rewrite for UppercaseGroups {
    fn rewrite(&self, tex: &str) -> String {
        UPPER_BRACED.replace_all(tex, "$1").into_owned()
    }
}

/// `\gloss{cl.3sg}` and `\glossACC{}`.
pub struct GlossMacros;

impl Rewrite for GlossMacros {
    fn rewrite(&self, tex: &str) -> String {
        let tex = GLOSS_ARG.replace_all(tex, |caps: &Captures| upper_group(caps, 1));
        GLOSS_SUFFIX.replace_all(&tex, "$1").into_owned()
    }
}

/// Empty set symbols become the non-overt element marker.
pub struct EmptySet;

impl Rewrite for EmptySet {
    fn rewrite(&self, tex: &str) -> String {
        tex.replace("$\\emptyset$", lgr::NON_OVERT_ELEMENT)
            .replace("\\(ø\\)", lgr::NON_OVERT_ELEMENT)
    }
}

pub struct Spacing;

impl Rewrite for Spacing {
    fn rewrite(&self, tex: &str) -> String {
        HSPACE.replace_all(tex, "").into_owned()
    }
}

/// Unwraps font macros. Small caps content is uppercased.
pub struct FontMacros;

impl Rewrite for FontMacros {
    fn rewrite(&self, tex: &str) -> String {
        let tex = EMPHASIS.replace_all(tex, "$2");
        let tex = TEXTSC.replace_all(&tex, |caps: &Captures| upper_group(caps, 1));
        SC_GROUP
            .replace_all(&tex, |caps: &Captures| upper_group(caps, 1))
            .into_owned()
    }
}

/// One-off macro to glyph replacements, applied in order.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("\\gscACC", "ACC"),
    ("\\redp{}", "~"),
    ("\\textasciitilde{}", "~"),
    ("\\textasciitilde", "~"),
    ("\\~{}", "~"),
    ("\\ra{}", "→"),
    ("\\rightarrow{}", "→"),
    ("\\rightarrow", "→"),
    ("\\textrightarrow{}", "→"),
    ("\\textrightarrow", "→"),
    ("\\textless{}", "<"),
    ("\\textless", "<"),
    ("\\textgreater{}", ">"),
    ("\\textgreater", ">"),
    ("$<$", "<"),
    ("$>$", ">"),
    ("\\Fsg{}", "1SG"),
    ("\\Ssg{}", "2SG"),
    ("\\Tsg{}", "3SG"),
    ("\\Fpl{}", "1PL"),
    ("\\Spl{}", "2PL"),
    ("\\Tpl{}", "3PL"),
    ("\\op{}", "("),
    ("\\cp{}", ")"),
    ("\\_", "_"),
    ("\\&", "&"),
    ("\\%", "%"),
];

pub struct Substitutions;

impl Rewrite for Substitutions {
    fn rewrite(&self, tex: &str) -> String {
        SUBSTITUTIONS
            .iter()
            .fold(Cow::Borrowed(tex), |acc, (from, to)| {
                if acc.contains(from) {
                    Cow::Owned(acc.replace(from, to))
                } else {
                    acc
                }
            })
            .into_owned()
    }
}

/// Cleaner enables rule chaining, running every rule over a token in one step.
pub struct Cleaner(Vec<Box<dyn Rewrite>>);

impl Cleaner {
    /// A cleaner without any rule.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, rule: Box<dyn Rewrite>) -> &mut Cleaner {
        self.0.push(rule);
        self
    }

    /// Runs the rules over `tex`.
    ///
    /// Tokens that still contain a backslash afterwards are counted in `counter`,
    /// and returned as is.
    pub fn clean(&self, tex: &str, counter: &mut TexCounter) -> String {
        let cleaned = self
            .0
            .iter()
            .fold(tex.to_string(), |acc, rule| rule.rewrite(&acc));

        if cleaned.contains('\\') {
            counter.add(&cleaned);
        }

        cleaned
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        let mut cleaner = Self::empty();
        cleaner
            .add(Box::new(AbbreviationMacros))
            .add(Box::new(UppercaseGroups))
            .add(Box::new(GlossMacros))
            .add(Box::new(EmptySet))
            .add(Box::new(Spacing))
            .add(Box::new(FontMacros))
            .add(Box::new(Substitutions));
        cleaner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_forms() {
        let rule = AbbreviationMacros;
        for tex in ["{\\PFV}", "{\\pfv}", "{\\Pfv}", "\\pfv{}", "\\Pfv{}", "\\PFV{}"] {
            assert_eq!(rule.rewrite(tex), "PFV", "{}", tex);
        }
    }

    #[test]
    fn abbreviation_all_known() {
        let rule = AbbreviationMacros;
        for abbr in lgr::ABBRS.iter() {
            let tex = format!("{{\\{}}}", abbr.to_lowercase());
            assert_eq!(rule.rewrite(&tex), abbr.to_uppercase());
        }
    }

    #[test]
    fn abbreviation_prefers_full_match() {
        let rule = AbbreviationMacros;
        assert_eq!(rule.rewrite("{3}S+{\\ipfv}-go"), "{3}S+IPFV-go");
        assert_eq!(rule.rewrite("{\\compl}"), "COMPL");
    }

    #[test]
    fn unknown_macro_untouched() {
        let rule = AbbreviationMacros;
        assert_eq!(rule.rewrite("{\\foo}"), "{\\foo}");
    }

    #[test]
    fn uppercase_groups() {
        assert_eq!(UppercaseGroups.rewrite("{3}S+{PFV}-change"), "{3}S+PFV-change");
        assert_eq!(UppercaseGroups.rewrite("{abc}"), "{abc}");
    }

    #[test]
    fn gloss_macros() {
        assert_eq!(GlossMacros.rewrite("\\gloss{cl.3sg}"), "CL.3SG");
        assert_eq!(GlossMacros.rewrite("\\glossACC{}"), "ACC");
        assert_eq!(GlossMacros.rewrite("\\gloss{Foo}"), "\\gloss{Foo}");
    }

    #[test]
    fn empty_set() {
        assert_eq!(EmptySet.rewrite("$\\emptyset$-go"), "∅-go");
        assert_eq!(EmptySet.rewrite("\\(ø\\)"), "∅");
    }

    #[test]
    fn spacing() {
        assert_eq!(Spacing.rewrite("\\hspace{5pt}"), "");
        assert_eq!(Spacing.rewrite("a\\hspace{1em}b"), "ab");
    }

    #[test]
    fn font_macros() {
        assert_eq!(FontMacros.rewrite("\\emph{house}"), "house");
        assert_eq!(FontMacros.rewrite("\\stem{go}-PST"), "go-PST");
        assert_eq!(FontMacros.rewrite("\\bf{a}"), "a");
        assert_eq!(FontMacros.rewrite("go-\\textsc{pst}"), "go-PST");
        assert_eq!(FontMacros.rewrite("{\\sc pfv}"), "PFV");
    }

    #[test]
    fn substitutions() {
        assert_eq!(Substitutions.rewrite("\\gscACC"), "ACC");
        assert_eq!(Substitutions.rewrite("ba\\redp{}ba"), "ba~ba");
        assert_eq!(Substitutions.rewrite("\\Tsg{}"), "3SG");
        assert_eq!(Substitutions.rewrite("a\\ra{}b"), "a→b");
        assert_eq!(Substitutions.rewrite("\\op{}x\\cp{}"), "(x)");
        assert_eq!(Substitutions.rewrite("plain"), "plain");
    }

    #[test]
    fn cleaner_chain() {
        let cleaner = Cleaner::default();
        let mut counter = TexCounter::default();
        assert_eq!(
            cleaner.clean("{3}S+{PFV}-change={3}S.{\\IO}", &mut counter),
            "{3}S+PFV-change={3}S.{\\IO}"
        );
        assert_eq!(counter.get("{3}S+PFV-change={3}S.{\\IO}"), 1);
    }

    #[test]
    fn cleaner_counts_only_leftover_tex() {
        let cleaner = Cleaner::default();
        let mut counter = TexCounter::default();
        assert_eq!(cleaner.clean("{\\sc pfv}", &mut counter), "PFV");
        assert_eq!(cleaner.clean("\\unknown{x}", &mut counter), "\\unknown{x}");
        assert_eq!(cleaner.clean("\\unknown{x}", &mut counter), "\\unknown{x}");
        assert_eq!(counter.len(), 1);
        assert_eq!(counter.get("\\unknown{x}"), 2);
    }

    #[test]
    fn empty_cleaner() {
        let cleaner = Cleaner::empty();
        let mut counter = TexCounter::default();
        assert_eq!(cleaner.clean("{\\pfv}", &mut counter), "{\\pfv}");
    }
}

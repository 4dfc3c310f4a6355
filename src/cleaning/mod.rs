/*! TeX cleaning

Turns the TeX encoded tokens extracted from books into plain text.

Tokens go through a [Cleaner] (an ordered list of [Rewrite] rules), then are
recombined into word forms by [Recombine].
!*/
mod counter;
mod recombine;
mod rules;

pub use counter::TexCounter;
pub use recombine::{recombine, Recombine};
pub use rules::{
    AbbreviationMacros, Cleaner, EmptySet, FontMacros, GlossMacros, Rewrite, Spacing,
    Substitutions, UppercaseGroups, SUBSTITUTIONS,
};

/// Raw tokens that never carry content.
pub const SKIPPED_TOKENS: [&str; 3] = ["{}", "", "--"];

/// Cleans and recombines a list of raw tokens.
///
/// Cleaned tokens are split on whitespace, so that `\emph{big house}` yields two words.
/// The result never contains an empty string nor a string with whitespace.
pub fn clean_tokens<S: AsRef<str>>(
    tokens: &[S],
    cleaner: &Cleaner,
    counter: &mut TexCounter,
) -> Vec<String> {
    let cleaned: Vec<String> = tokens
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|token| !SKIPPED_TOKENS.contains(token))
        .flat_map(|token| {
            cleaner
                .clean(token, counter)
                .split_whitespace()
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect();

    recombine(cleaned).collect()
}

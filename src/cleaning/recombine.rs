//! Recombination of word forms split at morpheme boundaries.
//!
//! Extraction from typeset books sometimes cuts a word at a hyphen or an
//! equals sign:
//! ```text
//! [à-mbaɗ=  aŋ]
//! ```
//! Tokens starting with a boundary marker, or following a token that ends
//! with one, are glued back to the previous word:
//! ```text
//! [à-mbaɗ=aŋ]
//! ```
use crate::lgr::BOUNDARY_MARKERS;

/// Iterator adapter yielding recombined word forms.
///
/// Empty tokens are skipped.
pub struct Recombine<I> {
    tokens: I,
    chunk: Option<String>,
}

impl<I> Recombine<I> {
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            chunk: None,
        }
    }
}

#[inline]
fn starts_with_marker(token: &str) -> bool {
    token.starts_with(BOUNDARY_MARKERS)
}

#[inline]
fn ends_with_marker(chunk: &str) -> bool {
    chunk.ends_with(BOUNDARY_MARKERS)
}

impl<I> Iterator for Recombine<I>
where
    I: Iterator<Item = String>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for token in self.tokens.by_ref() {
            if token.is_empty() {
                continue;
            }

            let chunk = match self.chunk.take() {
                Some(chunk) => chunk,
                None => {
                    self.chunk = Some(token);
                    continue;
                }
            };

            if starts_with_marker(&token) || ends_with_marker(&chunk) {
                self.chunk = Some(chunk + &token);
            } else {
                self.chunk = Some(token);
                return Some(chunk);
            }
        }

        self.chunk.take()
    }
}

/// Recombines `tokens` lazily.
pub fn recombine<I>(tokens: I) -> Recombine<I::IntoIter>
where
    I: IntoIterator<Item = String>,
{
    Recombine::new(tokens.into_iter())
}

#[cfg(test)]
mod tests {
    use super::recombine;

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn joins_at_trailing_marker() {
        let words: Vec<String> = recombine(owned(&["[à-mbaɗ=", "aŋ]"])).collect();
        assert_eq!(words, vec!["[à-mbaɗ=aŋ]"]);
    }

    #[test]
    fn joins_at_leading_marker() {
        let words: Vec<String> = recombine(owned(&["Me-", "hu", "-u", "house"])).collect();
        assert_eq!(words, vec!["Me-hu-u", "house"]);
    }

    #[test]
    fn separate_words() {
        let words: Vec<String> = recombine(owned(&["a", "b", "=c", "d"])).collect();
        assert_eq!(words, vec!["a", "b=c", "d"]);
    }

    #[test]
    fn skips_empty_tokens() {
        let words: Vec<String> = recombine(owned(&["", "a-", "", "b", ""])).collect();
        assert_eq!(words, vec!["a-b"]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(recombine(owned(&["", ""])).count(), 0);
        assert_eq!(recombine(Vec::<String>::new()).count(), 0);
    }

    #[test]
    fn idempotent() {
        let inputs: [&[&str]; 3] = [
            &["[à-mbaɗ=", "aŋ]", "\u{2205}", "=on=away"],
            &["a", "-b", "c-", "d", "e"],
            &["x"],
        ];
        for input in inputs {
            let once: Vec<String> = recombine(owned(input)).collect();
            let twice: Vec<String> = recombine(once.clone()).collect();
            assert_eq!(once, twice);
        }
    }
}

//! TIPA to Unicode conversion.
//!
//! Rewrites `\ipa{...}` groups of TeX sources into `\UIPA{...}` groups,
//! translating TIPA sequences into Unicode IPA characters:
//!
//! ```text
//! the word \ipa{[tS@]} is...
//! the word \UIPA{[tʃə]} is...
//! ```
//!
//! Lines are scanned one character at a time. Inside a group, characters are
//! accumulated until they form a known TIPA sequence.
use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::path::Path;

use log::{debug, error};

use crate::error::Error;

/// Maximum length of a pending TIPA sequence before giving up on a group.
pub const MAX_LOOKAHEAD: usize = 25;

/// TIPA sequence to Unicode mapping.
#[derive(Debug, Default)]
pub struct TipaMapping(HashMap<String, String>);

impl TipaMapping {
    /// Loads a `tipa<TAB>unicode` file.
    ///
    /// Only the ends of each line are trimmed: a sequence may end with a space.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let mapping = Self::from_reader(std::fs::File::open(path)?)?;
        debug!("loaded {} TIPA sequences from {:?}", mapping.0.len(), path);
        Ok(mapping)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut mapping = HashMap::new();
        for record in rdr.records() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(tipa), Some(unicode)) if record.len() == 2 => {
                    mapping.insert(
                        tipa.trim_start().to_string(),
                        unicode.trim_end().to_string(),
                    );
                }
                _ => {
                    return Err(Error::Custom(format!(
                        "invalid TIPA mapping line: {:?}",
                        record
                    )))
                }
            }
        }

        // spacing is dropped inside groups, escaped spaces are kept.
        mapping.insert(" ".to_string(), String::new());
        mapping.insert("{}".to_string(), String::new());
        mapping.insert("\\ ".to_string(), "\\ ".to_string());

        Ok(Self(mapping))
    }

    pub fn get(&self, tipa: &str) -> Option<&str> {
        self.0.get(tipa).map(String::as_str)
    }
}

/// Prefix of `\ipa{` consumed so far, or inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Backslash,
    I,
    Ip,
    Ipa,
    Group,
}

impl State {
    /// State reached by consuming `c`, if `c` continues the `\ipa{` prefix.
    fn advance(self, c: char) -> Option<State> {
        match (self, c) {
            (State::Text, '\\') => Some(State::Backslash),
            (State::Backslash, 'i') => Some(State::I),
            (State::I, 'p') => Some(State::Ip),
            (State::Ip, 'a') => Some(State::Ipa),
            (State::Ipa, '{') => Some(State::Group),
            _ => None,
        }
    }
}

/// A converted line, along with the TIPA sequences that could not be interpreted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Converted {
    pub text: String,
    pub errors: Vec<String>,
}

/// Line converter.
pub struct Transcoder<'a> {
    mapping: &'a TipaMapping,
}

impl<'a> Transcoder<'a> {
    pub fn new(mapping: &'a TipaMapping) -> Self {
        Self { mapping }
    }

    /// Converts the `\ipa{}` groups of `line`.
    ///
    /// Groups containing an unknown sequence are left untouched.
    pub fn convert_line(&self, line: &str) -> Converted {
        let mut out = Converted::default();
        // raw text of the current candidate, emitted as is if conversion fails
        let mut raw = String::new();
        let mut unicode = String::new();
        let mut pending = String::new();
        let mut state = State::Text;

        for c in line.chars() {
            if state == State::Group {
                raw.push(c);
                if c == '}' && pending.is_empty() {
                    out.text.push_str(&unicode);
                    out.text.push('}');
                    raw.clear();
                    unicode.clear();
                    state = State::Text;
                    continue;
                }

                pending.push(c);
                if let Some(u) = self.mapping.get(&pending) {
                    unicode.push_str(u);
                    pending.clear();
                } else if pending.chars().count() > MAX_LOOKAHEAD {
                    error!("could not interpret TIPA string {:?}", pending);
                    out.errors.push(std::mem::take(&mut pending));
                    out.text.push_str(&raw);
                    raw.clear();
                    unicode.clear();
                    state = State::Text;
                }
                continue;
            }

            match state.advance(c) {
                Some(next) => {
                    raw.push(c);
                    if next == State::Group {
                        unicode.push_str("\\UIPA{");
                    }
                    state = next;
                }
                None => {
                    // not a group after all
                    out.text.push_str(&raw);
                    raw.clear();
                    state = match State::Text.advance(c) {
                        Some(next) => {
                            raw.push(c);
                            next
                        }
                        None => {
                            out.text.push(c);
                            State::Text
                        }
                    };
                }
            }
        }

        if state == State::Group {
            error!("unterminated TIPA group {:?}", raw);
            out.errors.push(raw.clone());
        }
        out.text.push_str(&raw);

        out
    }
}

/// Converts every line of `reader`, calling `emit` with each converted line.
pub fn convert<R: BufRead>(
    reader: R,
    mapping: &TipaMapping,
    mut emit: impl FnMut(&str) -> Result<(), Error>,
) -> Result<usize, Error> {
    let transcoder = Transcoder::new(mapping);
    let mut nb_errors = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let converted = transcoder.convert_line(line.trim());
        for e in &converted.errors {
            debug!("line {}: {:?}", idx + 1, e);
        }
        nb_errors += converted.errors.len();
        emit(&converted.text)?;
    }

    Ok(nb_errors)
}

//! Citation fetching from the publisher catalog.
use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use reqwest::Url;

use crate::error::Error;

const BASE_URL: &str = "https://langsci-press.org/catalog/book/";

lazy_static! {
    static ref CLIPBOARD: Regex = Regex::new(r#"data-clipboard-text="([^"]*)""#).unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);").unwrap();
}

/// Source of raw BibTeX citations.
pub trait Fetch {
    /// Fetches the citation of `book_id`. `Ok(None)` means the book has no citation.
    fn fetch(&self, book_id: u32) -> Result<Option<String>, Error>;
}

/// Fetches citations from the catalog page of each book.
pub struct Catalog {
    base: Url,
    client: reqwest::blocking::Client,
}

impl Catalog {
    pub fn new() -> Result<Self, Error> {
        Self::with_base(BASE_URL)
    }

    /// Use a custom catalog location. `base` must end with a `/`.
    pub fn with_base(base: &str) -> Result<Self, Error> {
        Ok(Self {
            base: Url::parse(base)?,
            client: reqwest::blocking::Client::new(),
        })
    }

    fn url(&self, book_id: u32) -> Result<Url, Error> {
        Ok(self.base.join(&book_id.to_string())?)
    }
}

impl Fetch for Catalog {
    fn fetch(&self, book_id: u32) -> Result<Option<String>, Error> {
        let url = self.url(book_id)?;
        debug!("fetching {}", url);

        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            debug!("book {}: got status {}", book_id, response.status());
            return Ok(None);
        }

        let html = response.text()?;
        Ok(scrape_citation(&html))
    }
}

/// Decodes a numeric character reference body (`233` or `xE9`).
fn decode_numeric(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse().ok()?,
    };
    char::from_u32(code)
}

/// Unescapes the HTML entities found in attribute values.
///
/// `&amp;` is decoded last so that escaped references stay literal.
fn unescape(value: &str) -> String {
    let value = value
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");

    NUMERIC_ENTITY
        .replace_all(&value, |caps: &Captures| match decode_numeric(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .replace("&amp;", "&")
}

/// Extracts the BibTeX payload of the "copy citation" control of a catalog page.
pub fn scrape_citation(html: &str) -> Option<String> {
    CLIPBOARD
        .captures_iter(html)
        .map(|caps| unescape(&caps[1]))
        .map(|citation| citation.trim().to_string())
        .find(|citation| citation.starts_with('@'))
}

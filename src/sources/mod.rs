/*! Bibliographic sources

Every example cites the book it was extracted from.
Citations are read from a local store of BibTeX files, and fetched from the
publisher catalog when missing.
!*/
mod bibtex;
mod catalog;
mod store;

pub use bibtex::BibEntry;
pub use catalog::{scrape_citation, Catalog, Fetch};
pub use store::BibStore;

/*! Interlinear glossed text

Conformance of examples with the Leipzig Glossing Rules, and abbreviation handling.
!*/
pub mod abbr;
mod conformance;

pub use abbr::clean_abbr;
pub use conformance::{classify, Classification, Igt, LgrConformance};

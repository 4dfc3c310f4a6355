//! IGT dataset generation
//!
//! Examples are extracted from books into batches of JSON records.
//! Each batch is read in turn, and each record goes through the following steps:
//!
//! 1. Records from books without a citation are dropped (the book is unpublished or superseded).
//! 1. Words and glosses are cleaned from their TeX markup, then recombined.
//!    Records without words and glosses are dropped.
//! 1. The language and the meta-language are added to the language table.
//! 1. Records whose identifier has already been seen are dropped.
//! 1. The example is classified against the Leipzig Glossing Rules and written.
//!
//! Once all batches are done, the language table, the citations and the table
//! descriptions are written.
mod record;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::cleaning::{clean_tokens, Cleaner, TexCounter};
use crate::error::Error;
use crate::igt::{classify, LgrConformance};
use crate::io::{self, ExampleRow, ExampleWriter, LIST_SEPARATOR};
use crate::languages::{Glottolog, LanguageTable};
use crate::sources::BibStore;

pub use record::ExampleRecord;

/// Number of unhandled TeX tokens reported by default.
pub const DEFAULT_TEX_REPORT: usize = 80;

/// Run-scoped accumulation state.
#[derive(Debug, Default)]
pub struct RunContext {
    pub tex: TexCounter,
    pub seen: HashSet<String>,
    pub languages: LanguageTable,
    /// Books cited by at least one written example.
    pub books: BTreeSet<u32>,
    pub summary: Summary,
}

/// Counts of what happened to the records of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub examples: usize,
    pub unpublished: usize,
    pub empty: usize,
    pub duplicates: usize,
}

/// A cleaned and classified example.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedExample {
    pub id: String,
    pub language_id: String,
    pub meta_language_id: String,
    pub words: Vec<String>,
    pub glosses: Vec<String>,
    pub primary_text: String,
    pub translation: String,
    pub level: LgrConformance,
    pub abbreviations: BTreeMap<String, String>,
    pub sources: Vec<String>,
}

impl NormalizedExample {
    /// Builds the table row.
    ///
    /// Words and glosses are only written for aligned examples,
    /// abbreviations only for morpheme-aligned ones.
    pub fn to_row(&self) -> Result<ExampleRow, Error> {
        let aligned = self.level > LgrConformance::Unaligned;
        let abbreviations =
            if self.level == LgrConformance::MorphemeAligned && !self.abbreviations.is_empty() {
                serde_json::to_string(&self.abbreviations)?
            } else {
                String::new()
            };

        Ok(ExampleRow {
            id: self.id.clone(),
            language_id: self.language_id.clone(),
            meta_language_id: self.meta_language_id.clone(),
            primary_text: self.primary_text.clone(),
            analyzed_word: if aligned {
                self.words.join(LIST_SEPARATOR)
            } else {
                String::new()
            },
            gloss: if aligned {
                self.glosses.join(LIST_SEPARATOR)
            } else {
                String::new()
            },
            translated_text: self.translation.clone(),
            lgr_conformance_level: self.level.as_str(),
            abbreviations,
            source: self.sources.join(";"),
        })
    }
}

pub struct Dataset {
    src: PathBuf,
    dst: PathBuf,
    bibs: BibStore,
    glottolog: Glottolog,
    cleaner: Cleaner,
    tex_report: usize,
}

impl Dataset {
    pub fn new(src: PathBuf, dst: PathBuf, bibs: BibStore, glottolog: Glottolog) -> Self {
        debug!("dataset from {:?} to {:?}", src, dst);
        Self {
            src,
            dst,
            bibs,
            glottolog,
            cleaner: Cleaner::default(),
            tex_report: DEFAULT_TEX_REPORT,
        }
    }

    /// Set the number of unhandled TeX tokens reported at the end of the run.
    pub fn with_tex_report(mut self, tex_report: usize) -> Self {
        self.tex_report = tex_report;
        self
    }

    /// Normalizes a record.
    ///
    /// Returns `Ok(None)` for records that are skipped, and an error if
    /// only one of words and glosses is empty after cleaning.
    pub fn process_record(
        &mut self,
        path: &Path,
        record: &ExampleRecord,
        ctx: &mut RunContext,
    ) -> Result<Option<NormalizedExample>, Error> {
        ctx.summary.records += 1;

        let source = match self.bibs.get(record.book_id) {
            Some(entry) => entry.key(),
            None => {
                debug!("{}: book {} has no citation", record.id, record.book_id);
                ctx.summary.unpublished += 1;
                return Ok(None);
            }
        };

        let words = clean_tokens(&record.words, &self.cleaner, &mut ctx.tex);
        let glosses = clean_tokens(&record.glosses, &self.cleaner, &mut ctx.tex);
        match (words.is_empty(), glosses.is_empty()) {
            (true, true) => {
                debug!("{}: no words nor glosses", record.id);
                ctx.summary.empty += 1;
                return Ok(None);
            }
            (true, false) | (false, true) => {
                return Err(Error::Invariant {
                    path: path.to_path_buf(),
                    id: record.id.clone(),
                    reason: format!(
                        "words ({:?}) and glosses ({:?}) must be both empty or both non-empty",
                        words, glosses
                    ),
                });
            }
            (false, false) => (),
        }

        let language_id = ctx.languages.resolve_object(
            record.language_glottocode.as_deref(),
            record.language_name.as_deref(),
            &self.glottolog,
        );
        let meta_language_id = ctx.languages.resolve_meta(
            record.meta_language_glottocode.as_deref(),
            record.meta_language_name.as_deref(),
            &self.glottolog,
        );

        let id = record.derived_id();
        if !ctx.seen.insert(id.clone()) {
            warn!("{:?}: skipping duplicate example {}", path, id);
            ctx.summary.duplicates += 1;
            return Ok(None);
        }

        let primary_text = words.join(" ");
        let classification = classify(
            &primary_text,
            &glosses.join(" "),
            record.abbrkey.as_ref(),
        );

        ctx.languages.add_example(&language_id);
        ctx.books.insert(record.book_id);
        ctx.summary.examples += 1;

        Ok(Some(NormalizedExample {
            id,
            language_id,
            meta_language_id,
            words,
            glosses,
            primary_text,
            translation: record.translation.clone().unwrap_or_default(),
            level: classification.level,
            abbreviations: classification.abbreviations,
            sources: vec![source],
        }))
    }

    fn write_examples(
        &mut self,
        paths: &[PathBuf],
        examples: &mut ExampleWriter,
        ctx: &mut RunContext,
    ) -> Result<(), Error> {
        for path in paths {
            let records = io::read_batch(path)?;
            info!("{:?}: {} records", path, records.len());

            for record in &records {
                if let Some(example) = self.process_record(path, record, ctx)? {
                    examples.write(&example.to_row()?)?;
                }
            }
        }
        Ok(())
    }

    /// Runs the whole conversion, writing tables into the destination folder.
    ///
    /// The example table is only put in place once every other table is written,
    /// so that a failed run leaves no example table behind.
    pub fn run(mut self) -> Result<Summary, Error> {
        let paths = io::batch_paths(&self.src)?;
        std::fs::create_dir_all(&self.dst)?;

        let mut ctx = RunContext::default();
        let mut examples = ExampleWriter::new(&self.dst)?;

        if let Err(e) = self.write_examples(&paths, &mut examples, &mut ctx) {
            examples.abort();
            return Err(e);
        }

        let tables = io::write_languages(&self.dst, ctx.languages.iter())
            .and_then(|_| {
                io::write_sources(
                    &self.dst,
                    ctx.books.iter().filter_map(|id| self.bibs.cached(*id)),
                )
            })
            .and_then(|_| io::write_metadata(&self.dst));
        if let Err(e) = tables {
            examples.abort();
            return Err(e);
        }
        examples.finish()?;

        for (tex, count) in ctx.tex.most_common(self.tex_report) {
            info!("unhandled TeX ({} times): {}", count, tex);
        }

        let summary = ctx.summary;
        info!(
            "{} records: {} examples, {} without citation, {} empty, {} duplicates",
            summary.records, summary.examples, summary.unpublished, summary.empty, summary.duplicates
        );
        Ok(summary)
    }
}

/// Collects the identifiers of every book referenced in the batches of `src`.
pub fn book_ids(src: &Path) -> Result<BTreeSet<u32>, Error> {
    let mut ids = BTreeSet::new();
    for path in io::batch_paths(src)? {
        ids.extend(io::read_batch(&path)?.iter().map(|record| record.book_id));
    }
    debug!("books: {}", ids.iter().join(", "));
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, words: &[&str], glosses: &[&str]) -> ExampleRecord {
        ExampleRecord {
            id: id.to_string(),
            book_id: 118,
            book_title: None,
            language_glottocode: Some("molo1266".to_string()),
            language_name: Some("Moloko".to_string()),
            words: words.iter().map(|w| w.to_string()).collect(),
            glosses: glosses.iter().map(|g| g.to_string()).collect(),
            translation: Some("He/she replied.".to_string()),
            abbrkey: None,
            meta_language_glottocode: None,
            meta_language_name: None,
        }
    }

    fn dataset(bib_dir: &Path) -> Dataset {
        std::fs::write(bib_dir.join("118.bib"), "@book{key,\n title = {Moloko}\n}").unwrap();
        Dataset::new(
            PathBuf::from("src"),
            PathBuf::from("dst"),
            BibStore::new(bib_dir),
            Glottolog::default(),
        )
    }

    #[test]
    fn moloko_example() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let r = record(
            "7.629279",
            &["[à-mbaɗ=", "aŋ]", "\\hspace{5pt}", "[=aka=alaj]"],
            &["{3}S+{PFV}-change={3}S.{\\IO}", "\\hspace{5pt}", "=on=away"],
        );
        let example = ds
            .process_record(Path::new("a.json"), &r, &mut ctx)
            .unwrap()
            .unwrap();

        assert_eq!(example.id, "118-7_629279");
        assert_eq!(example.words, vec!["[à-mbaɗ=aŋ]", "[=aka=alaj]"]);
        assert_eq!(example.primary_text, "[à-mbaɗ=aŋ] [=aka=alaj]");
        assert_eq!(example.glosses.len(), 1);
        assert_eq!(example.level, LgrConformance::Unaligned);
        assert_eq!(example.sources, vec!["118"]);
        assert_eq!(example.meta_language_id, "stan1293");
        assert_eq!(ctx.tex.len(), 1);

        let row = example.to_row().unwrap();
        assert_eq!(row.analyzed_word, "");
        assert_eq!(row.gloss, "");
        assert_eq!(row.lgr_conformance_level, "UNALIGNED");
    }

    #[test]
    fn morpheme_aligned_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let r = record("1", &["ba-", "la", "ko"], &["{\\pfv}-go", "\\textsc{loc}"]);
        let example = ds
            .process_record(Path::new("a.json"), &r, &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(example.level, LgrConformance::MorphemeAligned);

        let row = example.to_row().unwrap();
        assert_eq!(row.analyzed_word, "ba-la\tko");
        assert_eq!(row.gloss, "PFV-go\tLOC");
        assert_eq!(
            row.abbreviations,
            r#"{"LOC":"locative","PFV":"perfective"}"#
        );
    }

    #[test]
    fn skips_unpublished_books() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let mut r = record("1", &["a"], &["b"]);
        r.book_id = 999;
        assert!(ds
            .process_record(Path::new("a.json"), &r, &mut ctx)
            .unwrap()
            .is_none());
        assert_eq!(ctx.summary.unpublished, 1);
        assert!(ctx.languages.is_empty());
    }

    #[test]
    fn skips_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let r = record("1", &["{}", "--"], &["\\hspace{1em}"]);
        assert!(ds
            .process_record(Path::new("a.json"), &r, &mut ctx)
            .unwrap()
            .is_none());
        assert_eq!(ctx.summary.empty, 1);
    }

    #[test]
    fn one_sided_record_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let r = record("3", &["word"], &["--"]);
        match ds.process_record(Path::new("b.json"), &r, &mut ctx) {
            Err(Error::Invariant { path, id, .. }) => {
                assert_eq!(path, PathBuf::from("b.json"));
                assert_eq!(id, "3");
            }
            other => panic!("expected invariant error, got {:?}", other),
        }
    }

    #[test]
    fn duplicates_keep_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut ds = dataset(dir.path());
        let mut ctx = RunContext::default();

        let first = record("7.629279", &["a"], &["b"]);
        let second = record("7.629279", &["c"], &["d"]);
        let kept = ds
            .process_record(Path::new("a.json"), &first, &mut ctx)
            .unwrap()
            .unwrap();
        assert_eq!(kept.primary_text, "a");
        assert!(ds
            .process_record(Path::new("b.json"), &second, &mut ctx)
            .unwrap()
            .is_none());
        assert_eq!(ctx.summary.duplicates, 1);
        assert_eq!(ctx.languages.get("molo1266").unwrap().example_count, 1);
    }
}

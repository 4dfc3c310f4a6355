//! Dataset table writers.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::json;

use crate::error::Error;
use crate::languages::Language;
use crate::sources::BibEntry;

pub const EXAMPLES_FILE: &str = "examples.csv";
pub const LANGUAGES_FILE: &str = "languages.csv";
pub const SOURCES_FILE: &str = "sources.bib";
pub const METADATA_FILE: &str = "metadata.json";

/// Separator of list valued example columns.
pub const LIST_SEPARATOR: &str = "\t";

/// Row of the example table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Meta_Language_ID")]
    pub meta_language_id: String,
    #[serde(rename = "Primary_Text")]
    pub primary_text: String,
    #[serde(rename = "Analyzed_Word")]
    pub analyzed_word: String,
    #[serde(rename = "Gloss")]
    pub gloss: String,
    #[serde(rename = "Translated_Text")]
    pub translated_text: String,
    #[serde(rename = "LGR_Conformance_Level")]
    pub lgr_conformance_level: &'static str,
    #[serde(rename = "Abbreviations")]
    pub abbreviations: String,
    #[serde(rename = "Source")]
    pub source: String,
}

/// Row of the language table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageRow<'a> {
    #[serde(rename = "ID")]
    pub id: &'a str,
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Glottocode")]
    pub glottocode: Option<&'a str>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Example_Count")]
    pub example_count: u64,
    #[serde(rename = "Example_Count_Log")]
    pub example_count_log: f64,
}

impl<'a> From<&'a Language> for LanguageRow<'a> {
    fn from(language: &'a Language) -> Self {
        Self {
            id: &language.id,
            name: &language.name,
            glottocode: language.glottocode.as_deref(),
            latitude: language.latitude,
            longitude: language.longitude,
            kind: language.kind(),
            example_count: language.example_count,
            example_count_log: language.example_count_log(),
        }
    }
}

/// Append-only writer of the example table.
///
/// Rows go to a temporary file, which only becomes the example table on [ExampleWriter::finish].
pub struct ExampleWriter {
    writer: csv::Writer<File>,
    tmp: PathBuf,
    path: PathBuf,
    nb_rows: usize,
}

impl ExampleWriter {
    pub fn new(dst: &Path) -> Result<Self, Error> {
        let tmp = dst.join(format!("{}.part", EXAMPLES_FILE));
        let writer = csv::Writer::from_path(&tmp)?;
        Ok(Self {
            writer,
            tmp,
            path: dst.join(EXAMPLES_FILE),
            nb_rows: 0,
        })
    }

    pub fn write(&mut self, row: &ExampleRow) -> Result<(), Error> {
        self.writer.serialize(row)?;
        self.nb_rows += 1;
        Ok(())
    }

    /// Flushes the table and moves it in place, returning the number of written rows.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.writer.flush()?;
        std::fs::rename(&self.tmp, &self.path)?;
        info!("wrote {} examples", self.nb_rows);
        Ok(self.nb_rows)
    }

    /// Discards the rows written so far.
    pub fn abort(self) {
        drop(self.writer);
        if let Err(e) = std::fs::remove_file(&self.tmp) {
            warn!("could not remove {:?}: {}", self.tmp, e);
        }
    }
}

/// Writes the language table.
pub fn write_languages<'a>(
    dst: &Path,
    languages: impl Iterator<Item = &'a Language>,
) -> Result<usize, Error> {
    let mut writer = csv::Writer::from_path(dst.join(LANGUAGES_FILE))?;
    let mut nb_rows = 0;
    for language in languages {
        writer.serialize(LanguageRow::from(language))?;
        nb_rows += 1;
    }
    writer.flush()?;
    info!("wrote {} languages", nb_rows);
    Ok(nb_rows)
}

/// Writes the citations of every source in a single BibTeX file.
pub fn write_sources<'a>(
    dst: &Path,
    entries: impl Iterator<Item = &'a BibEntry>,
) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(dst.join(SOURCES_FILE))?);
    for entry in entries {
        writeln!(out, "{}\n", entry.text())?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a CSVW description of the tables.
pub fn write_metadata(dst: &Path) -> Result<(), Error> {
    let string = |name: &str| json!({"name": name, "datatype": "string"});
    let list = |name: &str| json!({"name": name, "datatype": "string", "separator": LIST_SEPARATOR});

    let metadata = json!({
        "@context": "http://www.w3.org/ns/csvw",
        "dc:conformsTo": "http://cldf.clld.org/v1.0/terms.rdf#Generic",
        "dc:source": SOURCES_FILE,
        "tables": [
            {
                "url": LANGUAGES_FILE,
                "dc:conformsTo": "http://cldf.clld.org/v1.0/terms.rdf#LanguageTable",
                "tableSchema": {
                    "columns": [
                        string("ID"),
                        string("Name"),
                        string("Glottocode"),
                        {"name": "Latitude", "datatype": "decimal"},
                        {"name": "Longitude", "datatype": "decimal"},
                        {"name": "Type", "datatype": {"base": "string", "format": "object-language|meta-language"}},
                        {"name": "Example_Count", "datatype": "integer"},
                        {"name": "Example_Count_Log", "datatype": "decimal"},
                    ],
                    "primaryKey": ["ID"],
                },
            },
            {
                "url": EXAMPLES_FILE,
                "dc:conformsTo": "http://cldf.clld.org/v1.0/terms.rdf#ExampleTable",
                "tableSchema": {
                    "columns": [
                        string("ID"),
                        string("Language_ID"),
                        string("Meta_Language_ID"),
                        string("Primary_Text"),
                        list("Analyzed_Word"),
                        list("Gloss"),
                        string("Translated_Text"),
                        {"name": "LGR_Conformance_Level", "datatype": {"base": "string", "format": "UNALIGNED|WORD_ALIGNED|MORPHEME_ALIGNED"}},
                        {"name": "Abbreviations", "datatype": "json"},
                        {"name": "Source", "datatype": "string", "separator": ";"},
                    ],
                    "primaryKey": ["ID"],
                    "foreignKeys": [
                        {"columnReference": ["Language_ID"], "reference": {"resource": LANGUAGES_FILE, "columnReference": ["ID"]}},
                        {"columnReference": ["Meta_Language_ID"], "reference": {"resource": LANGUAGES_FILE, "columnReference": ["ID"]}},
                    ],
                },
            },
        ],
    });

    let out = BufWriter::new(File::create(dst.join(METADATA_FILE))?);
    serde_json::to_writer_pretty(out, &metadata)?;
    Ok(())
}

use std::path::Path;

use imtvault::dataset::{self, Dataset, Summary};
use imtvault::error::Error;
use imtvault::io::{EXAMPLES_FILE, LANGUAGES_FILE, METADATA_FILE, SOURCES_FILE};
use imtvault::languages::Glottolog;
use imtvault::sources::BibStore;
use serde_json::{json, Value};

fn write_batch(dir: &Path, name: &str, records: Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(&records).unwrap()).unwrap();
}

fn example(book_id: u32, id: &str, glottocode: Value, words: &[&str], glosses: &[&str]) -> Value {
    json!({
        "ID": id,
        "bookID": book_id,
        "book_title": "A grammar",
        "language_glottocode": glottocode,
        "language_name": "Moloko",
        "srcwordsbare": words,
        "imtwordsbare": glosses,
        "trs": "a translation",
        "wlength": words.len(),
    })
}

fn read_table(path: &Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(Result::unwrap).collect()
}

struct Workspace {
    _dir: tempfile::TempDir,
    src: std::path::PathBuf,
    dst: std::path::PathBuf,
    bib: std::path::PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("extracted_examples");
    let dst = dir.path().join("cldf");
    let bib = dir.path().join("bib");
    std::fs::create_dir(&src).unwrap();
    std::fs::create_dir(&bib).unwrap();
    std::fs::write(
        bib.join("118.bib"),
        "@book{Friesen2017,\n  author = {Friesen, Dianne & Doe, John},\n  title = {A grammar of Moloko},\n  doi = {10.5281/zenodo.824016},\n  doi = {10.5281/zenodo.824016},\n}",
    )
    .unwrap();

    Workspace {
        _dir: dir,
        src,
        dst,
        bib,
    }
}

#[test]
fn full_run() {
    let ws = workspace();
    write_batch(
        &ws.src,
        "a.json",
        json!([
            example(118, "7.629279", json!("molo1266"), &["ba-", "la", "ko"], &["{\\pfv}-go", "\\textsc{loc}"]),
            example(500, "1", json!("molo1266"), &["a"], &["b"]),
        ]),
    );
    write_batch(
        &ws.src,
        "b.json",
        json!([
            example(118, "7.629279", json!("molo1266"), &["x"], &["y"]),
            example(118, "8.1", Value::Null, &["a", "b"], &["1", "2"]),
            example(118, "9", json!("molo1266"), &["{}", "--"], &["\\hspace{5pt}"]),
        ]),
    );

    let glottolog = Glottolog::from_reader(
        "Glottocode,Name,Latitude,Longitude\nmolo1266,Moloko,10.83,14.17\n".as_bytes(),
    )
    .unwrap();
    let summary = Dataset::new(ws.src.clone(), ws.dst.clone(), BibStore::new(&ws.bib), glottolog)
        .run()
        .unwrap();

    assert_eq!(
        summary,
        Summary {
            records: 5,
            examples: 2,
            unpublished: 1,
            empty: 1,
            duplicates: 1,
        }
    );

    let examples = read_table(&ws.dst.join(EXAMPLES_FILE));
    assert_eq!(examples.len(), 2);

    assert_eq!(&examples[0][0], "118-7_629279");
    assert_eq!(&examples[0][1], "molo1266");
    assert_eq!(&examples[0][2], "stan1293");
    assert_eq!(&examples[0][3], "ba-la ko");
    assert_eq!(&examples[0][4], "ba-la\tko");
    assert_eq!(&examples[0][5], "PFV-go\tLOC");
    assert_eq!(&examples[0][7], "MORPHEME_ALIGNED");
    assert_eq!(&examples[0][8], r#"{"LOC":"locative","PFV":"perfective"}"#);
    assert_eq!(&examples[0][9], "118");

    assert_eq!(&examples[1][0], "118-8_1");
    assert_eq!(&examples[1][1], "undefined");
    assert_eq!(&examples[1][4], "a\tb");
    assert_eq!(&examples[1][7], "WORD_ALIGNED");
    assert_eq!(&examples[1][8], "");

    let languages = read_table(&ws.dst.join(LANGUAGES_FILE));
    let ids: Vec<&str> = languages.iter().map(|l| &l[0]).collect();
    assert_eq!(ids, vec!["molo1266", "stan1293", "undefined"]);

    assert_eq!(&languages[0][3], "10.83");
    assert_eq!(&languages[0][5], "object-language");
    assert_eq!(&languages[0][6], "1");
    assert_eq!(languages[0][7].parse::<f64>().unwrap(), 0.0);

    assert_eq!(&languages[1][1], "English");
    assert_eq!(&languages[1][5], "meta-language");
    assert_eq!(&languages[1][6], "0");
    assert_eq!(languages[1][7].parse::<f64>().unwrap(), 0.0);

    assert_eq!(&languages[2][2], "");

    let sources = std::fs::read_to_string(ws.dst.join(SOURCES_FILE)).unwrap();
    assert!(sources.starts_with("@book{118,"));
    assert!(sources.contains("Friesen, Dianne and Doe, John"));
    assert_eq!(sources.matches("doi =").count(), 1);

    assert!(ws.dst.join(METADATA_FILE).exists());
    assert_eq!(std::fs::read_dir(&ws.dst).unwrap().count(), 4);
}

#[test]
fn duplicates_across_files_keep_first() {
    let ws = workspace();
    write_batch(
        &ws.src,
        "1.json",
        json!([example(118, "7.629279", json!("molo1266"), &["first"], &["one"])]),
    );
    write_batch(
        &ws.src,
        "2.json",
        json!([example(118, "7_629279", json!("molo1266"), &["second"], &["two"])]),
    );

    let summary = Dataset::new(
        ws.src.clone(),
        ws.dst.clone(),
        BibStore::new(&ws.bib),
        Glottolog::default(),
    )
    .run()
    .unwrap();
    assert_eq!(summary.duplicates, 1);

    let examples = read_table(&ws.dst.join(EXAMPLES_FILE));
    assert_eq!(examples.len(), 1);
    assert_eq!(&examples[0][0], "118-7_629279");
    assert_eq!(&examples[0][3], "first");
}

#[test_log::test]
fn one_sided_record_aborts() {
    let ws = workspace();
    write_batch(
        &ws.src,
        "a.json",
        json!([example(118, "1", json!("molo1266"), &["a"], &["b"])]),
    );
    write_batch(
        &ws.src,
        "bad.json",
        json!([example(118, "3", json!("molo1266"), &["word"], &["--", "{}"])]),
    );

    let result = Dataset::new(
        ws.src.clone(),
        ws.dst.clone(),
        BibStore::new(&ws.bib),
        Glottolog::default(),
    )
    .run();

    match result {
        Err(Error::Invariant { path, id, .. }) => {
            assert!(path.ends_with("bad.json"));
            assert_eq!(id, "3");
        }
        other => panic!("expected invariant error, got {:?}", other),
    }

    assert!(!ws.dst.join(EXAMPLES_FILE).exists());
    assert!(!ws.dst.join(LANGUAGES_FILE).exists());
    assert_eq!(std::fs::read_dir(&ws.dst).unwrap().count(), 0);
}

#[test]
fn missing_source_folder() {
    let ws = workspace();
    let result = Dataset::new(
        ws.src.join("svdkjljlkmjlmdsfljkf"),
        ws.dst.clone(),
        BibStore::new(&ws.bib),
        Glottolog::default(),
    )
    .run();
    assert!(result.is_err());
}

#[test]
fn book_ids() {
    let ws = workspace();
    write_batch(
        &ws.src,
        "a.json",
        json!([
            example(118, "1", json!("molo1266"), &["a"], &["b"]),
            example(7, "1", json!("molo1266"), &["a"], &["b"]),
            example(118, "2", json!("molo1266"), &["a"], &["b"]),
        ]),
    );

    let ids: Vec<u32> = dataset::book_ids(&ws.src).unwrap().into_iter().collect();
    assert_eq!(ids, vec![7, 118]);
}

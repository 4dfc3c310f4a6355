//! # IMTVault
//!
//! Builds a cross-linguistic dataset of interlinear glossed text
//! from examples extracted from linguistics books.
//!
//! ## Getting started
//!
//! ```sh
//! imtvault 0.1.0
//! IGT dataset generation tool.
//!
//! USAGE:
//!     imtvault <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     bib         Fetch the citations of the books examples come from
//!     help        Prints this message or the help of the given subcommand(s)
//!     makecldf    Build the dataset from extracted examples
//!     tipa        Convert TIPA groups of a TeX file to Unicode
//! ```
//!
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use imtvault::dataset::{self, Dataset};
use imtvault::error::Error;
use imtvault::languages::Glottolog;
use imtvault::sources::{BibStore, Catalog};
use imtvault::tipa::{self, TipaMapping};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Imtvault::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Imtvault::Makecldf(m) => {
            let bibs = if m.offline {
                BibStore::new(&m.bib_dir)
            } else {
                BibStore::with_fetcher(&m.bib_dir, Box::new(Catalog::new()?))
            };
            let glottolog = match &m.glottolog {
                Some(path) => Glottolog::from_path(path)?,
                None => {
                    warn!("No glottolog file specified! Languages will have no coordinates.");
                    Glottolog::default()
                }
            };

            let ds = Dataset::new(m.src, m.dst, bibs, glottolog).with_tex_report(m.tex_report);
            ds.run()?;
        }

        cli::Imtvault::Bib(b) => {
            let mut bibs = BibStore::with_fetcher(&b.bib_dir, Box::new(Catalog::new()?));
            let books = dataset::book_ids(&b.src)?;
            let missing: Vec<u32> = books
                .iter()
                .copied()
                .filter(|id| bibs.get(*id).is_none())
                .collect();

            info!("{}/{} books have a citation", books.len() - missing.len(), books.len());
            for id in missing {
                warn!("no citation for book {}", id);
            }
        }

        cli::Imtvault::Tipa(t) => {
            let mapping = TipaMapping::from_path(&t.mapping)?;
            let reader = BufReader::new(File::open(&t.src)?);
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());

            let nb_errors = tipa::convert(reader, &mapping, |line| Ok(writeln!(out, "{}", line)?))?;
            out.flush()?;
            if nb_errors > 0 {
                error!("{:?}: {} TIPA strings could not be interpreted", t.src, nb_errors);
            }
        }
    };
    Ok(())
}

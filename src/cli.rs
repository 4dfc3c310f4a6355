//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "imtvault", about = "IGT dataset generation tool.")]
/// Holds every command that is callable by the `imtvault` command.
pub enum Imtvault {
    #[structopt(about = "Build the dataset from extracted examples")]
    Makecldf(Makecldf),
    #[structopt(about = "Fetch the citations of the books examples come from")]
    Bib(Bib),
    #[structopt(about = "Convert TIPA groups of a TeX file to Unicode")]
    Tipa(Tipa),
}

#[derive(Debug, StructOpt)]
/// Dataset generation command and parameters.
///
/// ```sh
/// imtvault-makecldf 0.1.0
/// Build the dataset from extracted examples
///
/// USAGE:
///     imtvault makecldf [FLAGS] [OPTIONS] <src> <dst>
///
/// FLAGS:
///         --offline    do not fetch missing citations
///
/// OPTIONS:
///         --bib-dir <bib-dir>          citation store [default: raw/bib]
///         --glottolog <glottolog>      glottolog languages csv
///         --tex-report <tex-report>    number of unhandled TeX tokens to report [default: 80]
///
/// ARGS:
///     <src>    extracted examples (contains *.json)
///     <dst>    dataset destination
/// ```
pub struct Makecldf {
    #[structopt(parse(from_os_str), help = "extracted examples (contains *.json)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "dataset destination")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "bib-dir",
        help = "citation store",
        default_value = "raw/bib"
    )]
    pub bib_dir: PathBuf,
    #[structopt(parse(from_os_str), long = "glottolog", help = "glottolog languages csv")]
    pub glottolog: Option<PathBuf>,
    #[structopt(long = "offline", help = "do not fetch missing citations")]
    pub offline: bool,
    #[structopt(
        long = "tex-report",
        help = "number of unhandled TeX tokens to report",
        default_value = "80"
    )]
    pub tex_report: usize,
}

#[derive(Debug, StructOpt)]
pub struct Bib {
    #[structopt(parse(from_os_str), help = "extracted examples (contains *.json)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "citation store")]
    pub bib_dir: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Tipa {
    #[structopt(parse(from_os_str), help = "TIPA to Unicode mapping (tsv)")]
    pub mapping: PathBuf,
    #[structopt(parse(from_os_str), help = "TeX file to convert")]
    pub src: PathBuf,
}

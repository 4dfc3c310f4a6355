/*! IO

Reading of extracted example batches, and writing of the dataset tables.
!*/
mod reader;
mod writer;

pub use reader::{batch_paths, read_batch};
pub use writer::{
    write_languages, write_metadata, write_sources, ExampleRow, ExampleWriter, LanguageRow,
    EXAMPLES_FILE, LANGUAGES_FILE, LIST_SEPARATOR, METADATA_FILE, SOURCES_FILE,
};

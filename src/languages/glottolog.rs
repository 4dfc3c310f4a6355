//! Glottocode based language metadata lookup.
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::Error;

/// Metadata about a single languoid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Languoid {
    #[serde(rename = "Glottocode")]
    pub glottocode: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

/// Resolves glottocodes to language metadata.
pub trait LanguageLookup {
    fn lookup(&self, glottocode: &str) -> Option<&Languoid>;
}

/// In-memory Glottolog catalog, loaded from a CSV file
/// with (at least) `Glottocode`, `Name`, `Latitude` and `Longitude` columns.
#[derive(Debug, Default)]
pub struct Glottolog {
    languoids: HashMap<String, Languoid>,
}

impl Glottolog {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("loading languoids from {:?}", path);
        let file = std::fs::File::open(path)?;
        let glottolog = Self::from_reader(file)?;
        info!("loaded {} languoids from {:?}", glottolog.len(), path);
        Ok(glottolog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut languoids = HashMap::new();
        for languoid in rdr.deserialize() {
            let languoid: Languoid = languoid?;
            languoids.insert(languoid.glottocode.clone(), languoid);
        }

        Ok(Self { languoids })
    }

    pub fn len(&self) -> usize {
        self.languoids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languoids.is_empty()
    }
}

impl LanguageLookup for Glottolog {
    fn lookup(&self, glottocode: &str) -> Option<&Languoid> {
        self.languoids.get(glottocode)
    }
}

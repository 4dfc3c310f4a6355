pub mod cleaning;
pub mod dataset;
pub mod error;
pub mod igt;
pub mod io;
pub mod languages;
pub mod lgr;
pub mod sources;
pub mod tipa;

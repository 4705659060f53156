use std::fmt;

/// Path segments of the bulk-data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Historical bar-data archive.
    DataFile,
    /// Companion instrument-metadata archive.
    MetaFile,
    /// Freshness probe; the body is a bare `YYYY-MM-DD` date.
    LastUpdate,
    /// Futures contract-specification archive.
    FuturesContract,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::DataFile => "data_file",
            Endpoint::MetaFile => "meta_file",
            Endpoint::LastUpdate => "last_update",
            Endpoint::FuturesContract => "futures_contract",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

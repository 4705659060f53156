//! End-to-end freshness flow against a real SQLite store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use frd_client::endpoint::Endpoint;
use frd_client::errors::ClientError;
use frd_client::params::{Adjustment, BarInterval, QueryParams};
use frd_client::source::RemoteSource;
use frd_sync::instrument::{
    AssetClass, FullRequest, Instrument, Period, UpdateRequest, handler::InstrumentHandler,
};
use frd_sync::watermark::{WatermarkStore, repo::SqliteWatermarkStore};

mod common;

struct ScriptedSource {
    last_update: &'static str,
    endpoints: Mutex<Vec<Endpoint>>,
}

impl ScriptedSource {
    fn answering(last_update: &'static str) -> Arc<Self> {
        Arc::new(Self {
            last_update,
            endpoints: Mutex::new(Vec::new()),
        })
    }
}

impl RemoteSource for ScriptedSource {
    fn fetch_archive(
        &self,
        endpoint: Endpoint,
        _params: &QueryParams,
        _dest: &Path,
    ) -> Result<(), ClientError> {
        self.endpoints.lock().unwrap().push(endpoint);
        Ok(())
    }

    fn fetch_text(&self, endpoint: Endpoint, _params: &QueryParams) -> Result<String, ClientError> {
        self.endpoints.lock().unwrap().push(endpoint);
        Ok(self.last_update.to_string())
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn bootstrapping_a_range_leaves_cadence_watermarks_untouched() {
    let db = common::setup_db();
    let store = Arc::new(SqliteWatermarkStore::open(&db.path).unwrap());
    let source = ScriptedSource::answering("2025-05-22");
    let work = tempfile::tempdir().unwrap();

    let handler = InstrumentHandler::new(
        AssetClass::Stock,
        source.clone(),
        store.clone(),
        work.path(),
    );

    // nothing recorded yet: stale
    assert!(handler.needs_update(Period::Day).unwrap());

    handler
        .download_full(&FullRequest {
            scope: "A".into(),
            interval: BarInterval::OneDay,
            adjustment: Some(Adjustment::SplitDividend),
        })
        .unwrap();

    assert!(source.endpoints.lock().unwrap().contains(&Endpoint::DataFile));
    assert_eq!(
        store.get(AssetClass::Stock, "full_A").unwrap(),
        Some(day(2025, 5, 22))
    );

    // the day cadence has its own key namespace; bootstrapping does not
    // silence it
    assert!(handler.needs_update(Period::Day).unwrap());
}

#[test]
fn an_update_records_the_incremental_watermark() {
    let db = common::setup_db();
    let store = Arc::new(SqliteWatermarkStore::open(&db.path).unwrap());
    let source = ScriptedSource::answering("2025-05-22");
    let work = tempfile::tempdir().unwrap();

    let handler = InstrumentHandler::new(
        AssetClass::Etf,
        source.clone(),
        store.clone(),
        work.path(),
    );

    handler
        .download_update(&UpdateRequest::scheduled(Period::Day))
        .unwrap();

    assert_eq!(
        store.get(AssetClass::Etf, "day").unwrap(),
        Some(day(2025, 5, 22))
    );
    // once recorded, the same remote date is no longer stale
    assert!(!handler.needs_update(Period::Day).unwrap());
}

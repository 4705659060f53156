//! The shared handler implementation behind all six asset classes.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use frd_client::endpoint::Endpoint;
use frd_client::params::{Adjustment, QueryParams};
use frd_client::source::RemoteSource;
use tracing::info;

use crate::instrument::{
    AssetClass, FullRequest, Instrument, Period, SyncError, UpdateRequest, is_stale,
};
use crate::watermark::WatermarkStore;

/// Directory and `period` value full downloads run under.
const FULL_SEGMENT: &str = "full";

/// Generic per-class handler.
///
/// One instance per [`AssetClass`]; everything class-specific is read off
/// the descriptor, so the download and freshness logic exists exactly once.
pub struct InstrumentHandler {
    class: AssetClass,
    client: Arc<dyn RemoteSource + Send + Sync>,
    store: Arc<dyn WatermarkStore + Send + Sync>,
    work_dir: PathBuf,
}

impl InstrumentHandler {
    /// Creates the handler for `class`, sharing the client and store with
    /// its siblings.
    pub fn new(
        class: AssetClass,
        client: Arc<dyn RemoteSource + Send + Sync>,
        store: Arc<dyn WatermarkStore + Send + Sync>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            class,
            client,
            store,
            work_dir: work_dir.into(),
        }
    }

    fn base_params(&self) -> QueryParams {
        QueryParams::new().push("type", self.class.code())
    }

    fn with_adjustment(&self, params: QueryParams, adjustment: Option<Adjustment>) -> QueryParams {
        match adjustment {
            Some(adj) if self.class.takes_adjustment() => params.push("adjustment", adj.as_str()),
            _ => params,
        }
    }
}

impl Instrument for InstrumentHandler {
    fn asset_class(&self) -> AssetClass {
        self.class
    }

    fn last_remote_update(&self, full: bool) -> Result<NaiveDate, SyncError> {
        let params = self
            .base_params()
            .push("is_full_update", if full { "true" } else { "false" });
        let body = self.client.fetch_text(Endpoint::LastUpdate, &params)?;
        let raw = body.trim();
        raw.parse().map_err(|source| SyncError::BadWatermarkDate {
            raw: raw.to_string(),
            source,
        })
    }

    fn download_full(&self, req: &FullRequest) -> Result<(), SyncError> {
        let dest = self
            .work_dir
            .join(self.class.code())
            .join(FULL_SEGMENT)
            .join(&req.scope);

        if self.class.fetches_contract_spec() {
            let params = self
                .base_params()
                .push("period", FULL_SEGMENT)
                .push(self.class.scope_param(), req.scope.clone());
            self.client
                .fetch_archive(Endpoint::FuturesContract, &params, &dest)?;
        }

        let params = self
            .base_params()
            .push("period", FULL_SEGMENT)
            .push(self.class.scope_param(), req.scope.clone())
            .push("timeframe", req.interval.as_str());
        let params = self.with_adjustment(params, req.adjustment);
        self.client
            .fetch_archive(Endpoint::DataFile, &params, &dest)?;

        if self.class.fetches_meta() {
            let params = self
                .base_params()
                .push("period", FULL_SEGMENT)
                .push(self.class.scope_param(), req.scope.clone());
            self.client
                .fetch_archive(Endpoint::MetaFile, &params, &dest.join("meta"))?;
        }

        // Recorded from a fresh probe, not the decision that led here, so
        // the stored date is at least as new as what was just fetched.
        let stamped = self.last_remote_update(true)?;
        self.store.set_full(self.class, &req.scope, stamped)?;
        info!(class = %self.class, scope = %req.scope, watermark = %stamped, "full download recorded");
        Ok(())
    }

    fn download_update(&self, req: &UpdateRequest) -> Result<(), SyncError> {
        let dest = self.work_dir.join(self.class.code()).join(req.period.key());

        let params = self
            .base_params()
            .push("period", req.period.key())
            .push("timeframe", req.interval.as_str());
        let params = self.with_adjustment(params, req.adjustment);
        self.client
            .fetch_archive(Endpoint::DataFile, &params, &dest)?;

        if self.class.fetches_meta() {
            let params = self.base_params().push("period", req.period.key());
            self.client
                .fetch_archive(Endpoint::MetaFile, &params, &dest.join("meta"))?;
        }

        let stamped = self.last_remote_update(false)?;
        self.store.set(self.class, req.period.key(), stamped)?;
        info!(class = %self.class, period = %req.period, watermark = %stamped, "update recorded");
        Ok(())
    }

    fn needs_update(&self, period: Period) -> Result<bool, SyncError> {
        let remote = self.last_remote_update(false)?;
        let local = self.store.get(self.class, period.key())?;
        Ok(is_stale(remote, local))
    }
}
